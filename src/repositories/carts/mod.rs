//! 장바구니 저장소 모듈
//!
//! 사용자별 장바구니를 Redis 해시에 protobuf 레코드로 저장합니다.
//!
//! # Features
//!
//! - **상품 추가**: 같은 상품은 수량을 합산
//! - **조회**: 캐시 미스는 빈 장바구니로 처리 (에러 아님)
//! - **비우기**: 미리 인코딩된 빈 레코드로 덮어쓰기
//! - **TTL 자동 관리**: 쓰기마다 60분 만료 재설정
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::carts::CartStore;
//!
//! let store = CartStore::new("localhost:6379")?;
//! store.initialize().await?;
//!
//! store.add_item("user-1", "OLJCESPC7Z", 2).await?;
//! let cart = store.get_cart("user-1").await?;
//! store.empty_cart("user-1").await?;
//! ```

pub mod cart_store;

pub use cart_store::*;
