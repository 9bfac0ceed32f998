//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! Redis를 저장소로 사용하는 장바구니 저장소를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::carts::CartStore;
//!
//! let store = CartStore::new(&CacheConfig::redis_addr()?)?;
//! let cart = store.get_cart("user-1").await?;
//! ```

pub mod carts;
