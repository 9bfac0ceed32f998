//! 장바구니 서비스 백엔드
//!
//! 사용자별 장바구니를 Redis에 저장하는 상태 저장 서비스입니다.
//! 단일 공유 연결을 감독하며, 장바구니 레코드를 protobuf로 직렬화하고
//! 추가/조회/비우기 연산을 병합 규칙과 만료 시간에 맞게 수행합니다.
//!
//! # Features
//!
//! - **연결 감독**: 첫 사용 시 한 번만 연결, 지수 백오프 재시도, 연결 끊김/복구 추적
//! - **장바구니 병합**: 같은 상품은 수량 합산
//! - **슬라이딩 TTL**: 쓰기마다 60분 만료 재설정
//! - **장애 변환**: 모든 백엔드 오류를 `StorageUnavailable`로 통일
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 입력 검증, DTO 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    CartStore    │ ← 장바구니 연산
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Supervisor    │ ← 공유 연결 생명주기
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │      Redis      │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cart_service_backend::repositories::carts::CartStore;
//!
//! let store = CartStore::new("localhost:6379")?;
//! store.initialize().await?;
//!
//! store.add_item("u1", "P1", 2).await?;
//! let cart = store.get_cart("u1").await?;
//! ```

pub mod core;
pub mod config;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod routes;
pub mod handlers;
