//! # Domain Layer Module
//!
//! 장바구니 도메인의 모델과 데이터 전송 객체를 담당합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Models   - 캐시에 저장되는 장바구니 레코드 (protobuf)
//! └── DTOs     - HTTP 요청/응답 (JSON)
//!      │
//!      ▼
//! Infrastructure Layer (CartStore, Redis)
//! ```
//!
//! 모델과 DTO를 분리하여 저장 형식의 필드 번호 호환성과
//! API 응답 형식이 서로에게 영향을 주지 않도록 합니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
