//! # Core Module
//!
//! 서비스 전반에서 공유하는 핵심 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현
//! - **원인 보존**: thiserror `#[source]` 기반 에러 체인 관리

pub mod errors;

pub use errors::*;
