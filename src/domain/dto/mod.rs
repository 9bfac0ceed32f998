//! 데이터 전송 객체 (DTO)
//!
//! HTTP 계층에서 주고받는 요청/응답 구조체를 정의합니다.
//! 도메인 모델을 직접 노출하지 않고 변환을 거쳐 응답합니다.

pub mod carts;

pub use carts::*;
