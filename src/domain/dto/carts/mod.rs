//! 장바구니 HTTP 요청/응답 DTO
//!
//! 저장 형식(protobuf)과 분리된 JSON 표현입니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
