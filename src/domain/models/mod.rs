//! 도메인 모델
//!
//! - [`cart`] - 장바구니 레코드와 병합 규칙

pub mod cart;

pub use cart::*;
