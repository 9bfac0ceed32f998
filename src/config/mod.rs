//! # Configuration Module
//!
//! 장바구니 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - Redis 접속, HTTP 서버 바인딩 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export REDIS_ADDR="valkey-cart:6379"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export HOST="0.0.0.0"      # 기본값
//! export PORT="8080"         # 기본값
//! export PROFILE="dev"       # .env.dev / .env.prod 선택
//! export RUST_LOG="info"
//! ```

pub mod data_config;

pub use data_config::*;
