//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 장바구니 저장소 연산으로 연결하는 핸들러 함수들입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (frontend, checkout, load generator)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - 입력 검증, DTO 변환        ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   CartStore - 장바구니 연산, 장애 변환           ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   ConnectionSupervisor + Redis                  ← Caching Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 저장소는 `web::Data<CartStore>`로 주입되며 모든 워커가 같은 인스턴스를 공유합니다.

pub mod carts;
