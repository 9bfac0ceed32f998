//! # Application Error Handling System
//!
//! 장바구니 서비스 전체에서 사용하는 통합 에러 타입입니다.
//!
//! ## 에러 분류
//!
//! | 변형 | 의미 | HTTP 상태 |
//! |------|------|-----------|
//! | `ConnectionFailed` | 시작 시 캐시 연결 수립 실패 (치명적) | 500 |
//! | `StorageUnavailable` | 요청 처리 중 캐시 장애 (호출자가 재시도 가능) | 503 |
//! | `ValidationError` | 잘못된 요청 입력 | 400 |
//! | `InternalError` | 그 밖의 내부 오류 | 500 |
//!
//! 장바구니가 없는 것은 에러가 아닙니다. 저장소는 빈 장바구니를 반환합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn load(store: &CartStore, user_id: &str) -> AppResult<Cart> {
//!     // CacheError는 `?`로 StorageUnavailable이 됩니다
//!     store.get_cart(user_id).await
//! }
//! ```

use thiserror::Error;

use crate::caching::CacheError;

#[derive(Error, Debug)]
pub enum AppError {
    /// 재시도 정책을 모두 소진했거나 스모크 테스트가 실패하여 캐시에 연결할 수 없음
    ///
    /// 프로세스 시작 단계에서만 발생하며, 부트스트랩은 이 에러를 받으면 종료합니다.
    #[error("Wasn't able to connect to cache after {attempts} attempt(s): {source}")]
    ConnectionFailed {
        attempts: u32,
        #[source]
        source: CacheError,
    },

    /// 요청 처리 중 발생한 모든 백엔드 실패
    ///
    /// 타임아웃, 연결 끊김, 프로토콜 오류, 레코드 디코딩 실패를 하나로 묶습니다.
    /// 데이터 손상 신호가 아니며 호출자 판단에 따라 재시도할 수 있습니다.
    #[error("Can't access cart storage: {0}")]
    StorageUnavailable(#[from] CacheError),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ConnectionFailed { .. } | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 각 에러 타입을 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

pub type AppResult<T> = Result<T, AppError>;
