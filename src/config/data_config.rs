//! 캐시 및 서버 설정 관리 모듈
//!
//! 환경 변수에서 Redis 접속 주소와 HTTP 바인딩 정보를 읽어옵니다.
//! 재시도 횟수, 백오프, TTL 등 저장소 튜닝 값은 설정 대상이 아니며
//! 저장소 내부 상수로 고정됩니다.

use std::env;

use crate::core::errors::AppError;

/// Redis 접속 설정
pub struct CacheConfig;

impl CacheConfig {
    /// `REDIS_ADDR` 환경 변수를 읽습니다. 필수 값입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 변수가 없거나 비어 있는 경우
    ///
    /// # Examples
    ///
    /// ```bash
    /// REDIS_ADDR=valkey-cart:6379
    /// ```
    pub fn redis_addr() -> Result<String, AppError> {
        Self::parse_redis_addr(env::var("REDIS_ADDR").ok())
    }

    pub fn parse_redis_addr(value: Option<String>) -> Result<String, AppError> {
        match value.map(|v| v.trim().to_string()) {
            Some(addr) if !addr.is_empty() => Ok(addr),
            _ => Err(AppError::InternalError(
                "REDIS_ADDR environment variable is required".to_string(),
            )),
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        Self::parse_port(env::var("PORT").ok().as_deref())
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 파싱할 수 없으면 8080을 사용합니다.
    pub fn parse_port(value: Option<&str>) -> u16 {
        value.and_then(|v| v.trim().parse().ok()).unwrap_or(8080)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_addr_is_required() {
        assert!(CacheConfig::parse_redis_addr(None).is_err());
        assert!(CacheConfig::parse_redis_addr(Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_redis_addr_is_trimmed() {
        let addr = CacheConfig::parse_redis_addr(Some(" valkey-cart:6379 \n".to_string()))
            .expect("address");
        assert_eq!(addr, "valkey-cart:6379");
    }

    #[test]
    fn test_port_parsing_falls_back_to_default() {
        assert_eq!(ServerConfig::parse_port(Some("7070")), 7070);
        assert_eq!(ServerConfig::parse_port(Some("not-a-port")), 8080);
        assert_eq!(ServerConfig::parse_port(Some("70000")), 8080);
        assert_eq!(ServerConfig::parse_port(None), 8080);
    }
}
