//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 장바구니 저장소의 연결 관리와 전송 계층을 제공합니다.
//!
//! # 주요 기능
//!
//! - 단일 공유 연결의 지연 수립과 지수 백오프 재시도
//! - 연결 끊김/복구 이벤트에 따른 준비 상태 관리
//! - 해시 필드 + TTL 기반 저장 연산
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::caching::redis::RedisConnector;
//! use crate::caching::supervisor::ConnectionSupervisor;
//!
//! let connector = RedisConnector::new("localhost:6379")?;
//! let supervisor = ConnectionSupervisor::new(Arc::new(connector));
//! let connection = supervisor.ensure_connected().await?;
//! connection.ping().await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_ADDR=localhost:6379
//! ```

pub mod backend;
pub mod redis;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod memory;

pub use backend::{CacheConnection, CacheConnector, CacheError, CacheResult, ConnectionEvent, ReadinessNotifier};
pub use supervisor::{ConnectFailure, ConnectionSupervisor, RetryPolicy};
