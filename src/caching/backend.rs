//! # 캐시 백엔드 추상화
//!
//! 장바구니 저장소가 사용하는 원격 캐시와의 경계를 정의합니다.
//! 실제 구현은 [`crate::caching::redis`]의 Redis 어댑터이며,
//! 테스트에서는 인메모리 구현으로 교체됩니다.
//!
//! ## 구성 요소
//!
//! - [`CacheConnector`] - 연결을 새로 수립하는 팩토리
//! - [`CacheConnection`] - 수립된 공유 연결 핸들 (해시 필드 조회/저장, PING)
//! - [`ReadinessNotifier`] - 전송 계층이 보내는 연결 끊김/복구 이벤트 수신자
//! - [`CacheError`] - 백엔드 실패 원인 분류

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use thiserror::Error;

/// 백엔드 실패 원인
///
/// 요청 처리 중에는 `AppError::StorageUnavailable`로,
/// 시작 시 연결 수립 중에는 `AppError::ConnectionFailed`로 감싸져 전달됩니다.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Redis 클라이언트가 반환한 오류 (타임아웃, 연결 끊김, 프로토콜 오류 등)
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// 저장된 장바구니 레코드를 protobuf로 해석할 수 없음
    #[error("Cart record decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// 연결 직후 수행하는 쓰기/읽기 스모크 테스트 결과 불일치
    #[error("Smoke test failed: expected \"OK\", got {0:?}")]
    SmokeTest(Option<String>),

    /// 재연결 시도가 실패하여 사용할 수 있는 연결이 없음
    #[error("Cache connection is not available")]
    NotConnected,

    /// 한 번의 연결 시도 실패를 그 결과를 기다린 모든 호출자가 함께 받음
    #[error(transparent)]
    Shared(Arc<CacheError>),
}

impl CacheError {
    /// 연결 자체가 끊어졌음을 의미하는 오류인지 판별합니다.
    ///
    /// `true`이면 전송 계층은 [`ConnectionEvent::Lost`]를 통지합니다.
    pub fn is_connectivity_failure(&self) -> bool {
        match self {
            CacheError::Redis(e) => {
                e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
            }
            CacheError::NotConnected => true,
            CacheError::Shared(inner) => inner.is_connectivity_failure(),
            _ => false,
        }
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// 전송 계층이 비동기적으로 전달하는 연결 상태 변화
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// 끊어졌던 연결이 다시 사용 가능해짐
    Restored,
    /// 연결이 끊어짐
    Lost,
}

/// 준비 상태 플래그를 뒤집는 관찰자
///
/// 감독자(supervisor)와 전송 어댑터가 같은 플래그를 공유합니다.
/// 이 플래그가 "이미 연결됨" 빠른 경로의 유일한 판단 근거입니다.
///
/// [`detached`](Self::detached)로 만든 사본은 [`attach`](Self::attach)되기 전까지
/// 이벤트를 무시합니다. 감독자는 새 연결에 분리된 사본을 넘기고, 핸들을 설치한
/// 뒤에야 연결합니다.
#[derive(Clone, Debug)]
pub struct ReadinessNotifier {
    ready: Arc<AtomicBool>,
    attached: Arc<AtomicBool>,
}

impl Default for ReadinessNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessNotifier {
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// 같은 플래그를 가리키지만 아직 이벤트를 전달하지 않는 사본을 만듭니다.
    pub fn detached(&self) -> Self {
        Self {
            ready: self.ready.clone(),
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn attach(&self) {
        self.attached.store(true, Ordering::Release);
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// 연결 이벤트를 반영합니다. 상태가 실제로 바뀔 때만 로그를 남깁니다.
    pub fn notify(&self, event: ConnectionEvent) {
        if !self.is_attached() {
            debug!("설치되지 않은 연결의 이벤트 무시: {:?}", event);
            return;
        }

        match event {
            ConnectionEvent::Restored => {
                if !self.ready.swap(true, Ordering::AcqRel) {
                    info!("🔌 Redis 연결이 복구되었습니다");
                }
            }
            ConnectionEvent::Lost => {
                if self.ready.swap(false, Ordering::AcqRel) {
                    warn!("⚠️ Redis 연결이 끊어졌습니다. 다음 요청에서 재확인합니다");
                }
            }
        }
    }
}

/// 수립된 캐시 연결 핸들
///
/// 모든 동시 요청이 하나의 핸들을 공유하므로 메서드는 `&self`만 요구합니다.
#[async_trait]
pub trait CacheConnection: Send + Sync {
    /// 해시 `key`의 `field` 값을 조회합니다. 없으면 `None`.
    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<Vec<u8>>>;

    /// 해시 필드를 저장하고 키 전체의 만료 시간을 `ttl`로 재설정합니다.
    async fn hset_with_expiry(&self, key: &str, field: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    /// 문자열 키를 만료 시간과 함께 저장합니다. (스모크 테스트용)
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// 문자열 키를 조회합니다. (스모크 테스트용)
    async fn get_string(&self, key: &str) -> CacheResult<Option<String>>;

    async fn ping(&self) -> CacheResult<()>;
}

/// 새 연결을 수립하는 팩토리
///
/// `notifier`는 연결이 살아 있는 동안 연결 끊김/복구 이벤트를 전달받습니다.
#[async_trait]
pub trait CacheConnector: Send + Sync {
    async fn connect(&self, notifier: ReadinessNotifier) -> CacheResult<Arc<dyn CacheConnection>>;

    /// 로그에 표시할 접속 대상
    fn endpoint(&self) -> &str;
}
