//! # 연결 감독자 (Connection Supervisor)
//!
//! 원격 캐시에 대한 **단 하나의 공유 연결 핸들**의 생명주기를 관리합니다.
//!
//! ## 상태 전이
//!
//! ```text
//! Disconnected ──ensure_connected()──▶ Connecting ──성공 + 스모크 테스트──▶ Connected
//!                                          │                                  │   ▲
//!                                          ▼                                  │   │
//!                           재시도 소진 / 스모크 테스트 실패            Lost  │   │ Restored
//!                                   (치명적 오류)                             ▼   │
//!                                                                       (준비 안 됨)
//! ```
//!
//! ## 동시성
//!
//! - 빠른 경로: 준비 플래그와 핸들 슬롯을 `.await` 없이 읽습니다. 핸들 슬롯은
//!   `connect_lock`을 쥔 호출자만 교체합니다.
//! - 느린 경로: 비동기 뮤텍스를 잡고 플래그를 다시 확인한 뒤(double-checked locking)
//!   한 호출자만 연결 절차를 수행합니다. 락에서 기다리던 호출자는 그동안 끝난 시도의
//!   결과를 그대로 받으며, 실패했다고 해서 같은 절차를 다시 밟지 않습니다.
//! - 한 번 연결된 이후 플래그가 내려가면, 다음 호출자는 기존 핸들에 PING을 보내
//!   클라이언트 자체 재연결로 복구되었는지 먼저 확인하고, 아니면 한 번 새로 연결합니다.
//! - 새 연결은 분리된 [`ReadinessNotifier`]로 시작하므로, 핸들이 설치되기 전에
//!   스모크 테스트 명령이 공유 플래그를 올리지 않습니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{error, info, warn};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::caching::backend::{
    CacheConnection, CacheConnector, CacheError, CacheResult, ConnectionEvent, ReadinessNotifier,
};

/// 연결 직후 쓰기/읽기 확인에 사용하는 키
pub const SMOKE_TEST_KEY: &str = "cart_store:smoke_test";
const SMOKE_TEST_VALUE: &str = "OK";
const SMOKE_TEST_TTL: Duration = Duration::from_secs(60);

/// 연결 수립 재시도 정책 (지수 백오프)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// 시작 시 사용하는 고정 정책: 30회, 1초부터 두 배씩, 최대 10초
    pub const STARTUP: RetryPolicy = RetryPolicy {
        max_attempts: 30,
        base_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(10),
    };

    /// `attempt`번째(1부터) 실패 후 다음 시도까지 대기할 시간
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        delay.min(self.max_delay)
    }
}

/// 연결 수립 실패 (재시도 소진 또는 스모크 테스트 실패)
///
/// 같은 시도를 기다린 호출자들이 원인을 함께 받으므로 `cause`는
/// [`CacheError::Shared`]로 감싸여 있습니다.
#[derive(Debug)]
pub struct ConnectFailure {
    pub attempts: u32,
    pub cause: CacheError,
}

impl ConnectFailure {
    /// 공유 래퍼를 벗긴 실제 원인
    pub fn root_cause(&self) -> &CacheError {
        let mut cause = &self.cause;
        while let CacheError::Shared(inner) = cause {
            cause = inner.as_ref();
        }
        cause
    }
}

/// `connect_lock` 안에 보관하는 마지막 연결 시도의 실패
struct RecordedFailure {
    attempts: u32,
    cause: Arc<CacheError>,
}

impl RecordedFailure {
    fn new(attempts: u32, cause: CacheError) -> Self {
        Self { attempts, cause: Arc::new(cause) }
    }

    fn to_failure(&self) -> ConnectFailure {
        ConnectFailure {
            attempts: self.attempts,
            cause: CacheError::Shared(self.cause.clone()),
        }
    }
}

/// 설치된 연결과 그 연결에 넘긴 통지자
struct Installed {
    connection: Arc<dyn CacheConnection>,
    notifier: ReadinessNotifier,
}

pub struct ConnectionSupervisor {
    connector: Arc<dyn CacheConnector>,
    policy: RetryPolicy,
    notifier: ReadinessNotifier,
    handle: RwLock<Option<Installed>>,
    connect_lock: Mutex<Option<RecordedFailure>>,
    finished_attempts: AtomicU64,
}

impl ConnectionSupervisor {
    pub fn new(connector: Arc<dyn CacheConnector>) -> Self {
        Self::with_policy(connector, RetryPolicy::STARTUP)
    }

    pub fn with_policy(connector: Arc<dyn CacheConnector>, policy: RetryPolicy) -> Self {
        Self {
            connector,
            policy,
            notifier: ReadinessNotifier::new(),
            handle: RwLock::new(None),
            connect_lock: Mutex::new(None),
            finished_attempts: AtomicU64::new(0),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.notifier.is_ready()
    }

    /// 전송 계층 외부에서 연결 이벤트를 주입할 때 사용합니다.
    pub fn notifier(&self) -> &ReadinessNotifier {
        &self.notifier
    }

    /// 이미 수립된 핸들을 준비 상태와 무관하게 반환합니다.
    pub fn current(&self) -> Option<Arc<dyn CacheConnection>> {
        let slot = self.handle.read();
        slot.as_ref().map(|installed| installed.connection.clone())
    }

    /// 사용 가능한 공유 연결을 보장합니다.
    ///
    /// # Errors
    ///
    /// * 최초 연결: 재시도 정책을 모두 소진했거나 스모크 테스트가 실패한 경우
    /// * 재연결: 기존 핸들 PING과 한 번의 새 연결 시도가 모두 실패한 경우
    /// * 락에서 기다리는 동안 다른 호출자의 시도가 위 이유로 실패한 경우
    pub async fn ensure_connected(&self) -> Result<Arc<dyn CacheConnection>, ConnectFailure> {
        if let Some(handle) = self.ready_handle() {
            return Ok(handle);
        }

        let observed = self.finished_attempts.load(Ordering::Acquire);
        let mut last_failure = self.connect_lock.lock().await;

        // 락을 기다리는 동안 다른 호출자가 연결을 끝냈을 수 있음
        if let Some(handle) = self.ready_handle() {
            return Ok(handle);
        }

        // 기다리는 동안 끝난 시도가 실패했다면 그 결과를 받음
        if self.finished_attempts.load(Ordering::Acquire) != observed {
            if let Some(recorded) = &*last_failure {
                return Err(recorded.to_failure());
            }
        }

        let outcome = match self.current() {
            None => self.establish(&self.policy).await,
            Some(existing) => self.rediscover(existing).await,
        };

        let result = match outcome {
            Ok(connection) => {
                *last_failure = None;
                Ok(connection)
            }
            Err((attempts, cause)) => {
                let recorded = RecordedFailure::new(attempts, cause);
                let failure = recorded.to_failure();
                *last_failure = Some(recorded);
                Err(failure)
            }
        };
        self.finished_attempts.fetch_add(1, Ordering::AcqRel);

        result
    }

    fn ready_handle(&self) -> Option<Arc<dyn CacheConnection>> {
        if !self.notifier.is_ready() {
            return None;
        }
        self.current()
    }

    /// 연결이 끊어졌던 핸들을 다시 확인하고, 실패하면 한 번 새로 연결합니다.
    async fn rediscover(&self, existing: Arc<dyn CacheConnection>) -> Result<Arc<dyn CacheConnection>, (u32, CacheError)> {
        match existing.ping().await {
            Ok(()) => {
                self.notifier.notify(ConnectionEvent::Restored);
                Ok(existing)
            }
            Err(e) => {
                warn!("기존 Redis 연결 확인 실패: {}. 새 연결을 시도합니다", e);
                let single_attempt = RetryPolicy {
                    max_attempts: 1,
                    ..self.policy.clone()
                };
                self.establish(&single_attempt).await
            }
        }
    }

    /// 재시도 정책에 따라 연결을 수립하고 스모크 테스트를 수행합니다.
    /// 호출자는 `connect_lock`을 보유하고 있어야 합니다.
    ///
    /// 실패 시 시도 횟수와 원인을 반환합니다.
    async fn establish(&self, policy: &RetryPolicy) -> Result<Arc<dyn CacheConnection>, (u32, CacheError)> {
        let endpoint = self.connector.endpoint();
        let mut attempt = 0;

        let (connection, pending) = loop {
            attempt += 1;
            info!("📡 Redis 연결 시도 {}/{}: {}", attempt, policy.max_attempts, endpoint);

            let pending = self.notifier.detached();
            match self.connector.connect(pending.clone()).await {
                Ok(connection) => break (connection, pending),
                Err(e) if attempt < policy.max_attempts => {
                    let delay = policy.delay_after(attempt);
                    warn!("Redis 연결 실패 ({}). {:?} 후 재시도", e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("❌ Redis 연결 실패: {}회 시도 후 포기합니다", attempt);
                    return Err((attempt, e));
                }
            }
        };

        info!("✅ Redis 연결 성공. 스모크 테스트 수행 중");
        if let Err(cause) = smoke_test(connection.as_ref()).await {
            error!("❌ 스모크 테스트 실패: {}", cause);
            return Err((attempt, cause));
        }

        let replaced = self.handle.write().replace(Installed {
            connection: connection.clone(),
            notifier: pending.clone(),
        });
        if let Some(old) = replaced {
            old.notifier.detach();
        }
        pending.attach();
        self.notifier.notify(ConnectionEvent::Restored);

        Ok(connection)
    }
}

async fn smoke_test(connection: &dyn CacheConnection) -> CacheResult<()> {
    connection.set_with_expiry(SMOKE_TEST_KEY, SMOKE_TEST_VALUE, SMOKE_TEST_TTL).await?;
    let value = connection.get_string(SMOKE_TEST_KEY).await?;
    info!("스모크 테스트 결과: {:?}", value);

    match value.as_deref() {
        Some(SMOKE_TEST_VALUE) => Ok(()),
        _ => Err(CacheError::SmokeTest(value)),
    }
}
