//! 테스트용 인메모리 캐시 백엔드
//!
//! 해시 필드 저장, 키 만료(tokio 시계 기준), 장애 주입, 연결 횟수 집계를 지원합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::caching::backend::{
    CacheConnection, CacheConnector, CacheError, CacheResult, ConnectionEvent, ReadinessNotifier,
};

#[derive(Default)]
struct HashEntry {
    fields: HashMap<String, Vec<u8>>,
    expires_at: Option<Instant>,
}

impl HashEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

#[derive(Default)]
pub struct InMemoryCache {
    hashes: Mutex<HashMap<String, HashEntry>>,
    strings: Mutex<HashMap<String, String>>,
    offline: AtomicBool,
    corrupt_string_reads: AtomicBool,
}

impl InMemoryCache {
    /// `true`이면 모든 명령이 연결 오류로 실패합니다.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// 문자열 조회가 저장된 값과 다른 값을 돌려주도록 합니다. (스모크 테스트 실패 재현)
    pub fn corrupt_string_reads(&self, corrupt: bool) {
        self.corrupt_string_reads.store(corrupt, Ordering::SeqCst);
    }

    pub fn string_value(&self, key: &str) -> Option<String> {
        self.strings.lock().unwrap().get(key).cloned()
    }

    /// 만료되지 않은 키의 남은 수명
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let hashes = self.hashes.lock().unwrap();
        let entry = hashes.get(key).filter(|e| !e.is_expired(now))?;
        entry.expires_at.map(|deadline| deadline - now)
    }

    /// 해시 필드에 원시 바이트를 직접 기록합니다. (손상된 레코드 재현)
    pub fn put_raw(&self, key: &str, field: &str, value: &[u8]) {
        let mut hashes = self.hashes.lock().unwrap();
        let entry = hashes.entry(key.to_string()).or_default();
        entry.fields.insert(field.to_string(), value.to_vec());
    }

    fn check_online(&self) -> CacheResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "cache offline");
            return Err(CacheError::Redis(redis::RedisError::from(io)));
        }
        Ok(())
    }
}

/// 인메모리 캐시에 대한 연결 팩토리
#[derive(Clone, Default)]
pub struct InMemoryConnector {
    cache: Arc<InMemoryCache>,
    connect_calls: Arc<AtomicU32>,
    failing_connects: Arc<AtomicU32>,
    connect_delay: Duration,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn cache(&self) -> &InMemoryCache {
        &self.cache
    }

    pub fn connect_calls(&self) -> u32 {
        self.connect_calls.load(Ordering::SeqCst)
    }

    /// 다음 `count`번의 연결 시도를 실패시킵니다.
    pub fn fail_next_connects(&self, count: u32) {
        self.failing_connects.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheConnector for InMemoryConnector {
    async fn connect(&self, notifier: ReadinessNotifier) -> CacheResult<Arc<dyn CacheConnection>> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }

        let should_fail = self
            .failing_connects
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            return Err(CacheError::Redis(redis::RedisError::from(io)));
        }

        Ok(Arc::new(InMemoryConnection {
            cache: self.cache.clone(),
            notifier,
        }))
    }

    fn endpoint(&self) -> &str {
        "memory://"
    }
}

struct InMemoryConnection {
    cache: Arc<InMemoryCache>,
    notifier: ReadinessNotifier,
}

impl InMemoryConnection {
    fn observe(&self) -> CacheResult<()> {
        match self.cache.check_online() {
            Ok(()) => {
                if !self.notifier.is_ready() {
                    self.notifier.notify(ConnectionEvent::Restored);
                }
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(ConnectionEvent::Lost);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CacheConnection for InMemoryConnection {
    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<Vec<u8>>> {
        self.observe()?;
        let now = Instant::now();
        let mut hashes = self.cache.hashes.lock().unwrap();
        if hashes.get(key).is_some_and(|e| e.is_expired(now)) {
            hashes.remove(key);
        }
        Ok(hashes.get(key).and_then(|e| e.fields.get(field).cloned()))
    }

    async fn hset_with_expiry(&self, key: &str, field: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        self.observe()?;
        let now = Instant::now();
        let mut hashes = self.cache.hashes.lock().unwrap();
        if hashes.get(key).is_some_and(|e| e.is_expired(now)) {
            hashes.remove(key);
        }
        let entry = hashes.entry(key.to_string()).or_default();
        entry.fields.insert(field.to_string(), value.to_vec());
        entry.expires_at = Some(now + ttl);
        Ok(())
    }

    async fn set_with_expiry(&self, key: &str, value: &str, _ttl: Duration) -> CacheResult<()> {
        self.observe()?;
        self.cache.strings.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
        self.observe()?;
        if self.cache.corrupt_string_reads.load(Ordering::SeqCst) {
            return Ok(Some("NOT OK".to_string()));
        }
        Ok(self.cache.string_value(key))
    }

    async fn ping(&self) -> CacheResult<()> {
        self.observe()
    }
}
