//! # 장바구니 저장소 구현
//!
//! 공유 캐시 연결 위에서 장바구니 추가/조회/비우기와 생존 확인을 수행합니다.
//!
//! ## 저장 구조
//!
//! ```text
//! KEY   = {user_id}            (Hash, TTL 60분, 쓰기마다 재설정)
//! FIELD = "cart"               (protobuf 인코딩된 Cart)
//! ```
//!
//! ## 동시성
//!
//! 같은 사용자에 대한 `add_item`은 읽기-수정-쓰기 사이에 잠금을 걸지 않습니다.
//! 동시에 들어온 두 요청은 나중에 쓴 쪽이 필드 전체를 덮어쓰므로 한쪽의 수량 증가가
//! 유실될 수 있습니다. 엄격한 정합성이 필요한 호출자는 상위 계층에서 직렬화해야 합니다.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::caching::redis::RedisConnector;
use crate::caching::{CacheConnection, CacheConnector, ConnectionSupervisor};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::cart::Cart;

/// 장바구니 레코드를 담는 해시 필드 이름
pub const CART_FIELD_NAME: &str = "cart";

/// 마지막 쓰기 이후 장바구니가 유지되는 시간
pub const CART_TTL: Duration = Duration::from_secs(60 * 60);

pub struct CartStore {
    supervisor: ConnectionSupervisor,
    empty_cart_bytes: Vec<u8>,
}

impl CartStore {
    /// Redis 주소로 저장소를 만듭니다. 연결은 `initialize` 또는 첫 사용 시 수립됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConnectionFailed` - 주소를 Redis URL로 해석할 수 없는 경우
    pub fn new(redis_addr: &str) -> AppResult<Self> {
        let connector = RedisConnector::new(redis_addr)
            .map_err(|source| AppError::ConnectionFailed { attempts: 0, source })?;

        Ok(Self::with_connector(Arc::new(connector)))
    }

    pub fn with_connector(connector: Arc<dyn CacheConnector>) -> Self {
        Self::with_supervisor(ConnectionSupervisor::new(connector))
    }

    pub fn with_supervisor(supervisor: ConnectionSupervisor) -> Self {
        Self {
            supervisor,
            empty_cart_bytes: Cart::default().to_bytes(),
        }
    }

    pub fn supervisor(&self) -> &ConnectionSupervisor {
        &self.supervisor
    }

    /// 프로세스 시작 시 한 번 호출하여 연결을 수립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConnectionFailed` - 재시도 소진 또는 스모크 테스트 실패.
    ///   호출자는 트래픽을 받기 전에 프로세스를 종료해야 합니다.
    pub async fn initialize(&self) -> AppResult<()> {
        self.supervisor
            .ensure_connected()
            .await
            .map(|_| ())
            .map_err(|failure| AppError::ConnectionFailed {
                attempts: failure.attempts,
                source: failure.cause,
            })
    }

    async fn connection(&self) -> AppResult<Arc<dyn CacheConnection>> {
        self.supervisor
            .ensure_connected()
            .await
            .map_err(|failure| AppError::StorageUnavailable(failure.cause))
    }

    /// 장바구니에 상품을 추가합니다.
    ///
    /// 레코드가 없으면 새로 만들고, 있으면 같은 상품의 수량을 더하거나 항목을 추가한 뒤
    /// 전체 레코드를 다시 쓰고 만료 시간을 60분으로 재설정합니다.
    pub async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> AppResult<()> {
        info!(
            "AddItem called with user_id={}, product_id={}, quantity={}",
            user_id, product_id, quantity
        );

        self.try_add_item(user_id, product_id, quantity)
            .await
            .inspect_err(|e| warn!("AddItem failed for user_id={}: {}", user_id, e))
    }

    async fn try_add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> AppResult<()> {
        let connection = self.connection().await?;

        let cart = match connection.hget(user_id, CART_FIELD_NAME).await? {
            None => Cart::with_item(user_id, product_id, quantity),
            Some(bytes) => {
                let mut cart = Cart::from_bytes(&bytes)?;
                cart.add_item(product_id, quantity);
                cart
            }
        };

        connection
            .hset_with_expiry(user_id, CART_FIELD_NAME, &cart.to_bytes(), CART_TTL)
            .await?;

        Ok(())
    }

    /// 사용자의 장바구니를 조회합니다.
    ///
    /// 기록이 없거나 만료된 경우 빈 장바구니를 반환합니다.
    pub async fn get_cart(&self, user_id: &str) -> AppResult<Cart> {
        info!("GetCart called with user_id={}", user_id);

        self.try_get_cart(user_id)
            .await
            .inspect_err(|e| warn!("GetCart failed for user_id={}: {}", user_id, e))
    }

    async fn try_get_cart(&self, user_id: &str) -> AppResult<Cart> {
        let connection = self.connection().await?;

        match connection.hget(user_id, CART_FIELD_NAME).await? {
            Some(bytes) => Ok(Cart::from_bytes(&bytes)?),
            None => Ok(Cart::default()),
        }
    }

    /// 장바구니를 빈 레코드로 덮어쓰고 만료 시간을 재설정합니다.
    pub async fn empty_cart(&self, user_id: &str) -> AppResult<()> {
        info!("EmptyCart called with user_id={}", user_id);

        self.try_empty_cart(user_id)
            .await
            .inspect_err(|e| warn!("EmptyCart failed for user_id={}: {}", user_id, e))
    }

    async fn try_empty_cart(&self, user_id: &str) -> AppResult<()> {
        let connection = self.connection().await?;

        connection
            .hset_with_expiry(user_id, CART_FIELD_NAME, &self.empty_cart_bytes, CART_TTL)
            .await?;

        Ok(())
    }

    /// 백엔드에 PING을 보내 도달 가능 여부를 반환합니다. 실패는 전파하지 않습니다.
    pub async fn is_alive(&self) -> bool {
        let Some(connection) = self.supervisor.current() else {
            return false;
        };

        match connection.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Liveness ping failed: {}", e);
                false
            }
        }
    }
}
