//! API 라우트 설정 모듈
//!
//! 장바구니 API와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::from(cart_store))
//!     .configure(configure_all_routes)
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::handlers;
use crate::repositories::carts::CartStore;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_cart_routes(cfg);
}

fn configure_cart_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/carts")
            .service(handlers::carts::add_item)
            .service(handlers::carts::get_cart)
            .service(handlers::carts::empty_cart)
    );
}

/// 캐시 백엔드 생존 여부를 보고합니다. 도달할 수 없으면 503.
#[get("/health")]
async fn health_check(store: web::Data<CartStore>) -> HttpResponse {
    let alive = store.is_alive().await;

    let body = json!({
        "status": if alive { "healthy" } else { "unhealthy" },
        "service": "cart_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "cache": {
            "backend": "Redis",
            "ready": store.supervisor().is_ready(),
            "alive": alive
        }
    });

    if alive {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;
    use crate::caching::memory::InMemoryConnector;

    #[actix_web::test]
    async fn test_health_reports_unhealthy_before_connect() {
        let connector = InMemoryConnector::new();
        let store = web::Data::new(CartStore::with_connector(Arc::new(connector.clone())));
        let app = test::init_service(App::new().app_data(store).configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_health_reports_healthy_when_connected() {
        let connector = InMemoryConnector::new();
        let store = web::Data::new(CartStore::with_connector(Arc::new(connector.clone())));
        store.initialize().await.expect("initialize");
        let app = test::init_service(App::new().app_data(store).configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"]["ready"], true);
    }
}
