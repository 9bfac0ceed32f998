//! 장바구니 서비스 메인 애플리케이션
//!
//! Redis 장바구니 저장소를 초기화한 뒤 Actix-web 기반 HTTP 서버를 구동합니다.
//! 저장소 초기화에 실패하면 트래픽을 받기 전에 프로세스를 종료합니다.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use cart_service_backend::config::{CacheConfig, ServerConfig};
use cart_service_backend::repositories::carts::CartStore;
use cart_service_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 장바구니 서비스 시작중...");

    let cart_store = initialize_cart_store().await;

    info!("✅ Initialization completed");

    start_http_server(cart_store).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(cart_store: Arc<CartStore>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Cart API: http://{}/api/v1/carts", bind_address);

    let store_data = web::Data::from(cart_store);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 eprintln으로 남김
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] env 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=cart_service_backend::caching=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 장바구니 저장소를 만들고 Redis 연결을 수립합니다
///
/// `REDIS_ADDR`이 없거나 연결 수립(재시도 소진, 스모크 테스트 실패)에 실패하면
/// 상태 코드 1로 종료합니다.
async fn initialize_cart_store() -> Arc<CartStore> {
    let redis_addr = match CacheConfig::redis_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    info!("📡 Redis 연결 중: {}", redis_addr);

    let cart_store = match CartStore::new(&redis_addr) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ 장바구니 저장소 생성 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cart_store.initialize().await {
        error!("❌ {}", e);
        std::process::exit(1);
    }

    info!("✅ Redis 연결 성공");

    Arc::new(cart_store)
}
