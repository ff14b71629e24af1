//! 프리랜서 마켓플레이스 관리 서비스 메인 애플리케이션
//!
//! MongoDB에 연결하고 컬렉션 상태를 점검한 뒤 Actix-web 기반 관리 API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use freelancer_management::config::{DatabaseConfig, RateLimitConfig, ServerConfig};
use freelancer_management::db::Database;
use freelancer_management::domain::entities::Collection;
use freelancer_management::routes::configure_all_routes;
use freelancer_management::services::CollectionService;
use freelancer_management::store::DocumentStore;
use freelancer_management::utils::display_terminal::{
    print_boxed_title, print_step_complete, print_step_start, print_sub_task,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 프리랜서 관리 서비스 시작중...");
    print_boxed_title("Freelancer Management");

    let store = initialize_store().await?;
    check_collections(Arc::clone(&store)).await;

    // HTTP 서버 시작
    start_http_server(store).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(store: Arc<dyn DocumentStore>) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let Some(governor_conf) = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
    else {
        error!("Rate Limiting 설정이 올바르지 않습니다: {:?}", rate_limit_config);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid rate limit configuration",
        ));
    };

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // 저장소 주입
            .app_data(web::Data::from(Arc::clone(&store)))

            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))

            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4) // 워커 스레드 수
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=freelancer_management::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB에 연결하고 저장소 핸들을 반환합니다
///
/// 연결 실패는 `ConnectionRefused` I/O 오류로 변환되어 프로세스가 종료됩니다.
async fn initialize_store() -> io::Result<Arc<dyn DocumentStore>> {
    print_step_start(1, "Connecting to MongoDB");

    let config = DatabaseConfig::from_env();
    let database = Database::new(&config).await.map_err(|e| {
        error!("데이터베이스 연결 실패 ({}): {}", config.database_name, e);
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    print_sub_task("Database", &config.database_name);
    print_step_complete(1, "Connected to MongoDB", 1);

    Ok(Arc::new(database))
}

/// 관리 대상 컬렉션의 존재 여부를 출력합니다
///
/// 없는 컬렉션은 만들지 않습니다. `POST /api/v1/collections`로 생성합니다.
async fn check_collections(store: Arc<dyn DocumentStore>) {
    print_step_start(2, "Checking collections");

    let present = match CollectionService::new(store).list().await {
        Ok(names) => names,
        Err(e) => {
            warn!("컬렉션 목록을 확인할 수 없습니다: {}", e);
            return;
        }
    };

    let mut missing = 0;
    for collection in Collection::ALL {
        if present.iter().any(|name| name == collection.name()) {
            print_sub_task(collection.name(), "present");
        } else {
            missing += 1;
            print_sub_task(collection.name(), "missing");
        }
    }

    if missing > 0 {
        warn!("컬렉션 {}개가 없습니다. POST /api/v1/collections로 생성하세요", missing);
    }
    print_step_complete(2, "Collections checked", Collection::ALL.len());
}

/// CORS 설정을 구성합니다
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 관리 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")

        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
