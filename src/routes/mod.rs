//! API 라우트 설정 모듈
//!
//! 관리 API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 모든 엔드포인트는 `/api/v1` 아래에 있으며 헬스체크만 루트에 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::from(store))
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(configure_collection_routes)
            .configure(configure_marketplace_routes),
    );
}

/// 컬렉션 관리 라우트
///
/// - `GET/POST/DELETE /api/v1/collections`
/// - `POST /api/v1/seed`
/// - `GET /api/v1/collections/{name}/records`
/// - `GET/PATCH/DELETE /api/v1/collections/{name}/records/{id}`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/seed \
///   -H "Content-Type: application/json" \
///   -d '{"count":10}'
/// ```
fn configure_collection_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::collections::list_collections)
        .service(handlers::collections::provision_collections)
        .service(handlers::collections::drop_collections)
        .service(handlers::collections::seed_collections)
        .service(handlers::records::list_records)
        .service(handlers::records::get_record)
        .service(handlers::records::patch_record)
        .service(handlers::records::delete_record);
}

/// 애그리거트 연산 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/projects/65a1.../bids \
///   -H "Content-Type: application/json" \
///   -d '{"freelancer_id":"65a2...","amount":900.0,"message":"Ready"}'
/// ```
fn configure_marketplace_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::marketplace::add_bid)
        .service(handlers::marketplace::update_project_status)
        .service(handlers::marketplace::add_review)
        .service(handlers::marketplace::post_message)
        .service(handlers::marketplace::add_reply)
        .service(handlers::marketplace::forward_message)
        .service(handlers::marketplace::mark_notification_read)
        .service(handlers::marketplace::update_payment_status)
        .service(handlers::marketplace::rename_category);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "freelancer_management",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00+00:00"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
