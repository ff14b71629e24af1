//! # Collection Management HTTP Handlers
//!
//! 컬렉션 생성/삭제와 시드 데이터 생성을 처리하는 핸들러입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/collections` | 컬렉션 목록 | 200 OK |
//! | `POST` | `/collections` | 컬렉션/인덱스 생성 | 200 OK |
//! | `DELETE` | `/collections` | 전체 삭제 (확인 문구 필요) | 200 OK |
//! | `POST` | `/seed` | 시드 데이터 생성 | 201 Created |

use actix_web::{delete, get, post, web, HttpResponse};
use log::info;
use validator::Validate;
use crate::domain::dto::collections::{CollectionListResponse, DropCollectionsRequest, SeedRequest};
use crate::errors::AppError;
use crate::services::{CollectionService, SeedService};
use crate::store::DocumentStore;

/// 컬렉션 목록 조회 핸들러
#[get("/collections")]
pub async fn list_collections(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    let service = CollectionService::new(store.into_inner());
    let collections = service.list().await?;

    Ok(HttpResponse::Ok().json(CollectionListResponse { collections }))
}

/// 컬렉션 생성 핸들러
///
/// 없는 컬렉션만 만들고 기본 인덱스를 보장합니다. 여러 번 호출해도 안전합니다.
///
/// ## 성공 (200 OK)
/// ```json
/// {
///   "created": ["Users", "Projects"],
///   "existing": ["Categories"],
///   "indexes": ["Freelancers.email_1", "Clients.email_1"]
/// }
/// ```
#[post("/collections")]
pub async fn provision_collections(
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    let service = CollectionService::new(store.into_inner());
    let report = service.provision().await?;

    info!(
        "컬렉션 프로비저닝: 생성 {}개, 기존 {}개",
        report.created.len(),
        report.existing.len()
    );
    Ok(HttpResponse::Ok().json(report))
}

/// 전체 컬렉션 삭제 핸들러
///
/// 요청 본문의 `confirmation`이 `delete_collections`가 아니면 400을 반환하고
/// 아무것도 삭제하지 않습니다.
///
/// ```bash
/// curl -X DELETE http://localhost:8080/api/v1/collections \
///   -H "Content-Type: application/json" \
///   -d '{"confirmation":"delete_collections"}'
/// ```
#[delete("/collections")]
pub async fn drop_collections(
    store: web::Data<dyn DocumentStore>,
    payload: web::Json<DropCollectionsRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = CollectionService::new(store.into_inner());
    let report = service.drop_all(&payload.confirmation).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// 시드 데이터 생성 핸들러
///
/// ## 요청
/// ```json
/// { "count": 20, "seed": 42 }
/// ```
///
/// ## 성공 (201 Created)
/// ```json
/// { "counts": { "Admins": 20, "Categories": 20, "Clients": 20 } }
/// ```
#[post("/seed")]
pub async fn seed_collections(
    store: web::Data<dyn DocumentStore>,
    payload: web::Json<SeedRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = SeedService::new(store.into_inner());
    let report = service.seed(&payload).await?;

    Ok(HttpResponse::Created().json(report))
}
