//! # Record HTTP Handlers
//!
//! 컬렉션 이름으로 엔티티 타입을 골라 레코드를 조회/수정/삭제합니다.
//! 알 수 없는 컬렉션 이름은 404, 잘못된 ID 형식은 400입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/collections/{name}/records?limit=` | 문서 목록 |
//! | `GET` | `/collections/{name}/records/{id}` | 레코드 조회 |
//! | `PATCH` | `/collections/{name}/records/{id}` | 필드 수정 |
//! | `DELETE` | `/collections/{name}/records/{id}` | 레코드 삭제 |

use actix_web::{delete, get, patch, web, HttpResponse};
use serde_json::{Map, Value};
use validator::Validate;
use crate::domain::dto::collections::{DeleteResponse, RecordsQuery};
use crate::domain::entities::Collection;
use crate::errors::AppError;
use crate::services::CollectionService;
use crate::store::DocumentStore;
use crate::utils::string_utils::parse_object_id;

#[get("/collections/{name}/records")]
pub async fn list_records(
    store: web::Data<dyn DocumentStore>,
    name: web::Path<String>,
    query: web::Query<RecordsQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let collection: Collection = name.parse()?;
    let service = CollectionService::new(store.into_inner());
    let records = service.records(collection, query.limit).await?;

    Ok(HttpResponse::Ok().json(records))
}

#[get("/collections/{name}/records/{id}")]
pub async fn get_record(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (name, id) = path.into_inner();
    let collection: Collection = name.parse()?;
    let id = parse_object_id(&id)?;

    let service = CollectionService::new(store.into_inner());
    let record = service.get(collection, id).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// 레코드 필드 수정 핸들러
///
/// 본문은 저장 필드명(camelCase)을 키로 하는 JSON 객체입니다.
/// 알 수 없는 키는 무시되고, 타입이 맞지 않는 값은 400입니다.
///
/// ```bash
/// curl -X PATCH http://localhost:8080/api/v1/collections/Projects/records/65a1... \
///   -H "Content-Type: application/json" \
///   -d '{"title":"New title","budget":1500}'
/// ```
#[patch("/collections/{name}/records/{id}")]
pub async fn patch_record(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let (name, id) = path.into_inner();
    let collection: Collection = name.parse()?;
    let id = parse_object_id(&id)?;

    let service = CollectionService::new(store.into_inner());
    let record = service.patch(collection, id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(record))
}

#[delete("/collections/{name}/records/{id}")]
pub async fn delete_record(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (name, id) = path.into_inner();
    let collection: Collection = name.parse()?;
    let id = parse_object_id(&id)?;

    let service = CollectionService::new(store.into_inner());
    let deleted = service.delete(collection, id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse { deleted }))
}
