//! # Marketplace HTTP Handlers
//!
//! 프로젝트, 대화, 알림, 결제, 카테고리 애그리거트 연산을 처리합니다.
//! 모든 응답 본문은 변경된 레코드 전체(일반 JSON)입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/projects/{id}/bids` | 입찰 추가 | 201 |
//! | `PUT` | `/projects/{id}/status` | 상태 변경 | 200 |
//! | `POST` | `/projects/{id}/reviews` | 리뷰 작성 | 201 |
//! | `POST` | `/messages/{id}/messages` | 일반 메시지 | 201 |
//! | `POST` | `/messages/{id}/replies` | 답장 | 201 |
//! | `POST` | `/messages/{id}/forwards` | 전달 | 201 |
//! | `POST` | `/notifications/{id}/read` | 읽음 처리 | 200 |
//! | `PUT` | `/payments/{id}/status` | 결제 상태 변경 | 200 |
//! | `PUT` | `/categories/{id}` | 이름 변경 | 200 |

use actix_web::{post, put, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::marketplace::{
    AddBidRequest, AddReplyRequest, AddReviewRequest, ForwardMessageRequest, PostMessageRequest,
    RenameCategoryRequest, UpdateStatusRequest,
};
use crate::domain::entities::Entity;
use crate::errors::AppError;
use crate::services::MarketplaceService;
use crate::store::DocumentStore;
use crate::utils::string_utils::parse_object_id;

fn validated<T: Validate>(payload: web::Json<T>) -> Result<T, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    Ok(payload.into_inner())
}

/// 입찰 추가 핸들러
///
/// ```json
/// { "freelancer_id": "65a1...", "amount": 900.0, "message": "Can start Monday" }
/// ```
#[post("/projects/{id}/bids")]
pub async fn add_bid(
    store: web::Data<dyn DocumentStore>,
    project_id: web::Path<String>,
    payload: web::Json<AddBidRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let project_id = parse_object_id(&project_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let project = service.add_bid(project_id, request).await?;

    Ok(HttpResponse::Created().json(project.to_json()?))
}

/// 프로젝트 상태 변경 핸들러
///
/// 상태 값과 전이는 제한하지 않습니다.
#[put("/projects/{id}/status")]
pub async fn update_project_status(
    store: web::Data<dyn DocumentStore>,
    project_id: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let project_id = parse_object_id(&project_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let project = service.update_project_status(project_id, request).await?;

    Ok(HttpResponse::Ok().json(project.to_json()?))
}

/// 리뷰 작성 핸들러
///
/// ```json
/// { "kind": "client", "rating": 4, "comment": "Great work" }
/// ```
#[post("/projects/{id}/reviews")]
pub async fn add_review(
    store: web::Data<dyn DocumentStore>,
    project_id: web::Path<String>,
    payload: web::Json<AddReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let project_id = parse_object_id(&project_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let project = service.add_review(project_id, request).await?;

    Ok(HttpResponse::Created().json(project.to_json()?))
}

#[post("/messages/{id}/messages")]
pub async fn post_message(
    store: web::Data<dyn DocumentStore>,
    message_id: web::Path<String>,
    payload: web::Json<PostMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let message_id = parse_object_id(&message_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let message = service.post_message(message_id, request).await?;

    Ok(HttpResponse::Created().json(message.to_json()?))
}

#[post("/messages/{id}/replies")]
pub async fn add_reply(
    store: web::Data<dyn DocumentStore>,
    message_id: web::Path<String>,
    payload: web::Json<AddReplyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let message_id = parse_object_id(&message_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let message = service.add_reply(message_id, request).await?;

    Ok(HttpResponse::Created().json(message.to_json()?))
}

/// 메시지 전달 핸들러
///
/// 추가되는 이벤트의 `senderId`에는 전달된 메시지 ID가 들어갑니다.
#[post("/messages/{id}/forwards")]
pub async fn forward_message(
    store: web::Data<dyn DocumentStore>,
    message_id: web::Path<String>,
    payload: web::Json<ForwardMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let message_id = parse_object_id(&message_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let message = service.forward_message(message_id, request).await?;

    Ok(HttpResponse::Created().json(message.to_json()?))
}

#[post("/notifications/{id}/read")]
pub async fn mark_notification_read(
    store: web::Data<dyn DocumentStore>,
    notification_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let notification_id = parse_object_id(&notification_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let notification = service.mark_notification_read(notification_id).await?;

    Ok(HttpResponse::Ok().json(notification.to_json()?))
}

#[put("/payments/{id}/status")]
pub async fn update_payment_status(
    store: web::Data<dyn DocumentStore>,
    payment_id: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let payment_id = parse_object_id(&payment_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let payment = service.update_payment_status(payment_id, request).await?;

    Ok(HttpResponse::Ok().json(payment.to_json()?))
}

#[put("/categories/{id}")]
pub async fn rename_category(
    store: web::Data<dyn DocumentStore>,
    category_id: web::Path<String>,
    payload: web::Json<RenameCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let request = validated(payload)?;
    let category_id = parse_object_id(&category_id)?;

    let service = MarketplaceService::new(store.into_inner());
    let category = service.rename_category(category_id, request).await?;

    Ok(HttpResponse::Ok().json(category.to_json()?))
}
