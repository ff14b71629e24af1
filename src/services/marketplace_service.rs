//! 마켓플레이스 애그리거트 연산 서비스
//!
//! 저장된 엔티티를 ID로 불러와 애그리거트 메서드(`add_bid`, `add_reply` 등)를
//! 호출하고, 변경된 엔티티를 반환합니다. 각 연산은 불러오기와 전체 문서 저장의
//! 두 단계이며 동시 수정은 마지막 저장이 이깁니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::domain::dto::marketplace::{
    AddBidRequest, AddReplyRequest, AddReviewRequest, ForwardMessageRequest, PostMessageRequest,
    RenameCategoryRequest, UpdateStatusRequest,
};
use crate::domain::entities::{Category, Message, Notification, Payment, Project};
use crate::errors::AppResult;
use crate::services::collection_service::load_required;
use crate::store::DocumentStore;
use crate::utils::string_utils::parse_object_id;

/// 마켓플레이스 연산 서비스
///
/// ## 주요 책임
///
/// - **프로젝트**: 입찰 추가, 상태 변경, 리뷰 작성
/// - **대화**: 일반 메시지, 답장, 전달
/// - **알림/결제/카테고리**: 읽음 처리, 결제 상태 변경, 이름 변경
///
/// 대상이 없으면 `NotFound`, 요청의 ID 형식이 잘못되면 `ValidationError`입니다.
pub struct MarketplaceService {
    store: Arc<dyn DocumentStore>,
}

impl MarketplaceService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub async fn add_bid(&self, project_id: ObjectId, request: AddBidRequest) -> AppResult<Project> {
        let freelancer_id = parse_object_id(&request.freelancer_id)?;
        let mut project: Project = load_required(self.store(), project_id).await?;

        project
            .add_bid(self.store(), freelancer_id, request.amount, request.message)
            .await?;
        Ok(project)
    }

    pub async fn update_project_status(
        &self,
        project_id: ObjectId,
        request: UpdateStatusRequest,
    ) -> AppResult<Project> {
        let mut project: Project = load_required(self.store(), project_id).await?;

        project
            .update_status(self.store(), request.status.trim().to_string())
            .await?;
        Ok(project)
    }

    /// 같은 주체의 기존 리뷰는 덮어씁니다.
    pub async fn add_review(&self, project_id: ObjectId, request: AddReviewRequest) -> AppResult<Project> {
        let mut project: Project = load_required(self.store(), project_id).await?;

        project
            .add_review(self.store(), request.kind, request.rating, request.comment)
            .await?;
        Ok(project)
    }

    pub async fn post_message(&self, message_id: ObjectId, request: PostMessageRequest) -> AppResult<Message> {
        let sender_id = parse_object_id(&request.sender_id)?;
        let mut message: Message = load_required(self.store(), message_id).await?;

        message
            .post_message(self.store(), sender_id, request.content)
            .await?;
        Ok(message)
    }

    pub async fn add_reply(&self, message_id: ObjectId, request: AddReplyRequest) -> AppResult<Message> {
        let replied_to = parse_object_id(&request.replied_to_message_id)?;
        let sender_id = parse_object_id(&request.sender_id)?;
        let mut message: Message = load_required(self.store(), message_id).await?;

        message
            .add_reply(self.store(), replied_to, request.content, sender_id)
            .await?;
        Ok(message)
    }

    pub async fn forward_message(
        &self,
        message_id: ObjectId,
        request: ForwardMessageRequest,
    ) -> AppResult<Message> {
        let forwarded = parse_object_id(&request.message_id)?;
        let mut message: Message = load_required(self.store(), message_id).await?;

        message.forward_message(self.store(), forwarded).await?;
        Ok(message)
    }

    pub async fn mark_notification_read(&self, notification_id: ObjectId) -> AppResult<Notification> {
        let mut notification: Notification = load_required(self.store(), notification_id).await?;

        notification.mark_as_read(self.store()).await?;
        Ok(notification)
    }

    pub async fn update_payment_status(
        &self,
        payment_id: ObjectId,
        request: UpdateStatusRequest,
    ) -> AppResult<Payment> {
        let mut payment: Payment = load_required(self.store(), payment_id).await?;

        payment
            .update_status(self.store(), request.status.trim().to_string())
            .await?;
        Ok(payment)
    }

    pub async fn rename_category(
        &self,
        category_id: ObjectId,
        request: RenameCategoryRequest,
    ) -> AppResult<Category> {
        let mut category: Category = load_required(self.store(), category_id).await?;

        category.rename(self.store(), &request.name).await?;
        Ok(category)
    }
}
