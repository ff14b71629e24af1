//! Project Aggregate
//!
//! 프로젝트는 입찰(`Bid`), 상태(`Status`), 리뷰(`ProjectReviews`)를 소유합니다.
//! 포함된 값은 프로젝트 메서드를 통해서만 바뀌며, 변경 후에는 문서 전체가 다시 저장됩니다.
//!
//! ```rust,ignore
//! let mut project = Project::new("Landing page", "Marketing site", client_id, 1200.0);
//! project.persist(&store).await?;
//! project.add_bid(&store, freelancer_id, 900.0, "Can start Monday").await?;
//! project.update_status(&store, Status::IN_PROGRESS).await?;
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::info;
use crate::domain::entities::fields::{decode, object_id, optional_object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::domain::models::{AnyTransition, Bid, ProjectReviews, Review, ReviewKind, Status, StatusTransitions};
use crate::errors::{AppError, AppResult};
use crate::store::DocumentStore;

/// 프로젝트 애그리거트
///
/// `freelancer_id`는 입찰 수락 후 설정되는 것이 의도이지만 강제하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub client_id: ObjectId,
    #[serde(default)]
    pub freelancer_id: Option<ObjectId>,
    pub budget: f64,
    #[serde(default)]
    bids: Vec<Bid>,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    reviews: ProjectReviews,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// [`Project`]의 설정 가능한 필드. 입찰, 상태, 리뷰는 전용 메서드로만 바뀝니다.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectField {
    Title(String),
    Description(String),
    ClientId(ObjectId),
    FreelancerId(Option<ObjectId>),
    Budget(f64),
}

impl FieldUpdate for ProjectField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "title" => ProjectField::Title(decode(key, value)?),
            "description" => ProjectField::Description(decode(key, value)?),
            "clientId" => ProjectField::ClientId(object_id(key, value)?),
            "freelancerId" => ProjectField::FreelancerId(optional_object_id(key, value)?),
            "budget" => ProjectField::Budget(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Project {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        client_id: ObjectId,
        budget: f64,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            client_id,
            freelancer_id: None,
            budget,
            bids: Vec::new(),
            status: Status::open(),
            reviews: ProjectReviews::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 기존 값 객체로 프로젝트를 구성합니다. 시드 데이터 생성에 사용됩니다.
    pub fn with_embedded(mut self, bids: Vec<Bid>, status: Status, reviews: ProjectReviews) -> Self {
        self.bids = bids;
        self.status = status;
        self.reviews = reviews;
        self
    }

    /// 입찰 목록 (추가 순서)
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn reviews(&self) -> &ProjectReviews {
        &self.reviews
    }

    /// 입찰을 추가하고 프로젝트를 저장합니다.
    ///
    /// 같은 프리랜서의 중복 입찰이나 입찰 수 제한은 없습니다.
    pub async fn add_bid(
        &mut self,
        store: &dyn DocumentStore,
        freelancer_id: ObjectId,
        amount: f64,
        message: impl Into<String> + Send,
    ) -> AppResult<()> {
        self.bids.push(Bid::new(freelancer_id, amount, message));
        self.persist(store).await?;

        info!("프로젝트 {:?}에 입찰 추가 (총 {}건)", self.id, self.bids.len());
        Ok(())
    }

    /// 상태를 교체하고 저장합니다. 모든 값과 전이를 허용합니다.
    pub async fn update_status(
        &mut self,
        store: &dyn DocumentStore,
        kind: impl Into<String> + Send,
    ) -> AppResult<()> {
        self.update_status_with(store, kind, &AnyTransition).await
    }

    /// 전이 정책을 거쳐 상태를 교체하고 저장합니다.
    ///
    /// 정책이 거부하면 `ValidationError`이며 아무것도 저장되지 않습니다.
    pub async fn update_status_with(
        &mut self,
        store: &dyn DocumentStore,
        kind: impl Into<String> + Send,
        policy: &dyn StatusTransitions,
    ) -> AppResult<()> {
        let kind = kind.into();

        if !policy.allows(&self.status.kind, &kind) {
            return Err(AppError::ValidationError(format!(
                "상태를 {}에서 {}(으)로 변경할 수 없습니다",
                self.status.kind, kind
            )));
        }

        self.status = Status::new(kind);
        self.persist(store).await?;
        Ok(())
    }

    /// 작성 주체의 리뷰를 설정하고 저장합니다. 이전 리뷰는 덮어씁니다.
    pub async fn add_review(
        &mut self,
        store: &dyn DocumentStore,
        kind: ReviewKind,
        rating: i32,
        comment: impl Into<String> + Send,
    ) -> AppResult<()> {
        self.reviews.set(kind, Review::new(rating, comment));
        self.persist(store).await?;
        Ok(())
    }

    /// 프로젝트를 포함된 입찰, 상태, 리뷰와 함께 삭제합니다.
    pub async fn delete(&mut self, store: &dyn DocumentStore) -> AppResult<bool> {
        self.remove(store).await
    }
}

impl Entity for Project {
    const COLLECTION: Collection = Collection::Projects;
    const KIND: &'static str = "Project";

    type Field = ProjectField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn apply_field(&mut self, field: ProjectField) {
        match field {
            ProjectField::Title(title) => self.title = title,
            ProjectField::Description(description) => self.description = description,
            ProjectField::ClientId(client_id) => self.client_id = client_id,
            ProjectField::FreelancerId(freelancer_id) => self.freelancer_id = freelancer_id,
            ProjectField::Budget(budget) => self.budget = budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::StoreError;
    use mongodb::bson::doc;
    use serde_json::json;

    fn sample() -> Project {
        Project::new("Landing page", "Marketing site", ObjectId::new(), 1200.0)
    }

    struct ForwardOnly;

    impl StatusTransitions for ForwardOnly {
        fn allows(&self, from: &str, to: &str) -> bool {
            !(from == Status::COMPLETED && to == Status::OPEN)
        }
    }

    #[test]
    fn test_document_round_trip_with_embedded_values() {
        let mut project = sample().with_embedded(
            vec![Bid::new(ObjectId::new(), 900.0, "Can start Monday")],
            Status::new(Status::IN_PROGRESS),
            ProjectReviews {
                client_review: Some(Review::new(5, "Excellent")),
                freelancer_review: None,
            },
        );
        project.id = Some(ObjectId::new());
        project.freelancer_id = Some(ObjectId::new());

        let restored = Project::from_document(project.to_document().unwrap()).unwrap();
        assert_eq!(restored, project);
    }

    #[test]
    fn test_optional_embedded_values_default_on_load() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Logo",
            "description": "Vector logo",
            "clientId": ObjectId::new(),
            "budget": 300.0,
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        };

        let project = Project::from_document(document).unwrap();

        assert!(project.bids().is_empty());
        assert_eq!(project.status().kind, Status::OPEN);
        assert_eq!(project.reviews(), &ProjectReviews::default());
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let mut document = sample().to_document().unwrap();
        document.remove("title");

        assert!(matches!(Project::from_document(document), Err(AppError::MalformedRecord(_))));
    }

    #[actix_web::test]
    async fn test_persist_then_load_returns_equal_project() {
        let store = MemoryStore::new();
        let mut project = sample();
        let id = project.persist(&store).await.unwrap();

        let loaded = Project::load_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(loaded, project);
    }

    #[actix_web::test]
    async fn test_persist_twice_changes_only_update_stamp() {
        let store = MemoryStore::new();
        let mut project = sample();
        let id = project.persist(&store).await.unwrap();
        let first = Project::load_by_id(&store, id).await.unwrap().unwrap();

        project.persist(&store).await.unwrap();
        let mut second = Project::load_by_id(&store, id).await.unwrap().unwrap();

        assert!(second.updated_at >= first.updated_at);
        second.updated_at = first.updated_at;
        assert_eq!(second, first);
        assert_eq!(store.count("Projects"), 1);
    }

    #[actix_web::test]
    async fn test_add_bid_keeps_order_and_dates() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();

        let freelancer = ObjectId::new();
        for amount in [100.0, 200.0, 300.0] {
            project.add_bid(&store, freelancer, amount, "bid").await.unwrap();
        }
        let dates: Vec<DateTime> = project.bids().iter().map(|bid| bid.date).collect();

        let loaded = Project::load_by_id(&store, project.id.unwrap()).await.unwrap().unwrap();
        let amounts: Vec<f64> = loaded.bids().iter().map(|bid| bid.bid_amount).collect();
        let loaded_dates: Vec<DateTime> = loaded.bids().iter().map(|bid| bid.date).collect();

        assert_eq!(amounts, vec![100.0, 200.0, 300.0]);
        assert_eq!(loaded_dates, dates);
    }

    #[actix_web::test]
    async fn test_add_review_overwrites_same_kind() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();

        project.add_review(&store, ReviewKind::Client, 4, "good").await.unwrap();
        let first = project.reviews().client_review.clone().unwrap();
        assert_eq!(first.rating, 4);
        assert_eq!(first.comment, "good");

        project.add_review(&store, ReviewKind::Client, 2, "ok").await.unwrap();

        let loaded = Project::load_by_id(&store, project.id.unwrap()).await.unwrap().unwrap();
        let review = loaded.reviews().get(ReviewKind::Client).unwrap();
        assert_eq!(review.rating, 2);
        assert_eq!(review.comment, "ok");
        assert!(loaded.reviews().freelancer_review.is_none());
    }

    #[actix_web::test]
    async fn test_update_status_accepts_any_value() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();

        project.update_status(&store, Status::COMPLETED).await.unwrap();
        project.update_status(&store, "Archived").await.unwrap();

        let loaded = Project::load_by_id(&store, project.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.status().kind, "Archived");
    }

    #[actix_web::test]
    async fn test_refused_transition_writes_nothing() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();
        project.update_status(&store, Status::COMPLETED).await.unwrap();

        let result = project.update_status_with(&store, Status::OPEN, &ForwardOnly).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        let loaded = Project::load_by_id(&store, project.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.status().kind, Status::COMPLETED);
    }

    #[actix_web::test]
    async fn test_apply_mapping_ignores_unknown_and_embedded_keys() {
        let store = MemoryStore::new();
        let mut project = sample();
        let id = project.persist(&store).await.unwrap();
        let before = Project::load_by_id(&store, id).await.unwrap().unwrap();

        let mapping = json!({ "colour": "blue", "bids": [] , "status": "Completed" });
        project.apply_mapping(&store, mapping.as_object().unwrap().clone()).await.unwrap();

        let mut after = Project::load_by_id(&store, id).await.unwrap().unwrap();
        after.updated_at = before.updated_at;
        assert_eq!(after, before);
    }

    #[actix_web::test]
    async fn test_apply_mapping_rejects_wrong_types() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();

        let mapping = json!({ "budget": "a lot" });
        let result = project.apply_mapping(&store, mapping.as_object().unwrap().clone()).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_delete_removes_aggregate() {
        let store = MemoryStore::new();
        let mut project = sample();
        project.persist(&store).await.unwrap();
        project.add_bid(&store, ObjectId::new(), 50.0, "cheap").await.unwrap();
        let id = project.id.unwrap();

        assert!(project.delete(&store).await.unwrap());
        assert!(Project::load_by_id(&store, id).await.unwrap().is_none());
        assert_eq!(project.id, None);
    }

    #[actix_web::test]
    async fn test_store_failure_is_persistence_error() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let mut project = sample();

        let result = project.add_bid(&store, ObjectId::new(), 10.0, "bid").await;

        assert!(matches!(
            result,
            Err(AppError::PersistenceError(StoreError::Unavailable(_)))
        ));
        assert_eq!(project.id, None);
    }
}
