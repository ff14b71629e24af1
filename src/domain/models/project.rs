//! 프로젝트 문서에 포함되는 값 객체
//!
//! `Bid`, `Status`, `Review`는 독립된 ID나 컬렉션이 없고
//! [`crate::domain::entities::Project`] 문서의 일부로만 저장됩니다.

use std::str::FromStr;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;

/// 프리랜서 입찰
///
/// `bid_amount`는 엔티티 계층에서 검증하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub freelancer_id: ObjectId,
    pub bid_amount: f64,
    pub message: String,
    pub date: DateTime,
}

impl Bid {
    pub fn new(freelancer_id: ObjectId, bid_amount: f64, message: impl Into<String>) -> Self {
        Self {
            freelancer_id,
            bid_amount,
            message: message.into(),
            date: DateTime::now(),
        }
    }
}

/// 프로젝트 상태
///
/// `kind`는 자유 문자열입니다. 잘 알려진 값은 연관 상수로 제공됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(rename = "type")]
    pub kind: String,
    pub last_updated: DateTime,
}

impl Status {
    pub const OPEN: &'static str = "Open";
    pub const IN_PROGRESS: &'static str = "InProgress";
    pub const COMPLETED: &'static str = "Completed";
    pub const CANCELLED: &'static str = "Cancelled";

    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            last_updated: DateTime::now(),
        }
    }

    pub fn open() -> Self {
        Self::new(Self::OPEN)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::open()
    }
}

/// 프로젝트 리뷰. `rating`은 1-5를 기대하지만 검증하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: i32,
    pub comment: String,
    pub date: DateTime,
}

impl Review {
    pub fn new(rating: i32, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
            date: DateTime::now(),
        }
    }
}

/// 리뷰 작성 주체
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Client,
    Freelancer,
}

impl FromStr for ReviewKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(ReviewKind::Client),
            "freelancer" => Ok(ReviewKind::Freelancer),
            other => Err(AppError::ValidationError(format!(
                "리뷰 종류는 client 또는 freelancer여야 합니다: {}",
                other
            ))),
        }
    }
}

/// 작성 주체별 최신 리뷰. 같은 주체의 새 리뷰는 이전 리뷰를 덮어씁니다.
///
/// 리뷰가 없는 주체도 `null` 값으로 저장됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReviews {
    #[serde(default)]
    pub client_review: Option<Review>,
    #[serde(default)]
    pub freelancer_review: Option<Review>,
}

impl ProjectReviews {
    pub fn get(&self, kind: ReviewKind) -> Option<&Review> {
        match kind {
            ReviewKind::Client => self.client_review.as_ref(),
            ReviewKind::Freelancer => self.freelancer_review.as_ref(),
        }
    }

    pub fn set(&mut self, kind: ReviewKind, review: Review) {
        match kind {
            ReviewKind::Client => self.client_review = Some(review),
            ReviewKind::Freelancer => self.freelancer_review = Some(review),
        }
    }
}

/// 상태 전이 정책
///
/// `Project::update_status_with`에 전달되어 전이 허용 여부를 결정합니다.
pub trait StatusTransitions: Send + Sync {
    fn allows(&self, from: &str, to: &str) -> bool;
}

/// 모든 전이를 허용하는 기본 정책
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyTransition;

impl StatusTransitions for AnyTransition {
    fn allows(&self, _from: &str, _to: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, to_document};

    #[test]
    fn test_status_persists_type_key() {
        let status = Status::new(Status::IN_PROGRESS);
        let document = to_document(&status).unwrap();

        assert_eq!(document.get_str("type").unwrap(), "InProgress");
        assert!(document.get_datetime("lastUpdated").is_ok());
    }

    #[test]
    fn test_review_kind_parsing() {
        assert_eq!("client".parse::<ReviewKind>().unwrap(), ReviewKind::Client);
        assert_eq!(" Freelancer ".parse::<ReviewKind>().unwrap(), ReviewKind::Freelancer);
        assert!(matches!("admin".parse::<ReviewKind>(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_project_reviews_store_missing_kinds_as_null() {
        let mut reviews = ProjectReviews::default();
        assert_eq!(
            to_document(&reviews).unwrap(),
            doc! { "clientReview": null, "freelancerReview": null }
        );

        reviews.set(ReviewKind::Client, Review::new(4, "good"));
        let document = to_document(&reviews).unwrap();

        assert!(document.get_document("clientReview").is_ok());
        assert!(document.is_null("freelancerReview"));
        assert_eq!(reviews.get(ReviewKind::Client).unwrap().rating, 4);
    }

    #[test]
    fn test_project_reviews_accept_null_and_missing_keys() {
        let from_null: ProjectReviews =
            from_document(doc! { "clientReview": null, "freelancerReview": null }).unwrap();
        let from_empty: ProjectReviews = from_document(doc! {}).unwrap();

        assert_eq!(from_null, ProjectReviews::default());
        assert_eq!(from_empty, ProjectReviews::default());
    }

    #[test]
    fn test_any_transition_allows_everything() {
        assert!(AnyTransition.allows(Status::COMPLETED, Status::OPEN));
        assert!(AnyTransition.allows("Open", "Archived"));
    }
}
