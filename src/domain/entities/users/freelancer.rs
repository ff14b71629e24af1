//! Freelancer Entity
//!
//! 프리랜서 프로필. 모든 필드가 선택적이며 누락 시 기본값으로 복원됩니다.
//! `average_rating`은 `reviews`로부터 다시 계산되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::domain::entities::fields::{decode, optional_object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::domain::models::{FreelancerReview, PortfolioItem, ServiceOffering};
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freelancer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 연결된 `Users` 문서
    #[serde(default)]
    pub user: Option<ObjectId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default)]
    pub reviews: Vec<FreelancerReview>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FreelancerField {
    User(Option<ObjectId>),
    Email(Option<String>),
    Skills(Vec<String>),
    Services(Vec<ServiceOffering>),
    Portfolio(Vec<PortfolioItem>),
    Reviews(Vec<FreelancerReview>),
    AverageRating(Option<f64>),
}

impl FieldUpdate for FreelancerField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "user" => FreelancerField::User(optional_object_id(key, value)?),
            "email" => FreelancerField::Email(decode(key, value)?),
            "skills" => FreelancerField::Skills(decode(key, value)?),
            "services" => FreelancerField::Services(decode(key, value)?),
            "portfolio" => FreelancerField::Portfolio(decode(key, value)?),
            "reviews" => FreelancerField::Reviews(decode(key, value)?),
            "averageRating" => FreelancerField::AverageRating(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Freelancer {
    pub fn new(user: Option<ObjectId>, email: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user,
            email,
            skills: Vec::new(),
            services: Vec::new(),
            portfolio: Vec::new(),
            reviews: Vec::new(),
            average_rating: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Freelancer {
    const COLLECTION: Collection = Collection::Freelancers;
    const KIND: &'static str = "Freelancer";

    type Field = FreelancerField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn apply_field(&mut self, field: FreelancerField) {
        match field {
            FreelancerField::User(user) => self.user = user,
            FreelancerField::Email(email) => self.email = email,
            FreelancerField::Skills(skills) => self.skills = skills,
            FreelancerField::Services(services) => self.services = services,
            FreelancerField::Portfolio(portfolio) => self.portfolio = portfolio,
            FreelancerField::Reviews(reviews) => self.reviews = reviews,
            FreelancerField::AverageRating(rating) => self.average_rating = rating,
        }
    }
}
