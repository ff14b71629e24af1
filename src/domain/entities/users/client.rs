//! Client Entity
//!
//! 프로젝트를 발주하는 클라이언트 프로필입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::domain::entities::fields::{decode, object_ids, optional_object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::domain::models::GivenReview;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub user: Option<ObjectId>,
    #[serde(default)]
    pub email: Option<String>,
    /// 고용한 프리랜서 ID
    #[serde(default)]
    pub hired_freelancers: Vec<ObjectId>,
    #[serde(default)]
    pub reviews_given: Vec<GivenReview>,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientField {
    User(Option<ObjectId>),
    Email(Option<String>),
    HiredFreelancers(Vec<ObjectId>),
    ReviewsGiven(Vec<GivenReview>),
}

impl FieldUpdate for ClientField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "user" => ClientField::User(optional_object_id(key, value)?),
            "email" => ClientField::Email(decode(key, value)?),
            "hiredFreelancers" => ClientField::HiredFreelancers(object_ids(key, value)?),
            "reviewsGiven" => ClientField::ReviewsGiven(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Client {
    pub fn new(user: Option<ObjectId>, email: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user,
            email,
            hired_freelancers: Vec::new(),
            reviews_given: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Client {
    const COLLECTION: Collection = Collection::Clients;
    const KIND: &'static str = "Client";

    type Field = ClientField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn apply_field(&mut self, field: ClientField) {
        match field {
            ClientField::User(user) => self.user = user,
            ClientField::Email(email) => self.email = email,
            ClientField::HiredFreelancers(ids) => self.hired_freelancers = ids,
            ClientField::ReviewsGiven(reviews) => self.reviews_given = reviews,
        }
    }
}
