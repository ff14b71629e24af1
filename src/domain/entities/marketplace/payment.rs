//! Payment Entity
//!
//! 모든 필드가 필수입니다. 별도의 수정 시각이 없으며 `timestamp`는
//! 상태가 바뀔 때만 갱신됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::info;
use crate::domain::entities::fields::{decode, object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::errors::AppResult;
use crate::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub project_id: ObjectId,
    pub client_id: ObjectId,
    pub freelancer_id: ObjectId,
    pub amount: f64,
    pub payment_status: String,
    pub timestamp: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentField {
    ProjectId(ObjectId),
    ClientId(ObjectId),
    FreelancerId(ObjectId),
    Amount(f64),
    PaymentStatus(String),
}

impl FieldUpdate for PaymentField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "projectId" => PaymentField::ProjectId(object_id(key, value)?),
            "clientId" => PaymentField::ClientId(object_id(key, value)?),
            "freelancerId" => PaymentField::FreelancerId(object_id(key, value)?),
            "amount" => PaymentField::Amount(decode(key, value)?),
            "paymentStatus" => PaymentField::PaymentStatus(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Payment {
    pub const PENDING: &'static str = "Pending";
    pub const COMPLETED: &'static str = "Completed";
    pub const FAILED: &'static str = "Failed";

    /// `Pending` 상태의 결제를 만듭니다.
    pub fn new(project_id: ObjectId, client_id: ObjectId, freelancer_id: ObjectId, amount: f64) -> Self {
        Self {
            id: None,
            project_id,
            client_id,
            freelancer_id,
            amount,
            payment_status: Self::PENDING.to_string(),
            timestamp: DateTime::now(),
        }
    }

    /// 결제 상태와 시각을 갱신하고 저장합니다.
    pub async fn update_status(
        &mut self,
        store: &dyn DocumentStore,
        status: impl Into<String> + Send,
    ) -> AppResult<()> {
        self.payment_status = status.into();
        self.timestamp = DateTime::now();
        self.persist(store).await?;

        info!("결제 {:?} 상태 변경: {}", self.id, self.payment_status);
        Ok(())
    }
}

impl Entity for Payment {
    const COLLECTION: Collection = Collection::Payments;
    const KIND: &'static str = "Payment";

    type Field = PaymentField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, _now: DateTime) {}

    fn apply_field(&mut self, field: PaymentField) {
        match field {
            PaymentField::ProjectId(id) => self.project_id = id,
            PaymentField::ClientId(id) => self.client_id = id,
            PaymentField::FreelancerId(id) => self.freelancer_id = id,
            PaymentField::Amount(amount) => self.amount = amount,
            PaymentField::PaymentStatus(status) => self.payment_status = status,
        }
    }
}
