//! Admin Entity

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::domain::entities::fields::{decode, optional_object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::errors::AppResult;

/// 관리자 계정. `role`은 "Super Admin", "Admin", "Moderator" 등 자유 문자열입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub user: Option<ObjectId>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminField {
    User(Option<ObjectId>),
    Role(Option<String>),
}

impl FieldUpdate for AdminField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "user" => AdminField::User(optional_object_id(key, value)?),
            "role" => AdminField::Role(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Admin {
    pub fn new(user: Option<ObjectId>, role: Option<String>) -> Self {
        let now = DateTime::now();
        Self { id: None, user, role, created_at: now, updated_at: now }
    }
}

impl Entity for Admin {
    const COLLECTION: Collection = Collection::Admins;
    const KIND: &'static str = "Admin";

    type Field = AdminField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn apply_field(&mut self, field: AdminField) {
        match field {
            AdminField::User(user) => self.user = user,
            AdminField::Role(role) => self.role = role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_document_round_trip() {
        let mut admin = Admin::new(Some(ObjectId::new()), Some("Moderator".to_string()));
        admin.id = Some(ObjectId::new());

        let restored = Admin::from_document(admin.to_document().unwrap()).unwrap();
        assert_eq!(restored, admin);
    }

    #[actix_web::test]
    async fn test_remove_then_load_is_absent() {
        let store = MemoryStore::new();
        let mut admin = Admin::new(None, Some("Admin".to_string()));
        let id = admin.persist(&store).await.unwrap();

        assert!(admin.remove(&store).await.unwrap());
        assert_eq!(admin.id, None);
        assert!(Admin::load_by_id(&store, id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_remove_without_id_is_noop() {
        let store = MemoryStore::new();
        let mut admin = Admin::new(None, None);

        assert!(!admin.remove(&store).await.unwrap());
    }

    #[actix_web::test]
    async fn test_role_can_be_cleared() {
        let store = MemoryStore::new();
        let mut admin = Admin::new(None, Some("Admin".to_string()));
        admin.persist(&store).await.unwrap();

        admin.apply_fields(&store, vec![AdminField::Role(None)]).await.unwrap();

        let loaded = Admin::load_by_id(&store, admin.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.role, None);
    }
}
