//! Notification Entity

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::domain::entities::fields::{decode, optional_object_id, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::errors::AppResult;
use crate::store::DocumentStore;

/// 사용자 알림
///
/// 수정 시각이 없으며 `timestamp`는 생성 시각입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub user_id: Option<ObjectId>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "DateTime::now")]
    pub timestamp: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationField {
    UserId(Option<ObjectId>),
    Kind(String),
    Content(String),
    Link(Option<String>),
    Read(bool),
}

impl FieldUpdate for NotificationField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "userId" => NotificationField::UserId(optional_object_id(key, value)?),
            "type" => NotificationField::Kind(decode(key, value)?),
            "content" => NotificationField::Content(decode(key, value)?),
            "link" => NotificationField::Link(decode(key, value)?),
            "read" => NotificationField::Read(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Notification {
    pub fn new(user_id: Option<ObjectId>, kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            kind: kind.into(),
            content: content.into(),
            link: None,
            read: false,
            timestamp: DateTime::now(),
        }
    }

    /// 읽음으로 표시하고 저장합니다.
    pub async fn mark_as_read(&mut self, store: &dyn DocumentStore) -> AppResult<()> {
        self.read = true;
        self.persist(store).await?;
        Ok(())
    }
}

impl Entity for Notification {
    const COLLECTION: Collection = Collection::Notifications;
    const KIND: &'static str = "Notification";

    type Field = NotificationField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, _now: DateTime) {}

    fn apply_field(&mut self, field: NotificationField) {
        match field {
            NotificationField::UserId(user_id) => self.user_id = user_id,
            NotificationField::Kind(kind) => self.kind = kind,
            NotificationField::Content(content) => self.content = content,
            NotificationField::Link(link) => self.link = link,
            NotificationField::Read(read) => self.read = read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_document_round_trip() {
        let mut notification = Notification::new(Some(ObjectId::new()), "Info", "New bid received");
        notification.link = Some("/projects/1".to_string());
        notification.id = Some(ObjectId::new());

        let document = notification.to_document().unwrap();
        assert_eq!(document.get_str("type").unwrap(), "Info");

        let restored = Notification::from_document(document).unwrap();
        assert_eq!(restored, notification);
    }

    #[actix_web::test]
    async fn test_mark_as_read_persists() {
        let store = MemoryStore::new();
        let mut notification = Notification::new(None, "Info", "This is a notification.");
        let id = notification.persist(&store).await.unwrap();

        notification.mark_as_read(&store).await.unwrap();

        let loaded = Notification::load_by_id(&store, id).await.unwrap().unwrap();
        assert!(loaded.read);
        assert_eq!(loaded.timestamp, notification.timestamp);
    }

    #[actix_web::test]
    async fn test_unknown_key_leaves_record_unchanged() {
        let store = MemoryStore::new();
        let mut notification = Notification::new(None, "Info", "Hello");
        let id = notification.persist(&store).await.unwrap();
        let before = Notification::load_by_id(&store, id).await.unwrap().unwrap();

        let mapping = json!({ "priority": "high" });
        notification
            .apply_mapping(&store, mapping.as_object().unwrap().clone())
            .await
            .unwrap();

        let after = Notification::load_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(after, before);
    }
}
