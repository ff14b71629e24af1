//! Category Entity
//!
//! 이름이 비어 있는 카테고리는 저장하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::domain::entities::fields::{decode, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::errors::{AppError, AppResult};
use crate::store::DocumentStore;
use crate::utils::string_utils::{is_valid_string, validate_required_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryField {
    Name(String),
}

impl FieldUpdate for CategoryField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        match key {
            "name" => Ok(Some(CategoryField::Name(decode(key, value)?))),
            _ => Ok(None),
        }
    }
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 이름을 앞뒤 공백을 제거해 바꾸고 저장합니다.
    pub async fn rename(&mut self, store: &dyn DocumentStore, name: &str) -> AppResult<()> {
        self.name = validate_required_string(name, "Category name")?;
        self.persist(store).await?;
        Ok(())
    }
}

impl Entity for Category {
    const COLLECTION: Collection = Collection::Categories;
    const KIND: &'static str = "Category";

    type Field = CategoryField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn validate(&self) -> AppResult<()> {
        if !is_valid_string(&self.name) {
            return Err(AppError::ValidationError("Category name cannot be empty".to_string()));
        }
        Ok(())
    }

    fn apply_field(&mut self, field: CategoryField) {
        match field {
            CategoryField::Name(name) => self.name = name,
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
        let mut category = Category::new("Web Development");
        category.id = Some(ObjectId::new());

        let restored = Category::from_document(category.to_document().unwrap()).unwrap();
        assert_eq!(restored, category);
    }

    #[actix_web::test]
    async fn test_empty_name_is_rejected_before_write() {
        let store = MemoryStore::new();
        let mut category = Category::new("   ");

        let result = category.persist(&store).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(category.id, None);
        assert_eq!(store.count("Categories"), 0);
    }

    #[actix_web::test]
    async fn test_rename_trims_and_persists() {
        let store = MemoryStore::new();
        let mut category = Category::new("Design");
        let id = category.persist(&store).await.unwrap();

        category.rename(&store, "  Graphic Design ").await.unwrap();

        let loaded = Category::load_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Graphic Design");
        assert!(matches!(
            category.rename(&store, "").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_mapping_to_empty_name_is_rejected() {
        let store = MemoryStore::new();
        let mut category = Category::new("Writing");
        let id = category.persist(&store).await.unwrap();

        let mapping = json!({ "name": "" });
        let result = category.apply_mapping(&store, mapping.as_object().unwrap().clone()).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(category.name, "Writing");
        let loaded = Category::load_by_id(&store, id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Writing");
    }

    #[actix_web::test]
    async fn test_failed_write_keeps_previous_fields() {
        let store = MemoryStore::new();
        let mut category = Category::new("Writing");
        category.persist(&store).await.unwrap();
        store.fail_writes(true);

        let result = category
            .apply_fields(&store, vec![CategoryField::Name("Editing".to_string())])
            .await;

        assert!(matches!(result, Err(AppError::PersistenceError(_))));
        assert_eq!(category.name, "Writing");
    }
}
