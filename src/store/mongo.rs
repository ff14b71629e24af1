//! MongoDB 기반 문서 저장소
//!
//! [`crate::db::Database`]에 [`DocumentStore`]를 구현합니다.
//! 드라이버 에러 중 중복 키(11000)와 네임스페이스 충돌(48)은
//! 별도의 [`StoreError`] 변형으로 분류합니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use crate::db::Database;
use super::{DocumentCollection, DocumentStore, IndexSpec, StoreError, UpdateOutcome};

const DUPLICATE_KEY_CODE: i32 = 11000;
const NAMESPACE_EXISTS_CODE: i32 = 48;

/// 드라이버 에러를 저장소 에러로 분류합니다.
fn classify(error: mongodb::error::Error, target: &str) -> StoreError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE => {
            StoreError::DuplicateKey(format!("{}: {}", target, write.message))
        }
        ErrorKind::Command(command) if command.code == DUPLICATE_KEY_CODE => {
            StoreError::DuplicateKey(format!("{}: {}", target, command.message))
        }
        ErrorKind::Command(command) if command.code == NAMESPACE_EXISTS_CODE => {
            StoreError::NamespaceExists(target.to_string())
        }
        _ => StoreError::Driver(error),
    }
}

/// MongoDB 컬렉션 핸들
pub struct MongoCollection {
    inner: mongodb::Collection<Document>,
}

impl MongoCollection {
    pub fn new(inner: mongodb::Collection<Document>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError> {
        let result = self
            .inner
            .insert_one(document)
            .await
            .map_err(|e| classify(e, self.name()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn update_one(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .inner
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .upsert(upsert)
            .await
            .map_err(|e| classify(e, self.name()))?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            upserted_id: result.upserted_id.and_then(|bson| bson.as_object_id()),
        })
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.inner.find_one(filter).await?)
    }

    async fn find_all(&self, limit: Option<i64>) -> Result<Vec<Document>, StoreError> {
        let cursor = match limit {
            Some(limit) if limit > 0 => self.inner.find(doc! {}).limit(limit).await?,
            _ => self.inner.find(doc! {}).await?,
        };

        Ok(cursor.try_collect().await?)
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.inner.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl DocumentStore for Database {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection::new(
            self.get_database().collection::<Document>(name),
        ))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.get_database().list_collection_names().await?)
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        self.get_database()
            .create_collection(name)
            .await
            .map_err(|e| classify(e, name))
    }

    async fn drop_collection(&self, name: &str) -> Result<(), StoreError> {
        Ok(self.get_database().collection::<Document>(name).drop().await?)
    }

    async fn create_index(&self, collection: &str, index: IndexSpec) -> Result<String, StoreError> {
        let options = IndexOptions::builder()
            .unique(index.unique)
            .name(index.name())
            .build();
        let model = IndexModel::builder()
            .keys(index.key_document())
            .options(options)
            .build();

        let result = self
            .get_database()
            .collection::<Document>(collection)
            .create_index(model)
            .await
            .map_err(|e| classify(e, collection))?;

        Ok(result.index_name)
    }
}
