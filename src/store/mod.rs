//! Document Store Adapter
//!
//! 엔티티 계층이 사용하는 문서 저장소 추상화입니다.
//! 모든 엔티티 연산은 `&dyn DocumentStore`를 명시적으로 전달받으며,
//! 전역 연결 핸들은 존재하지 않습니다.
//!
//! # 구현체
//!
//! - [`crate::db::Database`] - MongoDB (`mongo` 모듈)
//! - [`memory::MemoryStore`] - 프로세스 내 저장소 (테스트, 로컬 실행)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::store::{DocumentStore, memory::MemoryStore};
//!
//! let store = MemoryStore::new();
//! let projects = store.collection("Projects");
//! let id = projects.insert_one(doc! { "title": "Landing page" }).await?;
//! ```

pub mod memory;
pub mod mongo;

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use thiserror::Error;

/// 저장소 계층 에러
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB 드라이버 에러
    #[error("driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// 엔티티를 BSON 문서로 변환하지 못함
    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// 유니크 인덱스 위반
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// 이미 존재하는 컬렉션 생성 시도
    #[error("collection already exists: {0}")]
    NamespaceExists(String),

    /// 저장소가 삽입된 문서의 ObjectId를 돌려주지 않음
    #[error("store returned a non-ObjectId identifier: {0}")]
    UnexpectedId(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// `update_one` 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub upserted_id: Option<ObjectId>,
}

/// 인덱스 정의
///
/// `keys`는 (필드명, 방향) 쌍이며 방향은 MongoDB 규약(1 오름차순, -1 내림차순)을 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub keys: Vec<(String, i32)>,
    pub unique: bool,
}

impl IndexSpec {
    pub fn ascending(fields: &[&str]) -> Self {
        Self {
            keys: fields.iter().map(|f| (f.to_string(), 1)).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// MongoDB 기본 인덱스 이름 (`clientId_1_freelancerId_1`)
    pub fn name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, direction)| format!("{}_{}", field, direction))
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn key_document(&self) -> Document {
        let mut keys = Document::new();
        for (field, direction) in &self.keys {
            keys.insert(field.clone(), *direction);
        }
        keys
    }
}

/// 컬렉션 단위 저장소 연산
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    fn name(&self) -> &str;

    /// 문서를 삽입하고 저장소가 할당한 식별자를 반환합니다.
    async fn insert_one(&self, document: Document) -> Result<ObjectId, StoreError>;

    /// `_id`가 `id`인 문서에 `fields`를 `$set` 합니다.
    async fn update_one(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    /// 필드 동등 비교 필터로 문서 하나를 조회합니다.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError>;

    async fn find_all(&self, limit: Option<i64>) -> Result<Vec<Document>, StoreError>;

    /// 삭제된 문서 수를 반환합니다.
    async fn delete_one(&self, id: ObjectId) -> Result<u64, StoreError>;
}

/// 데이터베이스 단위 저장소 연산
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    async fn create_collection(&self, name: &str) -> Result<(), StoreError>;

    async fn drop_collection(&self, name: &str) -> Result<(), StoreError>;

    /// 인덱스를 생성하고 그 이름을 반환합니다.
    async fn create_index(&self, collection: &str, index: IndexSpec) -> Result<String, StoreError>;
}
