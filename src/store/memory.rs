//! 프로세스 내 문서 저장소
//!
//! MongoDB 없이 엔티티 계층을 실행하기 위한 저장소입니다.
//! 컬렉션 자동 생성, `$set` 업서트, 유니크 인덱스 검사 등
//! 엔티티가 의존하는 MongoDB 동작을 그대로 따릅니다.
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! let id = project.persist(&store).await?;
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use super::{DocumentCollection, DocumentStore, IndexSpec, StoreError, UpdateOutcome};

#[derive(Debug, Default)]
struct CollectionState {
    documents: Vec<Document>,
    indexes: Vec<IndexSpec>,
}

impl CollectionState {
    fn position(&self, id: &ObjectId) -> Option<usize> {
        self.documents
            .iter()
            .position(|doc| doc.get_object_id("_id").ok().as_ref() == Some(id))
    }

    /// `candidate`가 다른 문서와 유니크 인덱스를 위반하는지 검사합니다.
    fn check_unique(&self, collection: &str, candidate: &Document) -> Result<(), StoreError> {
        let candidate_id = candidate.get("_id");

        for index in self.indexes.iter().filter(|index| index.unique) {
            let key_of = |doc: &Document| -> Vec<Bson> {
                index
                    .keys
                    .iter()
                    .map(|(field, _)| doc.get(field).cloned().unwrap_or(Bson::Null))
                    .collect()
            };
            let candidate_key = key_of(candidate);

            let clash = self
                .documents
                .iter()
                .filter(|doc| doc.get("_id") != candidate_id)
                .any(|doc| key_of(doc) == candidate_key);

            if clash {
                return Err(StoreError::DuplicateKey(format!("{}.{}", collection, index.name())));
            }
        }

        Ok(())
    }
}

type Collections = Arc<RwLock<BTreeMap<String, CollectionState>>>;

/// 메모리 기반 [`DocumentStore`]
///
/// 복제본은 같은 데이터를 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Collections,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이후의 모든 쓰기 연산이 `StoreError::Unavailable`로 실패하도록 설정합니다.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 컬렉션에 저장된 문서 수
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|collections| {
                collections
                    .get(collection)
                    .map(|state| state.documents.len())
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, CollectionState>>, StoreError> {
        write_lock(&self.collections)
    }
}

fn read_lock(
    collections: &Collections,
) -> Result<RwLockReadGuard<'_, BTreeMap<String, CollectionState>>, StoreError> {
    collections
        .read()
        .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
}

fn write_lock(
    collections: &Collections,
) -> Result<RwLockWriteGuard<'_, BTreeMap<String, CollectionState>>, StoreError> {
    collections
        .write()
        .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
}

/// 메모리 저장소의 컬렉션 핸들
pub struct MemoryCollection {
    name: String,
    collections: Collections,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryCollection {
    fn guard_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("writes to {} are failing", self.name)));
        }
        Ok(())
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, mut document: Document) -> Result<ObjectId, StoreError> {
        self.guard_writes()?;

        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => return Err(StoreError::UnexpectedId(other.to_string())),
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let mut collections = write_lock(&self.collections)?;
        let state = collections.entry(self.name.clone()).or_default();

        if state.position(&id).is_some() {
            return Err(StoreError::DuplicateKey(format!("{}._id_ {}", self.name, id)));
        }
        state.check_unique(&self.name, &document)?;
        state.documents.push(document);

        Ok(id)
    }

    async fn update_one(
        &self,
        id: ObjectId,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        self.guard_writes()?;

        let mut collections = write_lock(&self.collections)?;
        let state = collections.entry(self.name.clone()).or_default();

        match state.position(&id) {
            Some(position) => {
                let mut updated = state.documents[position].clone();
                for (key, value) in fields {
                    updated.insert(key, value);
                }
                state.check_unique(&self.name, &updated)?;
                state.documents[position] = updated;

                Ok(UpdateOutcome { matched_count: 1, upserted_id: None })
            }
            None if upsert => {
                let mut created = Document::new();
                created.insert("_id", id);
                for (key, value) in fields {
                    created.insert(key, value);
                }
                state.check_unique(&self.name, &created)?;
                state.documents.push(created);

                Ok(UpdateOutcome { matched_count: 0, upserted_id: Some(id) })
            }
            None => Ok(UpdateOutcome { matched_count: 0, upserted_id: None }),
        }
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = read_lock(&self.collections)?;

        Ok(collections.get(&self.name).and_then(|state| {
            state
                .documents
                .iter()
                .find(|doc| matches(doc, &filter))
                .cloned()
        }))
    }

    async fn find_all(&self, limit: Option<i64>) -> Result<Vec<Document>, StoreError> {
        let collections = read_lock(&self.collections)?;
        let Some(state) = collections.get(&self.name) else {
            return Ok(Vec::new());
        };

        let take = match limit {
            Some(limit) if limit > 0 => limit as usize,
            _ => state.documents.len(),
        };
        Ok(state.documents.iter().take(take).cloned().collect())
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, StoreError> {
        self.guard_writes()?;

        let mut collections = write_lock(&self.collections)?;
        let Some(state) = collections.get_mut(&self.name) else {
            return Ok(0);
        };

        match state.position(&id) {
            Some(position) => {
                state.documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MemoryCollection {
            name: name.to_string(),
            collections: Arc::clone(&self.collections),
            fail_writes: Arc::clone(&self.fail_writes),
        })
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let collections = read_lock(&self.collections)?;
        Ok(collections.keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        if collections.contains_key(name) {
            return Err(StoreError::NamespaceExists(name.to_string()));
        }
        collections.insert(name.to_string(), CollectionState::default());
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), StoreError> {
        self.write()?.remove(name);
        Ok(())
    }

    async fn create_index(&self, collection: &str, index: IndexSpec) -> Result<String, StoreError> {
        let mut collections = self.write()?;
        let state = collections.entry(collection.to_string()).or_default();
        let name = index.name();

        if state.indexes.iter().any(|existing| existing.name() == name) {
            return Ok(name);
        }

        state.indexes.push(index);
        if let Err(e) = state
            .documents
            .iter()
            .try_for_each(|doc| state.check_unique(collection, doc))
        {
            state.indexes.pop();
            return Err(e);
        }

        Ok(name)
    }
}
