//! # Domain Entities
//!
//! 문서 저장소에 영속되는 엔티티들과 공통 영속성 계약([`Entity`])을 정의합니다.
//!
//! ## 엔티티 목록
//!
//! | 엔티티 | 컬렉션 | 모듈 |
//! |--------|--------|------|
//! | `User`, `Freelancer`, `Client`, `Admin` | `Users`, `Freelancers`, `Clients`, `Admins` | [`users`] |
//! | `Project`, `Payment`, `Category` | `Projects`, `Payments`, `Categories` | [`marketplace`] |
//! | `Message`, `Notification` | `Messages`, `Notifications` | [`messaging`] |
//!
//! ## 생명주기
//!
//! 1. 메모리에서 `id == None`으로 생성
//! 2. 첫 `persist`에서 저장소가 ObjectId를 할당
//! 3. 이후 `persist`는 같은 ID에 전체 필드를 `$set` (upsert)
//! 4. `remove` 후에는 다시 `id == None`
//!
//! ```rust,ignore
//! let mut category = Category::new("Design");
//! let id = category.persist(&store).await?;
//! let loaded = Category::load_by_id(&store, id).await?;
//! ```

pub mod fields;
pub mod users;
pub mod marketplace;
pub mod messaging;

use std::fmt;
use std::str::FromStr;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::errors::{AppError, AppResult};
use crate::store::{DocumentStore, StoreError};
use crate::utils::record::clean_document;

pub use fields::FieldUpdate;
pub use users::{Admin, Client, Freelancer, User};
pub use marketplace::{Category, Payment, Project};
pub use messaging::{Message, Notification};

/// 시스템이 관리하는 컬렉션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Freelancers,
    Clients,
    Admins,
    Messages,
    Notifications,
    Projects,
    Payments,
    Categories,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Freelancers,
        Collection::Clients,
        Collection::Admins,
        Collection::Messages,
        Collection::Notifications,
        Collection::Projects,
        Collection::Payments,
        Collection::Categories,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Freelancers => "Freelancers",
            Collection::Clients => "Clients",
            Collection::Admins => "Admins",
            Collection::Messages => "Messages",
            Collection::Notifications => "Notifications",
            Collection::Projects => "Projects",
            Collection::Payments => "Payments",
            Collection::Categories => "Categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::NotFound(format!("알 수 없는 컬렉션입니다: {}", s)))
    }
}

/// 영속 가능한 엔티티의 공통 계약
///
/// 구현체는 식별자 접근, 수정 시각 갱신, 필드 단위 갱신만 제공하면 되고
/// 직렬화와 저장소 연산은 기본 구현을 사용합니다.
/// 저장소 핸들은 모든 연산에 명시적으로 전달됩니다.
#[async_trait]
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// 엔티티가 저장되는 컬렉션
    const COLLECTION: Collection;
    /// 로그와 에러 메시지에 사용하는 이름
    const KIND: &'static str;

    /// 설정 가능한 필드 열거형
    type Field: FieldUpdate + Send;

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: Option<ObjectId>);

    /// 저장 직전에 수정 시각을 갱신합니다.
    fn touch(&mut self, now: DateTime);

    /// 저장 전 검증. 기본값은 항상 통과입니다.
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }

    fn apply_field(&mut self, field: Self::Field);

    /// 저장 문서 형태로 직렬화합니다. ID가 있으면 `_id`가 포함됩니다.
    fn to_document(&self) -> AppResult<Document> {
        mongodb::bson::to_document(self)
            .map_err(|e| AppError::PersistenceError(StoreError::Serialization(e)))
    }

    /// 응답용 JSON. ObjectId와 날짜는 문자열로 표시됩니다.
    fn to_json(&self) -> AppResult<serde_json::Value> {
        self.to_document().map(clean_document)
    }

    /// 저장 문서에서 엔티티를 복원합니다.
    ///
    /// 필수 필드가 없거나 타입이 맞지 않으면 `MalformedRecord`를 반환합니다.
    fn from_document(document: Document) -> AppResult<Self> {
        mongodb::bson::from_document(document)
            .map_err(|e| AppError::MalformedRecord(format!("{}: {}", Self::KIND, e)))
    }

    /// 엔티티 전체를 저장합니다.
    ///
    /// ID가 없으면 삽입 후 할당된 ID를 기록하고,
    /// 있으면 그 ID에 모든 필드를 덮어씁니다 (upsert).
    async fn persist(&mut self, store: &dyn DocumentStore) -> AppResult<ObjectId> {
        self.validate()?;
        self.touch(DateTime::now());

        let mut document = self.to_document()?;
        document.remove("_id");

        let collection = store.collection(Self::COLLECTION.name());

        match self.id() {
            Some(id) => {
                collection.update_one(id, document, true).await.map_err(|e| {
                    error!("{} {} 저장 실패: {}", Self::KIND, id, e);
                    AppError::from(e)
                })?;

                info!("{} {} 업데이트 완료", Self::KIND, id);
                Ok(id)
            }
            None => {
                let id = collection.insert_one(document).await.map_err(|e| {
                    error!("{} 삽입 실패: {}", Self::KIND, e);
                    AppError::from(e)
                })?;

                self.set_id(Some(id));
                info!("{} 삽입 완료: {}", Self::KIND, id);
                Ok(id)
            }
        }
    }

    /// ID로 엔티티를 조회합니다. 없으면 `Ok(None)`입니다.
    async fn load_by_id(store: &dyn DocumentStore, id: ObjectId) -> AppResult<Option<Self>> {
        let found = store
            .collection(Self::COLLECTION.name())
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| {
                error!("{} {} 조회 실패: {}", Self::KIND, id, e);
                AppError::from(e)
            })?;

        match found {
            Some(document) => Self::from_document(document).map(Some),
            None => {
                warn!("{} {}을(를) 찾을 수 없습니다", Self::KIND, id);
                Ok(None)
            }
        }
    }

    /// 엔티티를 삭제하고 로컬 ID를 지웁니다.
    ///
    /// ID가 없으면 경고만 남기고 `Ok(false)`를 반환합니다.
    async fn remove(&mut self, store: &dyn DocumentStore) -> AppResult<bool> {
        let Some(id) = self.id() else {
            warn!("삭제할 {} ID가 없습니다", Self::KIND);
            return Ok(false);
        };

        let deleted = store
            .collection(Self::COLLECTION.name())
            .delete_one(id)
            .await
            .map_err(|e| {
                error!("{} {} 삭제 실패: {}", Self::KIND, id, e);
                AppError::from(e)
            })?;

        self.set_id(None);

        if deleted > 0 {
            info!("{} {} 삭제 완료", Self::KIND, id);
        } else {
            warn!("삭제할 {} {}이(가) 저장소에 없습니다", Self::KIND, id);
        }
        Ok(deleted > 0)
    }

    /// 필드 갱신을 적용한 뒤 저장합니다.
    ///
    /// 갱신은 사본에 먼저 적용되며, 검증이나 저장이 실패하면 엔티티는 그대로 남습니다.
    async fn apply_fields(
        &mut self,
        store: &dyn DocumentStore,
        fields: Vec<Self::Field>,
    ) -> AppResult<ObjectId> {
        let mut updated = self.clone();
        for field in fields {
            updated.apply_field(field);
        }

        let id = updated.persist(store).await?;
        *self = updated;
        Ok(id)
    }

    /// 저장 필드명으로 된 JSON 매핑을 적용한 뒤 저장합니다.
    ///
    /// 알 수 없는 키는 무시되고, 타입이 맞지 않는 값은 `ValidationError`입니다.
    async fn apply_mapping(
        &mut self,
        store: &dyn DocumentStore,
        mapping: serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<ObjectId> {
        let mut fields = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            match Self::Field::parse(&key, value)? {
                Some(field) => fields.push(field),
                None => debug!("{}: 설정할 수 없는 필드 `{}` 무시", Self::KIND, key),
            }
        }
        self.apply_fields(store, fields).await
    }
}
