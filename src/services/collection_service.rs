//! 컬렉션 관리 서비스
//!
//! 컬렉션과 인덱스의 생성, 전체 삭제, 그리고 컬렉션 이름으로 선택되는
//! 레코드 조회/수정/삭제를 담당합니다.

use std::sync::Arc;
use log::{error, info, warn};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use crate::domain::dto::collections::{DropReport, ProvisionReport, RecordsResponse};
use crate::domain::entities::{
    Admin, Category, Client, Collection, Entity, Freelancer, Message, Notification, Payment,
    Project, User,
};
use crate::errors::{AppError, AppResult};
use crate::store::{DocumentStore, IndexSpec, StoreError};
use crate::utils::record::clean_document;

/// 전체 삭제에 필요한 확인 문구
pub const DROP_CONFIRMATION: &str = "delete_collections";

/// 컬렉션 값에 따라 엔티티 타입을 골라 제네릭 함수를 호출합니다.
macro_rules! by_collection {
    ($collection:expr, $function:ident($($arg:expr),*)) => {
        match $collection {
            Collection::Users => $function::<User>($($arg),*).await,
            Collection::Freelancers => $function::<Freelancer>($($arg),*).await,
            Collection::Clients => $function::<Client>($($arg),*).await,
            Collection::Admins => $function::<Admin>($($arg),*).await,
            Collection::Messages => $function::<Message>($($arg),*).await,
            Collection::Notifications => $function::<Notification>($($arg),*).await,
            Collection::Projects => $function::<Project>($($arg),*).await,
            Collection::Payments => $function::<Payment>($($arg),*).await,
            Collection::Categories => $function::<Category>($($arg),*).await,
        }
    };
}

/// 기본 인덱스 목록
///
/// | 컬렉션 | 키 | 유니크 |
/// |--------|----|--------|
/// | Freelancers | `email` | O |
/// | Clients | `email` | O |
/// | Projects | `clientId`, `freelancerId` | X |
/// | Notifications | `userId` | X |
pub fn default_indexes() -> Vec<(Collection, IndexSpec)> {
    vec![
        (Collection::Freelancers, IndexSpec::ascending(&["email"]).unique()),
        (Collection::Clients, IndexSpec::ascending(&["email"]).unique()),
        (Collection::Projects, IndexSpec::ascending(&["clientId", "freelancerId"])),
        (Collection::Notifications, IndexSpec::ascending(&["userId"])),
    ]
}

/// 컬렉션 관리 서비스
///
/// ## 주요 책임
///
/// - **프로비저닝**: 없는 컬렉션 생성, 기본 인덱스 생성 (재실행 가능)
/// - **전체 삭제**: 확인 문구가 일치할 때만 알려진 컬렉션 삭제
/// - **레코드 관리**: 컬렉션 이름으로 엔티티 타입을 선택해 조회/수정/삭제
pub struct CollectionService {
    store: Arc<dyn DocumentStore>,
}

impl CollectionService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// 저장소에 존재하는 컬렉션 이름 목록
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut names = self.store.list_collection_names().await.map_err(|e| {
            error!("컬렉션 목록 조회 실패: {}", e);
            AppError::from(e)
        })?;
        names.sort();
        Ok(names)
    }

    /// 없는 컬렉션을 만들고 기본 인덱스를 생성합니다.
    ///
    /// 이미 있는 컬렉션은 `existing`으로 보고되며, 여러 번 실행해도 결과가 같습니다.
    pub async fn provision(&self) -> AppResult<ProvisionReport> {
        let present = self.list().await?;
        let mut report = ProvisionReport::default();

        for collection in Collection::ALL {
            let name = collection.name();

            if present.iter().any(|existing| existing == name) {
                info!("컬렉션 '{}'이(가) 이미 존재합니다", name);
                report.existing.push(name.to_string());
                continue;
            }

            match self.store.create_collection(name).await {
                Ok(()) => {
                    info!("컬렉션 '{}' 생성 완료", name);
                    report.created.push(name.to_string());
                }
                // 목록 조회 이후 다른 요청이 먼저 만든 경우
                Err(StoreError::NamespaceExists(_)) => {
                    report.existing.push(name.to_string());
                }
                Err(e) => {
                    error!("컬렉션 '{}' 생성 실패: {}", name, e);
                    return Err(e.into());
                }
            }
        }

        for (collection, index) in default_indexes() {
            let index_name = self
                .store
                .create_index(collection.name(), index)
                .await
                .map_err(|e| {
                    error!("{} 인덱스 생성 실패: {}", collection, e);
                    AppError::from(e)
                })?;

            info!("{} 인덱스 '{}' 준비 완료", collection, index_name);
            report.indexes.push(format!("{}.{}", collection, index_name));
        }

        Ok(report)
    }

    /// 알려진 모든 컬렉션을 삭제합니다.
    ///
    /// `confirmation`이 `delete_collections`와 다르면 아무것도 삭제하지 않고
    /// `ValidationError`를 반환합니다.
    pub async fn drop_all(&self, confirmation: &str) -> AppResult<DropReport> {
        if confirmation != DROP_CONFIRMATION {
            warn!("확인 문구가 일치하지 않아 컬렉션 삭제를 취소합니다");
            return Err(AppError::ValidationError(format!(
                "삭제하려면 확인 문구로 '{}'를 입력해주세요",
                DROP_CONFIRMATION
            )));
        }

        let present = self.list().await?;
        let mut report = DropReport::default();

        for collection in Collection::ALL {
            let name = collection.name();

            if !present.iter().any(|existing| existing == name) {
                warn!("컬렉션 '{}'이(가) 존재하지 않습니다", name);
                report.missing.push(name.to_string());
                continue;
            }

            self.store.drop_collection(name).await.map_err(|e| {
                error!("컬렉션 '{}' 삭제 실패: {}", name, e);
                AppError::from(e)
            })?;

            info!("컬렉션 '{}' 삭제 완료", name);
            report.dropped.push(name.to_string());
        }

        Ok(report)
    }

    /// 컬렉션의 문서를 응답용 JSON으로 반환합니다.
    ///
    /// 문서를 엔티티로 복원하지 않으므로 형식이 깨진 문서도 그대로 보입니다.
    pub async fn records(&self, collection: Collection, limit: Option<i64>) -> AppResult<RecordsResponse> {
        let documents = self
            .store
            .collection(collection.name())
            .find_all(limit)
            .await
            .map_err(|e| {
                error!("{} 문서 조회 실패: {}", collection, e);
                AppError::from(e)
            })?;

        let records: Vec<Value> = documents.into_iter().map(clean_document).collect();

        Ok(RecordsResponse {
            collection: collection.name().to_string(),
            count: records.len(),
            records,
        })
    }

    /// 레코드 하나를 엔티티로 불러와 JSON으로 반환합니다.
    pub async fn get(&self, collection: Collection, id: ObjectId) -> AppResult<Value> {
        let store = self.store.as_ref();
        by_collection!(collection, load_json(store, id))
    }

    /// 저장 필드명 매핑을 적용하고 갱신된 레코드를 반환합니다.
    pub async fn patch(
        &self,
        collection: Collection,
        id: ObjectId,
        mapping: Map<String, Value>,
    ) -> AppResult<Value> {
        let store = self.store.as_ref();
        by_collection!(collection, patch_json(store, id, mapping))
    }

    /// 레코드를 ID로 삭제합니다. 없으면 `NotFound`입니다.
    ///
    /// 엔티티로 복원하지 않으므로 형식이 깨진 문서도 삭제할 수 있습니다.
    pub async fn delete(&self, collection: Collection, id: ObjectId) -> AppResult<bool> {
        let deleted = self
            .store
            .collection(collection.name())
            .delete_one(id)
            .await
            .map_err(|e| {
                error!("{} {} 삭제 실패: {}", collection, id, e);
                AppError::from(e)
            })?;

        if deleted == 0 {
            warn!("삭제할 {} {}이(가) 없습니다", collection, id);
            return Err(AppError::NotFound(format!("{} {}을(를) 찾을 수 없습니다", collection, id)));
        }

        info!("{} {} 삭제 완료", collection, id);
        Ok(true)
    }
}

/// ID로 엔티티를 불러옵니다. 없으면 `NotFound`입니다.
pub async fn load_required<E: Entity>(store: &dyn DocumentStore, id: ObjectId) -> AppResult<E> {
    E::load_by_id(store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}을(를) 찾을 수 없습니다", E::KIND, id)))
}

async fn load_json<E: Entity>(store: &dyn DocumentStore, id: ObjectId) -> AppResult<Value> {
    load_required::<E>(store, id).await?.to_json()
}

async fn patch_json<E: Entity>(
    store: &dyn DocumentStore,
    id: ObjectId,
    mapping: Map<String, Value>,
) -> AppResult<Value> {
    let mut entity = load_required::<E>(store, id).await?;
    entity.apply_mapping(store, mapping).await?;
    entity.to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;
    use crate::store::memory::MemoryStore;

    fn service() -> (MemoryStore, CollectionService) {
        let store = MemoryStore::new();
        let service = CollectionService::new(Arc::new(store.clone()));
        (store, service)
    }

    #[actix_web::test]
    async fn test_provision_creates_collections_and_indexes() {
        let (_, service) = service();

        let report = service.provision().await.unwrap();

        assert_eq!(report.created.len(), Collection::ALL.len());
        assert!(report.existing.is_empty());
        assert_eq!(report.indexes.len(), 4);
        assert!(report.indexes.contains(&"Freelancers.email_1".to_string()));
        assert!(report.indexes.contains(&"Projects.clientId_1_freelancerId_1".to_string()));
        assert_eq!(service.list().await.unwrap().len(), Collection::ALL.len());
    }

    #[actix_web::test]
    async fn test_provision_is_rerunnable() {
        let (_, service) = service();
        service.provision().await.unwrap();

        let second = service.provision().await.unwrap();

        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), Collection::ALL.len());
        assert_eq!(second.indexes.len(), 4);
    }

    #[actix_web::test]
    async fn test_provisioned_email_index_rejects_duplicates() {
        let (store, service) = service();
        service.provision().await.unwrap();

        let mut first = Client::new(None, Some("dup@example.com".to_string()));
        first.persist(&store).await.unwrap();
        let mut second = Client::new(None, Some("dup@example.com".to_string()));

        let result = second.persist(&store).await;

        assert!(matches!(
            result,
            Err(AppError::PersistenceError(StoreError::DuplicateKey(_)))
        ));
        assert_eq!(store.count("Clients"), 1);
    }

    #[actix_web::test]
    async fn test_drop_requires_confirmation() {
        let (_, service) = service();
        service.provision().await.unwrap();

        let result = service.drop_all("yes").await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(service.list().await.unwrap().len(), Collection::ALL.len());
    }

    #[actix_web::test]
    async fn test_drop_reports_dropped_and_missing() {
        let (store, service) = service();
        let mut category = Category::new("Design");
        category.persist(&store).await.unwrap();

        let report = service.drop_all(DROP_CONFIRMATION).await.unwrap();

        assert_eq!(report.dropped, vec!["Categories".to_string()]);
        assert_eq!(report.missing.len(), Collection::ALL.len() - 1);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_records_are_cleaned_and_limited() {
        let (store, service) = service();
        for name in ["Design", "Writing", "Marketing"] {
            Category::new(name).persist(&store).await.unwrap();
        }

        let all = service.records(Collection::Categories, None).await.unwrap();
        let limited = service.records(Collection::Categories, Some(2)).await.unwrap();

        assert_eq!(all.count, 3);
        assert_eq!(limited.count, 2);
        assert!(all.records[0]["_id"].is_string());
        assert!(all.records[0]["createdAt"].is_string());
    }

    #[actix_web::test]
    async fn test_get_patch_and_delete_by_collection() {
        let (store, service) = service();
        let mut category = Category::new("Design");
        let id = category.persist(&store).await.unwrap();

        let loaded = service.get(Collection::Categories, id).await.unwrap();
        assert_eq!(loaded["name"], json!("Design"));

        let mut mapping = Map::new();
        mapping.insert("name".to_string(), json!("Illustration"));
        mapping.insert("colour".to_string(), json!("red"));
        let patched = service.patch(Collection::Categories, id, mapping).await.unwrap();
        assert_eq!(patched["name"], json!("Illustration"));
        assert!(patched.get("colour").is_none());

        assert!(service.delete(Collection::Categories, id).await.unwrap());
        assert!(matches!(
            service.get(Collection::Categories, id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_missing_record_is_not_found() {
        let (_, service) = service();

        let result = service.delete(Collection::Projects, ObjectId::new()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_malformed_record_can_be_deleted() {
        let (store, service) = service();
        let id = store
            .collection("Projects")
            .insert_one(doc! { "description": "no title" })
            .await
            .unwrap();

        assert!(matches!(
            service.get(Collection::Projects, id).await,
            Err(AppError::MalformedRecord(_))
        ));
        assert!(service.delete(Collection::Projects, id).await.unwrap());
        assert_eq!(store.count("Projects"), 0);
    }
}
