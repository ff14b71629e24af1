//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성 시 저장소 핸들(`Arc<dyn DocumentStore>`)을 주입받으며,
//! 엔티티 연산을 조합해 관리 API의 각 요청을 처리합니다.
//!
//! ```text
//! Handlers (HTTP)
//!      │
//!      ▼
//! Services (이 모듈)
//! ├── collection_service   - 컬렉션 생성/삭제, 레코드 조회/수정/삭제
//! ├── seed_service         - 가짜 데이터 생성
//! └── marketplace_service  - 입찰, 상태, 리뷰, 대화, 결제, 카테고리 연산
//!      │
//!      ▼
//! Entities (Entity 계약) → DocumentStore
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::CollectionService;
//!
//! let service = CollectionService::new(store.clone());
//! let report = service.provision().await?;
//! ```

pub mod collection_service;
pub mod seed_service;
pub mod marketplace_service;

pub use collection_service::CollectionService;
pub use seed_service::SeedService;
pub use marketplace_service::MarketplaceService;
