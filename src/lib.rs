//! 프리랜서 마켓플레이스 레코드 관리 서비스
//!
//! 사용자, 프리랜서, 클라이언트, 관리자, 프로젝트, 결제, 메시지, 알림, 카테고리
//! 레코드를 문서 저장소(MongoDB)에 저장하고 관리 API로 다루는 서비스입니다.
//!
//! # Features
//!
//! - **엔티티 영속성**: 공통 `Entity` 계약으로 저장/조회/필드 수정/삭제
//! - **애그리거트**: 프로젝트(입찰, 상태, 리뷰)와 대화(메시지 이벤트)
//! - **컬렉션 관리**: 컬렉션/인덱스 생성, 확인 문구 기반 전체 삭제
//! - **시드 데이터**: `fake` 기반 가짜 레코드 생성
//! - **저장소 추상화**: MongoDB와 테스트용 메모리 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 컬렉션, 시드, 마켓플레이스 연산
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Entities     │ ← Entity 계약, 애그리거트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  DocumentStore  │ ← MongoDB / 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use freelancer_management::domain::entities::{Entity, Project};
//! use freelancer_management::store::memory::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let mut project = Project::new("Logo", "Vector logo", client_id, 300.0);
//! project.persist(&store).await?;
//! project.add_bid(&store, freelancer_id, 250.0, "Two days").await?;
//! ```

pub mod config;
pub mod db;
pub mod store;
pub mod domain;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
