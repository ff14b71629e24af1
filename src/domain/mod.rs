//! # Domain Layer Module
//!
//! 마켓플레이스 레코드의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 문서로 영속되는 엔티티와 Entity 계약
//! ├── models    - 엔티티 문서에 포함되는 값 객체
//! └── dto       - 관리 API 요청/응답
//!      │
//!      ▼
//! Services (collections, seed, marketplace)
//!      │
//!      ▼
//! Store (MongoDB / 메모리)
//! ```
//!
//! 애그리거트(`Project`, `Message`)는 포함된 값 객체를 직접 노출하지 않고
//! `add_bid`, `add_reply` 같은 메서드로만 변경합니다.

pub mod entities;
pub mod models;
pub mod dto;
