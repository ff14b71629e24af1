//! Users Entity Module
//!
//! 계정과 역할별 프로필 엔티티입니다.
//!
//! - [`User`] - 기본 계정 (`Users`)
//! - [`Freelancer`] - 프리랜서 프로필 (`Freelancers`)
//! - [`Client`] - 클라이언트 프로필 (`Clients`)
//! - [`Admin`] - 관리자 (`Admins`)
//!
//! 프로필은 `user` 필드로 `Users` 문서를 참조하지만 존재 여부는 확인하지 않습니다.

pub mod user;
pub mod freelancer;
pub mod client;
pub mod admin;

pub use user::{User, UserField};
pub use freelancer::{Freelancer, FreelancerField};
pub use client::{Client, ClientField};
pub use admin::{Admin, AdminField};
