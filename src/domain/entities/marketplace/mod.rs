//! Marketplace Entity Module
//!
//! - [`Project`] - 입찰, 상태, 리뷰를 소유하는 애그리거트 (`Projects`)
//! - [`Payment`] - 프로젝트 결제 (`Payments`)
//! - [`Category`] - 프로젝트 카테고리 (`Categories`)

pub mod project;
pub mod payment;
pub mod category;

pub use project::{Project, ProjectField};
pub use payment::{Payment, PaymentField};
pub use category::{Category, CategoryField};
