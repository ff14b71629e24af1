//! 애플리케이션 에러 모듈
//!
//! - [`errors`] - `AppError`, `AppResult`, `ErrorContext`

pub mod errors;

pub use errors::*;
