//! # Data Transfer Objects (DTO) Module
//!
//! 관리 API 경계에서 주고받는 요청/응답 구조체입니다.
//! 요청 DTO는 `validator`로 검증되며, 엔티티에는 검증되지 않은 값이 들어가지 않습니다.
//!
//! ```text
//! dto/
//! ├── collections/        # 컬렉션 생성/삭제, 시드, 레코드 조회
//! │   ├── request.rs
//! │   └── response.rs
//! └── marketplace/        # 프로젝트, 대화, 결제, 카테고리 연산
//!     └── request.rs
//! ```
//!
//! ```rust,ignore
//! use validator::Validate;
//!
//! payload.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;
//! ```

pub mod collections;
pub mod marketplace;
