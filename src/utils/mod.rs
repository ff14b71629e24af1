//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, ObjectId 파싱
//! - [`record`] - 저장 문서를 응답용 JSON으로 변환
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::parse_object_id;
//! use crate::utils::record::clean_document;
//!
//! let id = parse_object_id(&path)?;
//! let json = clean_document(document);
//! ```

pub mod string_utils;
pub mod record;
pub mod display_terminal;
