//! # Domain Models Module
//!
//! 엔티티 문서 안에 포함되는 값 객체를 정의합니다.
//! 값 객체는 독립된 ID나 컬렉션을 갖지 않고 부모 문서와 함께만 저장됩니다.
//!
//! - [`project`] - `Bid`, `Status`, `Review`, 상태 전이 정책
//! - [`conversation`] - `ReplyTo`와 대화 메시지 이벤트
//! - [`profile`] - 프리랜서/클라이언트 프로필 레코드

pub mod project;
pub mod conversation;
pub mod profile;

pub use project::*;
pub use conversation::*;
pub use profile::*;
