//! Messaging Entity Module
//!
//! - [`Message`] - 대화 애그리거트 (`Messages`)
//! - [`Notification`] - 사용자 알림 (`Notifications`)

pub mod message;
pub mod notification;

pub use message::{Message, MessageField};
pub use notification::{Notification, NotificationField};
