//! 대화 문서에 포함되는 메시지 이벤트
//!
//! 이벤트는 저장 문서의 키로 구분됩니다.
//!
//! | 키 | 이벤트 |
//! |----|--------|
//! | `replyTo` 또는 `repliedToMessageId` | [`ReplyEvent`] |
//! | `forwardedFromMessageId` | [`ForwardEvent`] |
//! | 그 외 | [`TextMessage`] |

use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 답장 대상 메시지의 스냅샷
///
/// 대상 메시지의 존재 여부는 확인하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyTo {
    pub message_id: ObjectId,
    pub content: String,
    pub sender_id: ObjectId,
    pub timestamp: DateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyEvent {
    pub sender_id: ObjectId,
    pub content: String,
    pub timestamp: DateTime,
    pub replied_to_message_id: ObjectId,
    #[serde(default)]
    pub read: bool,
    pub reply_to: ReplyTo,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl ReplyEvent {
    pub fn new(replied_to_message_id: ObjectId, content: impl Into<String>, sender_id: ObjectId) -> Self {
        let content = content.into();
        let now = DateTime::now();

        Self {
            sender_id,
            content: content.clone(),
            timestamp: now,
            replied_to_message_id,
            read: false,
            reply_to: ReplyTo {
                message_id: replied_to_message_id,
                content,
                sender_id,
                timestamp: now,
            },
            attachments: Vec::new(),
        }
    }
}

/// 전달된 메시지
///
/// 알려진 결함: 기존 저장 데이터와 같게 `sender_id`에 실제 발신자가 아니라
/// 전달된 메시지의 ID가 들어갑니다. 제품 확인 전까지 그대로 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardEvent {
    pub sender_id: ObjectId,
    pub content: String,
    pub timestamp: DateTime,
    pub forwarded_from_message_id: ObjectId,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl ForwardEvent {
    pub const PLACEHOLDER: &'static str = "Forwarded message";

    pub fn new(message_id: ObjectId) -> Self {
        Self {
            sender_id: message_id,
            content: Self::PLACEHOLDER.to_string(),
            timestamp: DateTime::now(),
            forwarded_from_message_id: message_id,
            attachments: Vec::new(),
        }
    }
}

/// 일반 메시지. 시드 데이터처럼 시각과 읽음 여부가 없을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub sender_id: ObjectId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl TextMessage {
    pub fn new(sender_id: ObjectId, content: impl Into<String>) -> Self {
        Self {
            sender_id,
            content: content.into(),
            timestamp: Some(DateTime::now()),
            read: Some(false),
            attachments: Vec::new(),
        }
    }
}

/// 대화에 쌓이는 메시지 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEvent {
    Reply(ReplyEvent),
    Forward(ForwardEvent),
    Text(TextMessage),
}

impl ConversationEvent {
    /// 이벤트 시각 (시각이 없는 텍스트 메시지는 `None`)
    pub fn timestamp(&self) -> Option<DateTime> {
        match self {
            ConversationEvent::Reply(event) => Some(event.timestamp),
            ConversationEvent::Forward(event) => Some(event.timestamp),
            ConversationEvent::Text(event) => event.timestamp,
        }
    }
}

impl Serialize for ConversationEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConversationEvent::Reply(event) => event.serialize(serializer),
            ConversationEvent::Forward(event) => event.serialize(serializer),
            ConversationEvent::Text(event) => event.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ConversationEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Document::deserialize(deserializer)?;

        let event = if document.contains_key("replyTo") || document.contains_key("repliedToMessageId") {
            mongodb::bson::from_document(document).map(ConversationEvent::Reply)
        } else if document.contains_key("forwardedFromMessageId") {
            mongodb::bson::from_document(document).map(ConversationEvent::Forward)
        } else {
            mongodb::bson::from_document(document).map(ConversationEvent::Text)
        };

        event.map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, to_document};

    #[test]
    fn test_reply_event_snapshots_target() {
        let target = ObjectId::new();
        let sender = ObjectId::new();
        let reply = ReplyEvent::new(target, "sounds good", sender);

        assert_eq!(reply.reply_to.message_id, target);
        assert_eq!(reply.reply_to.sender_id, sender);
        assert_eq!(reply.reply_to.content, "sounds good");
        assert!(!reply.read);
        assert!(reply.attachments.is_empty());
    }

    #[test]
    fn test_forward_event_keeps_forwarded_id_as_sender() {
        let forwarded = ObjectId::new();
        let event = ForwardEvent::new(forwarded);

        assert_eq!(event.sender_id, forwarded);
        assert_eq!(event.forwarded_from_message_id, forwarded);
        assert_eq!(event.content, "Forwarded message");
    }

    #[test]
    fn test_events_are_told_apart_by_keys() {
        let reply = ConversationEvent::Reply(ReplyEvent::new(ObjectId::new(), "hi", ObjectId::new()));
        let forward = ConversationEvent::Forward(ForwardEvent::new(ObjectId::new()));
        let text = ConversationEvent::Text(TextMessage::new(ObjectId::new(), "hello"));

        let wrapped = doc! {
            "events": [
                to_document(&reply).unwrap(),
                to_document(&forward).unwrap(),
                to_document(&text).unwrap(),
            ]
        };

        #[derive(Deserialize)]
        struct Wrapper {
            events: Vec<ConversationEvent>,
        }

        let decoded: Wrapper = from_document(wrapped).unwrap();
        assert_eq!(decoded.events, vec![reply, forward, text]);
    }

    #[test]
    fn test_seeded_text_message_without_timestamp() {
        let sender = ObjectId::new();
        let document = doc! { "senderId": sender, "content": "Hello, this is a message!" };

        let event: ConversationEvent = from_document(document).unwrap();

        assert!(matches!(
            event,
            ConversationEvent::Text(text) if text.sender_id == sender && text.timestamp.is_none()
        ));
    }
}
