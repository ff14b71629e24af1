//! Message (Conversation) Aggregate
//!
//! 하나의 대화 문서가 참여자 목록과 메시지 이벤트 전체를 담습니다.
//! 이벤트 추가 시 대화 전체를 읽고 다시 씁니다. 페이지 나눔이나 읽음 집계는 없습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::info;
use crate::domain::entities::fields::{decode, object_ids, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::domain::models::{ConversationEvent, ForwardEvent, ReplyEvent, TextMessage};
use crate::errors::AppResult;
use crate::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub participants: Vec<ObjectId>,
    #[serde(default)]
    messages: Vec<ConversationEvent>,
    #[serde(default = "DateTime::now")]
    pub last_updated: DateTime,
}

/// [`Message`]의 설정 가능한 필드. 이벤트는 전용 메서드로만 추가됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageField {
    ConversationId(String),
    Participants(Vec<ObjectId>),
}

impl FieldUpdate for MessageField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "conversationId" => MessageField::ConversationId(decode(key, value)?),
            "participants" => MessageField::Participants(object_ids(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl Message {
    pub fn new(conversation_id: impl Into<String>, participants: Vec<ObjectId>) -> Self {
        Self::from_parts(conversation_id, participants, Vec::new())
    }

    /// 기존 이벤트로 대화를 구성합니다.
    ///
    /// `last_updated`는 이벤트 시각 중 가장 늦은 값이며, 시각이 있는 이벤트가 없으면 현재 시각입니다.
    pub fn from_parts(
        conversation_id: impl Into<String>,
        participants: Vec<ObjectId>,
        messages: Vec<ConversationEvent>,
    ) -> Self {
        let last_updated = messages
            .iter()
            .filter_map(ConversationEvent::timestamp)
            .max()
            .unwrap_or_else(DateTime::now);

        Self {
            id: None,
            conversation_id: conversation_id.into(),
            participants,
            messages,
            last_updated,
        }
    }

    /// 메시지 이벤트 (추가 순서)
    pub fn messages(&self) -> &[ConversationEvent] {
        &self.messages
    }

    async fn append(&mut self, store: &dyn DocumentStore, event: ConversationEvent) -> AppResult<()> {
        self.messages.push(event);
        self.persist(store).await?;

        info!(
            "대화 {:?}에 메시지 추가 (총 {}건)",
            self.id,
            self.messages.len()
        );
        Ok(())
    }

    /// 답장을 추가하고 대화를 저장합니다.
    ///
    /// 답장 대상의 스냅샷(`ReplyTo`)이 함께 저장되며 대상 메시지의 존재는 확인하지 않습니다.
    pub async fn add_reply(
        &mut self,
        store: &dyn DocumentStore,
        replied_to_message_id: ObjectId,
        content: impl Into<String> + Send,
        sender_id: ObjectId,
    ) -> AppResult<()> {
        let reply = ReplyEvent::new(replied_to_message_id, content, sender_id);
        self.append(store, ConversationEvent::Reply(reply)).await
    }

    /// 메시지 전달 이벤트를 추가하고 대화를 저장합니다.
    ///
    /// 발신자 필드에 전달된 메시지 ID가 들어갑니다 ([`ForwardEvent`] 참고).
    pub async fn forward_message(&mut self, store: &dyn DocumentStore, message_id: ObjectId) -> AppResult<()> {
        self.append(store, ConversationEvent::Forward(ForwardEvent::new(message_id)))
            .await
    }

    /// 일반 메시지를 추가하고 대화를 저장합니다.
    pub async fn post_message(
        &mut self,
        store: &dyn DocumentStore,
        sender_id: ObjectId,
        content: impl Into<String> + Send,
    ) -> AppResult<()> {
        self.append(store, ConversationEvent::Text(TextMessage::new(sender_id, content)))
            .await
    }
}

impl Entity for Message {
    const COLLECTION: Collection = Collection::Messages;
    const KIND: &'static str = "Message";

    type Field = MessageField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.last_updated = now;
    }

    fn apply_field(&mut self, field: MessageField) {
        match field {
            MessageField::ConversationId(id) => self.conversation_id = id,
            MessageField::Participants(participants) => self.participants = participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use mongodb::bson::doc;

    fn sample() -> Message {
        Message::new("conv-1", vec![ObjectId::new(), ObjectId::new()])
    }

    #[test]
    fn test_document_round_trip_with_every_event_kind() {
        let sender = ObjectId::new();
        let mut message = Message::from_parts(
            "conv-1",
            vec![sender],
            vec![
                ConversationEvent::Text(TextMessage::new(sender, "hello")),
                ConversationEvent::Reply(ReplyEvent::new(ObjectId::new(), "hi back", sender)),
                ConversationEvent::Forward(ForwardEvent::new(ObjectId::new())),
            ],
        );
        message.id = Some(ObjectId::new());

        let restored = Message::from_document(message.to_document().unwrap()).unwrap();
        assert_eq!(restored, message);
    }

    #[test]
    fn test_last_updated_is_latest_event_timestamp() {
        let early = DateTime::from_millis(1_700_000_000_000);
        let late = DateTime::from_millis(1_700_000_600_000);
        let mut first = TextMessage::new(ObjectId::new(), "first");
        first.timestamp = Some(late);
        let mut second = TextMessage::new(ObjectId::new(), "second");
        second.timestamp = Some(early);

        let message = Message::from_parts(
            "conv-2",
            Vec::new(),
            vec![ConversationEvent::Text(first), ConversationEvent::Text(second)],
        );

        assert_eq!(message.last_updated, late);
    }

    #[test]
    fn test_seeded_document_loads() {
        let document = doc! {
            "_id": ObjectId::new(),
            "conversationId": "some_conversation_id",
            "participants": [ObjectId::new(), ObjectId::new()],
            "messages": [{ "senderId": ObjectId::new(), "content": "Hello, this is a message!" }],
            "lastUpdated": DateTime::now(),
        };

        let message = Message::from_document(document).unwrap();
        assert_eq!(message.messages().len(), 1);
        assert!(matches!(message.messages()[0], ConversationEvent::Text(_)));
    }

    #[actix_web::test]
    async fn test_add_reply_appends_one_event_with_snapshot() {
        let store = MemoryStore::new();
        let mut message = sample();
        message.persist(&store).await.unwrap();
        message.post_message(&store, ObjectId::new(), "first").await.unwrap();

        let target = ObjectId::new();
        let sender = ObjectId::new();
        let before = message.messages().len();
        message.add_reply(&store, target, "reply", sender).await.unwrap();

        let loaded = Message::load_by_id(&store, message.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.messages().len(), before + 1);
        match loaded.messages().last() {
            Some(ConversationEvent::Reply(reply)) => {
                assert_eq!(reply.reply_to.message_id, target);
                assert_eq!(reply.replied_to_message_id, target);
                assert_eq!(reply.sender_id, sender);
                assert!(!reply.read);
            }
            other => panic!("expected reply event, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_forward_message_uses_placeholder() {
        let store = MemoryStore::new();
        let mut message = sample();
        message.persist(&store).await.unwrap();

        let forwarded = ObjectId::new();
        message.forward_message(&store, forwarded).await.unwrap();

        let loaded = Message::load_by_id(&store, message.id.unwrap()).await.unwrap().unwrap();
        match loaded.messages().last() {
            Some(ConversationEvent::Forward(event)) => {
                assert_eq!(event.content, "Forwarded message");
                assert_eq!(event.forwarded_from_message_id, forwarded);
                assert_eq!(event.sender_id, forwarded);
            }
            other => panic!("expected forward event, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_appending_refreshes_last_updated() {
        let store = MemoryStore::new();
        let mut message = sample();
        message.last_updated = DateTime::from_millis(0);

        message.post_message(&store, ObjectId::new(), "hello").await.unwrap();

        assert!(message.last_updated > DateTime::from_millis(0));
        assert!(message.id.is_some());
    }
}
