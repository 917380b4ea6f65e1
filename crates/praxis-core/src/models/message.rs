use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, PortalVisible, Record};

/// A secure conversation between a provider and one client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MessageThread {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: ThreadFields,
    pub last_message_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct ThreadFields {
    pub client_id: Uuid,
    pub subject: String,
}

/// One message within a thread.
///
/// `user_id` and `client_id` are copied from the thread so that messages can
/// be scoped without loading their thread.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Message {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub user_id: String,
    pub client_id: Uuid,
    pub sender_type: SenderType,
    pub body: String,
    pub read_by_provider: bool,
    pub read_by_client: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SenderType {
    Provider,
    Client,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MessageDraft {
    pub body: String,
}

impl Draft for MessageDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("body", &self.body)
    }
}

impl Message {
    /// A new message, already read by whoever sent it.
    pub fn new(thread: &MessageThread, sender_type: SenderType, body: String, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id: thread.id,
            user_id: thread.user_id.clone(),
            client_id: thread.details.client_id,
            sender_type,
            body,
            read_by_provider: sender_type == SenderType::Provider,
            read_by_client: sender_type == SenderType::Client,
            created_at: now,
        }
    }

    /// Whether the given side still has to read this message.
    pub fn unread_by(&self, reader: SenderType) -> bool {
        match reader {
            SenderType::Provider => !self.read_by_provider,
            SenderType::Client => !self.read_by_client,
        }
    }

    pub fn mark_read_by(&mut self, reader: SenderType) {
        match reader {
            SenderType::Provider => self.read_by_provider = true,
            SenderType::Client => self.read_by_client = true,
        }
    }
}

impl MessageThread {
    pub fn touch(&mut self, now: Timestamp) {
        self.last_message_at = Some(now);
        self.updated_at = now;
    }
}

impl Draft for ThreadFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("subject", &self.subject)
    }

    fn client_ref(&self) -> Option<Uuid> {
        Some(self.client_id)
    }
}

impl Record for MessageThread {
    const COLLECTION: &'static str = "threads";
    const KIND: &'static str = "message_thread";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for MessageThread {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl PortalVisible for MessageThread {
    fn linked_client(&self) -> Option<Uuid> {
        Some(self.details.client_id)
    }
}

impl Editable for MessageThread {
    type Fields = ThreadFields;

    fn create(id: Uuid, user_id: String, details: ThreadFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            last_message_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &ThreadFields {
        &self.details
    }

    fn apply(&mut self, details: ThreadFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}

impl Record for Message {
    const COLLECTION: &'static str = "messages";
    const KIND: &'static str = "message";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Message {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
