use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::draft::{self, Draft};
use crate::error::ValidationError;
use crate::record::{Editable, Owned, Record};

/// A practice to-do item, optionally about one client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Task {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub details: TaskFields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl Draft for TaskFields {
    fn validate(&self) -> Result<(), ValidationError> {
        draft::require_text("title", &self.title)
    }

    fn client_ref(&self) -> Option<Uuid> {
        self.client_id
    }
}

impl Record for Task {
    const COLLECTION: &'static str = "tasks";
    const KIND: &'static str = "task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Owned for Task {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Editable for Task {
    type Fields = TaskFields;

    fn create(id: Uuid, user_id: String, details: TaskFields, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    fn fields(&self) -> &TaskFields {
        &self.details
    }

    fn apply(&mut self, details: TaskFields, now: Timestamp) {
        self.details = details;
        self.updated_at = now;
    }
}
