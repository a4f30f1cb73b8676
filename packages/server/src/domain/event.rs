//! Board events pushed to subscribers.
//!
//! Every variant describes a change that has already been persisted by the
//! request-processing layer. Payloads mirror the current representation of
//! the changed record, or only its identifier for deletions. The board the
//! event belongs to travels next to the event, not inside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{entity::PresenceStatus, value_object::UserId};

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Role of a board member. The owner is not a member role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Viewer,
    #[default]
    Editor,
    Admin,
}

/// Public profile fields of a user referenced by a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Current state of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default = "default_task_status")]
    pub status: String,
    pub column_id: String,
    #[serde(default)]
    pub assignee: Option<UserSummary>,
    pub creator: UserSummary,
    pub order: u32,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_task_status() -> String {
    "todo".to_string()
}

/// A task changing column and/or position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    pub task_id: String,
    pub old_column_id: String,
    pub new_column_id: String,
    pub new_order: u32,
}

/// Current state of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSnapshot {
    pub id: String,
    pub name: String,
    pub order: u32,
    #[serde(default)]
    pub task_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    #[serde(default = "default_true")]
    pub allow_member_invites: bool,
    #[serde(default)]
    pub require_approval_for_tasks: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            allow_member_invites: true,
            require_approval_for_tasks: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Current board-level fields (members, columns and tasks travel in their own events)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub settings: BoardSettings,
}

/// A change on one board, tagged by `type` with the data under `payload`.
///
/// Mutation events use camelCase names and payload keys (`taskMoved`,
/// `{"taskId": ...}`), the names board clients already listen for.
/// Presence keeps the socket-level `user-presence` name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum BoardEvent {
    TaskCreated(TaskSnapshot),
    TaskUpdated(TaskSnapshot),
    TaskDeleted { task_id: String },
    TaskMoved(TaskMove),
    ColumnAdded(ColumnSnapshot),
    ColumnUpdated(ColumnSnapshot),
    ColumnDeleted { column_id: String },
    ColumnsReordered { column_ids: Vec<String> },
    BoardUpdated(BoardSnapshot),
    BoardDeleted,
    MemberRemoved { user_id: UserId },
    MemberRoleUpdated { user_id: UserId, role: MemberRole },
    #[serde(rename = "user-presence")]
    UserPresence { user_id: UserId, status: PresenceStatus },
}

impl BoardEvent {
    /// Wire name of the event (`type` tag)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskCreated(_) => "taskCreated",
            Self::TaskUpdated(_) => "taskUpdated",
            Self::TaskDeleted { .. } => "taskDeleted",
            Self::TaskMoved(_) => "taskMoved",
            Self::ColumnAdded(_) => "columnAdded",
            Self::ColumnUpdated(_) => "columnUpdated",
            Self::ColumnDeleted { .. } => "columnDeleted",
            Self::ColumnsReordered { .. } => "columnsReordered",
            Self::BoardUpdated(_) => "boardUpdated",
            Self::BoardDeleted => "boardDeleted",
            Self::MemberRemoved { .. } => "memberRemoved",
            Self::MemberRoleUpdated { .. } => "memberRoleUpdated",
            Self::UserPresence { .. } => "user-presence",
        }
    }

    pub fn presence(user_id: UserId, status: PresenceStatus) -> Self {
        Self::UserPresence { user_id, status }
    }
}
