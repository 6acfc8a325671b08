use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ownership::{OwnedResource, Owner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub board_id: Uuid,
    pub owned_by: Owner,
    /// User who created the task; informational only
    pub author_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Task {
    const RESOURCE: &'static str = "Task";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owned_by(&self) -> Owner {
        self.owned_by
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub board_id: Uuid,
    pub owned_by: Owner,
    pub author_id: Uuid,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "board")]
    pub board_id: Uuid,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    /// `true` stamps `completed_at`, `false` clears it
    pub completed: Option<bool>,
    /// Moves the task to another board with the same owner
    #[serde(alias = "board")]
    pub board_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    #[serde(alias = "board")]
    pub board_id: Option<Uuid>,
}
