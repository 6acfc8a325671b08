use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of kick and promote requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberTargetRequest {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTaskRequest {
    #[serde(alias = "taskId")]
    pub task_id: Uuid,
    #[serde(alias = "userId")]
    pub user_id: Uuid,
}

/// A freshly minted workspace invite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInvite {
    pub workspace_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
