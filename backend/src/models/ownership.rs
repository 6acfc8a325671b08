//! Resource ownership.
//!
//! Boards and tasks belong either to a single user (personal resources) or
//! to a workspace (shared with its members). The owner is stored as a tagged
//! value, `{"kind": "user" | "workspace", "id": "<uuid>"}`, so the two cases
//! can never be confused.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a board or task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Owner {
    User(Uuid),
    Workspace(Uuid),
}

impl Owner {
    pub fn id(&self) -> Uuid {
        match self {
            Owner::User(id) | Owner::Workspace(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Owner::User(_) => "user",
            Owner::Workspace(_) => "workspace",
        }
    }

    pub fn workspace_id(&self) -> Option<Uuid> {
        match self {
            Owner::Workspace(id) => Some(*id),
            Owner::User(_) => None,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Which set of resources a request addresses, chosen by the route
///
/// `/boards` is `Personal`, `/workspaces/{workspace_id}/boards` is `Workspace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Personal,
    Workspace(Uuid),
}

impl Scope {
    pub fn workspace_id(&self) -> Option<Uuid> {
        match self {
            Scope::Workspace(id) => Some(*id),
            Scope::Personal => None,
        }
    }
}

/// Implemented by every resource that carries an `Owner`
pub trait OwnedResource {
    /// Human-readable resource name used in error messages ("Board", "Task").
    const RESOURCE: &'static str;

    fn id(&self) -> Uuid;

    fn owned_by(&self) -> Owner;
}
