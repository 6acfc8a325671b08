use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ownership::{OwnedResource, Owner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub owned_by: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for Board {
    const RESOURCE: &'static str = "Board";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owned_by(&self) -> Owner {
        self.owned_by
    }
}

#[derive(Debug, Clone)]
pub struct NewBoard {
    pub name: String,
    pub owned_by: Owner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBoardRequest {
    pub name: String,
}
