//! Upcoming action domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingAction {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl UpcomingAction {
    pub fn new(client_id: Uuid, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            title,
            created_at: Utc::now(),
        }
    }
}
