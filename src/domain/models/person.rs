use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Person {
    pub id: String,
    pub nick_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(nick_name: String, last_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            nick_name,
            last_name,
            created_at: Utc::now(),
        }
    }
}
