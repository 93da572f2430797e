use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Catalog entry explaining why a person declined an occurrence. Reasons are
/// grouped into categories so different scheduling surfaces can carry their
/// own lists.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DeclineReason {
    pub id: String,
    pub category: String,
    pub value: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl DeclineReason {
    pub fn new(category: String, value: String, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            value,
            is_active: true,
            sort_order,
            created_at: Utc::now(),
        }
    }
}
