use crate::domain::{models::decline_reason::DeclineReason, ports::DeclineReasonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDeclineReasonRepo {
    pool: SqlitePool,
}

impl SqliteDeclineReasonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeclineReasonRepository for SqliteDeclineReasonRepo {
    async fn create(&self, reason: &DeclineReason) -> Result<DeclineReason, AppError> {
        sqlx::query_as::<_, DeclineReason>(
            "INSERT INTO decline_reasons (id, category, value, is_active, sort_order, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&reason.id).bind(&reason.category).bind(&reason.value)
            .bind(reason.is_active).bind(reason.sort_order).bind(reason.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DeclineReason>, AppError> {
        sqlx::query_as::<_, DeclineReason>("SELECT * FROM decline_reasons WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active(&self, category: &str) -> Result<Vec<DeclineReason>, AppError> {
        sqlx::query_as::<_, DeclineReason>(
            "SELECT * FROM decline_reasons WHERE category = ? AND is_active = 1 ORDER BY sort_order, value"
        )
            .bind(category).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
