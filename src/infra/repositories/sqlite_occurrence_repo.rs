use crate::domain::{models::occurrence::Occurrence, ports::OccurrenceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteOccurrenceRepo {
    pool: SqlitePool,
}

impl SqliteOccurrenceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OccurrenceRepository for SqliteOccurrenceRepo {
    async fn create(&self, occurrence: &Occurrence) -> Result<Occurrence, AppError> {
        sqlx::query_as::<_, Occurrence>(
            "INSERT INTO occurrences (id, group_id, location_id, schedule_id, occurrence_date, accept_message, decline_message, show_decline_reasons, decline_reason_ids, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&occurrence.id).bind(&occurrence.group_id).bind(&occurrence.location_id).bind(&occurrence.schedule_id)
            .bind(occurrence.occurrence_date).bind(&occurrence.accept_message).bind(&occurrence.decline_message)
            .bind(occurrence.show_decline_reasons).bind(&occurrence.decline_reason_ids).bind(occurrence.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Occurrence>, AppError> {
        sqlx::query_as::<_, Occurrence>("SELECT * FROM occurrences WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_natural_key(
        &self,
        group_id: &str,
        occurrence_date: NaiveDate,
        location_id: Option<&str>,
        schedule_id: Option<&str>,
    ) -> Result<Option<Occurrence>, AppError> {
        // IS instead of = so a missing location/schedule matches null.
        sqlx::query_as::<_, Occurrence>(
            "SELECT * FROM occurrences
             WHERE group_id = ? AND occurrence_date = ? AND location_id IS ? AND schedule_id IS ?"
        )
            .bind(group_id).bind(occurrence_date).bind(location_id).bind(schedule_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_for_group_between(
        &self,
        group_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Occurrence>, AppError> {
        sqlx::query_as::<_, Occurrence>(
            "SELECT * FROM occurrences
             WHERE group_id = ? AND occurrence_date >= ? AND occurrence_date <= ?
             ORDER BY occurrence_date ASC"
        )
            .bind(group_id).bind(from).bind(to)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_settings(&self, occurrence: &Occurrence) -> Result<Occurrence, AppError> {
        sqlx::query_as::<_, Occurrence>(
            "UPDATE occurrences
             SET accept_message = ?, decline_message = ?, show_decline_reasons = ?, decline_reason_ids = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&occurrence.accept_message).bind(&occurrence.decline_message)
            .bind(occurrence.show_decline_reasons).bind(&occurrence.decline_reason_ids)
            .bind(&occurrence.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
