use crate::domain::{models::schedule::{Schedule, SignupScheduleRow}, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (id, group_id, location_id, name, weekday, start_time, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&schedule.id).bind(&schedule.group_id).bind(&schedule.location_id).bind(&schedule.name)
            .bind(schedule.weekday).bind(&schedule.start_time).bind(schedule.is_active).bind(schedule.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_by_group(&self, group_id: &str) -> Result<Vec<Schedule>, AppError> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE group_id = ? AND is_active = 1 ORDER BY weekday, start_time"
        )
            .bind(group_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_signup_schedules_for_person(&self, person_id: &str) -> Result<Vec<SignupScheduleRow>, AppError> {
        sqlx::query_as::<_, SignupScheduleRow>(
            "SELECT g.id AS group_id, g.name AS group_name,
                    l.id AS location_id, l.name AS location_name,
                    s.id AS schedule_id, s.name AS schedule_name,
                    s.weekday, s.start_time
             FROM group_members gm
             JOIN groups g ON g.id = gm.group_id
             JOIN schedules s ON s.group_id = g.id AND s.is_active = 1
             JOIN locations l ON l.id = s.location_id AND l.is_active = 1
             WHERE gm.person_id = ?
             ORDER BY g.name, s.weekday, s.start_time, l.name"
        )
            .bind(person_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
