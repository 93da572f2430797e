use crate::domain::{models::attendance::Attendance, ports::AttendanceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteAttendanceRepo {
    pool: SqlitePool,
}

impl SqliteAttendanceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepo {
    async fn create(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendances (id, occurrence_id, person_id, rsvp, rsvp_datetime, decline_reason_id, note, did_attend, start_date_time, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&attendance.id).bind(&attendance.occurrence_id).bind(&attendance.person_id)
            .bind(attendance.rsvp).bind(attendance.rsvp_datetime).bind(&attendance.decline_reason_id)
            .bind(&attendance.note).bind(attendance.did_attend).bind(attendance.start_date_time)
            .bind(attendance.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_occurrence_and_person(
        &self,
        occurrence_id: &str,
        person_id: &str,
    ) -> Result<Option<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE occurrence_id = ? AND person_id = ?"
        )
            .bind(occurrence_id).bind(person_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, attendance: &Attendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            "UPDATE attendances
             SET rsvp = ?, rsvp_datetime = ?, decline_reason_id = ?, note = ?, did_attend = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(attendance.rsvp).bind(attendance.rsvp_datetime).bind(&attendance.decline_reason_id)
            .bind(&attendance.note).bind(attendance.did_attend)
            .bind(&attendance.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_pending_for_person(&self, person_id: &str, from: DateTime<Utc>) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT a.* FROM attendances a
             JOIN occurrences o ON o.id = a.occurrence_id
             WHERE a.person_id = ? AND a.rsvp = 'UNKNOWN' AND o.occurrence_date >= ?
             ORDER BY o.occurrence_date ASC, a.start_date_time ASC"
        )
            .bind(person_id).bind(from.date_naive())
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_confirmed_for_person(&self, person_id: &str, from: DateTime<Utc>) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT a.* FROM attendances a
             JOIN occurrences o ON o.id = a.occurrence_id
             WHERE a.person_id = ? AND a.rsvp = 'YES' AND o.occurrence_date >= ?
             ORDER BY o.occurrence_date ASC, a.start_date_time ASC"
        )
            .bind(person_id).bind(from.date_naive())
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn exists_responded(
        &self,
        occurrence_date: NaiveDate,
        schedule_id: &str,
        person_id: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) AS count FROM attendances a
             JOIN occurrences o ON o.id = a.occurrence_id
             WHERE o.occurrence_date = ? AND o.schedule_id = ? AND a.person_id = ? AND a.rsvp != 'UNKNOWN'"
        )
            .bind(occurrence_date).bind(schedule_id).bind(person_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count") > 0)
    }

    async fn list_for_group_between(
        &self,
        group_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT a.* FROM attendances a
             JOIN occurrences o ON o.id = a.occurrence_id
             WHERE o.group_id = ? AND a.start_date_time >= ? AND a.start_date_time <= ?
             ORDER BY a.start_date_time ASC"
        )
            .bind(group_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_for_person_between(
        &self,
        person_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances
             WHERE person_id = ? AND start_date_time >= ? AND start_date_time <= ?
             ORDER BY start_date_time ASC"
        )
            .bind(person_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_attended_at_location_on(
        &self,
        location_id: &str,
        occurrence_date: NaiveDate,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) AS count FROM attendances a
             JOIN occurrences o ON o.id = a.occurrence_id
             WHERE o.location_id = ? AND o.occurrence_date = ? AND a.did_attend = 1"
        )
            .bind(location_id).bind(occurrence_date)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
}
