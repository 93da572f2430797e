use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::services::occurrence_store::OccurrenceStore;
use crate::domain::services::response_tracker::ResponseTracker;
use crate::domain::services::signup::SignupResolver;
use crate::infra::cache::kiosk_cache::InMemoryKioskCache;
use crate::infra::recurrence::weekly_expander::WeeklyScheduleExpander;
use crate::infra::repositories::{
    sqlite_attendance_repo::SqliteAttendanceRepo, sqlite_decline_reason_repo::SqliteDeclineReasonRepo,
    sqlite_group_repo::SqliteGroupRepo, sqlite_location_repo::SqliteLocationRepo,
    sqlite_occurrence_repo::SqliteOccurrenceRepo, sqlite_person_repo::SqlitePersonRepo,
    sqlite_schedule_repo::SqliteScheduleRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    build_state(config, pool)
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let group_repo = Arc::new(SqliteGroupRepo::new(pool.clone()));
    let person_repo = Arc::new(SqlitePersonRepo::new(pool.clone()));
    let location_repo = Arc::new(SqliteLocationRepo::new(pool.clone()));
    let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
    let occurrence_repo = Arc::new(SqliteOccurrenceRepo::new(pool.clone()));
    let attendance_repo = Arc::new(SqliteAttendanceRepo::new(pool.clone()));
    let decline_reason_repo = Arc::new(SqliteDeclineReasonRepo::new(pool.clone()));
    let expander = Arc::new(WeeklyScheduleExpander);
    let kiosk_cache = Arc::new(InMemoryKioskCache::new());

    let occurrence_store = Arc::new(OccurrenceStore::new(
        group_repo.clone(),
        occurrence_repo.clone(),
        schedule_repo.clone(),
        decline_reason_repo.clone(),
        expander.clone(),
        config.future_weeks_to_show,
        config.decline_reason_category.clone(),
    ));

    let response_tracker = Arc::new(ResponseTracker::new(
        attendance_repo.clone(),
        occurrence_repo.clone(),
        schedule_repo.clone(),
        person_repo.clone(),
        kiosk_cache.clone(),
    ));

    let signup_resolver = Arc::new(SignupResolver::new(
        schedule_repo.clone(),
        attendance_repo.clone(),
        expander.clone(),
        config.future_weeks_to_show,
    ));

    AppState {
        config: config.clone(),
        group_repo,
        person_repo,
        location_repo,
        schedule_repo,
        attendance_repo,
        decline_reason_repo,
        expander,
        kiosk_cache,
        occurrence_store,
        response_tracker,
        signup_resolver,
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
