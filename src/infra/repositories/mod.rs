pub mod sqlite_attendance_repo;
pub mod sqlite_decline_reason_repo;
pub mod sqlite_group_repo;
pub mod sqlite_location_repo;
pub mod sqlite_occurrence_repo;
pub mod sqlite_person_repo;
pub mod sqlite_schedule_repo;
