use std::sync::Arc;
use crate::domain::ports::{
    AttendanceRepository, DeclineReasonRepository, GroupRepository, KioskAttendanceCache,
    LocationRepository, OccurrenceExpander, PersonRepository, ScheduleRepository,
};
use crate::domain::services::occurrence_store::OccurrenceStore;
use crate::domain::services::response_tracker::ResponseTracker;
use crate::domain::services::signup::SignupResolver;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub group_repo: Arc<dyn GroupRepository>,
    pub person_repo: Arc<dyn PersonRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub decline_reason_repo: Arc<dyn DeclineReasonRepository>,
    pub expander: Arc<dyn OccurrenceExpander>,
    pub kiosk_cache: Arc<dyn KioskAttendanceCache>,
    pub occurrence_store: Arc<OccurrenceStore>,
    pub response_tracker: Arc<ResponseTracker>,
    pub signup_resolver: Arc<SignupResolver>,
}
