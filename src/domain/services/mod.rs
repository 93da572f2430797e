pub mod analytics;
pub mod occurrence_store;
pub mod response_tracker;
pub mod signup;
