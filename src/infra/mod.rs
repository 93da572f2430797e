pub mod cache;
pub mod factory;
pub mod recurrence;
pub mod repositories;
