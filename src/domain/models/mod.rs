pub mod attendance;
pub mod decline_reason;
pub mod group;
pub mod location;
pub mod occurrence;
pub mod person;
pub mod schedule;
