pub mod analytics;
pub mod attendance;
pub mod decline_reason;
pub mod group;
pub mod health;
pub mod location;
pub mod occurrence;
pub mod person;
pub mod schedule;
pub mod signup;
