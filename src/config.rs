use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub future_weeks_to_show: i64, // weeks of signup slots offered to a person
    pub decline_reason_category: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            future_weeks_to_show: env::var("FUTURE_WEEKS_TO_SHOW").unwrap_or_else(|_| "6".to_string()).parse().expect("FUTURE_WEEKS_TO_SHOW must be a number"),
            decline_reason_category: env::var("DECLINE_REASON_CATEGORY").unwrap_or_else(|_| "GROUP_SCHEDULE_DECLINE_REASON".to_string()),
        }
    }
}
