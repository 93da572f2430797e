use crate::domain::{models::person::Person, ports::PersonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePersonRepo {
    pool: SqlitePool,
}

impl SqlitePersonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepo {
    async fn create(&self, person: &Person) -> Result<Person, AppError> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO people (id, nick_name, last_name, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&person.id).bind(&person.nick_name).bind(&person.last_name).bind(person.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Person>, AppError> {
        sqlx::query_as::<_, Person>("SELECT * FROM people WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
