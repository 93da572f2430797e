use crate::domain::{models::group::Group, ports::GroupRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGroupRepo {
    pool: SqlitePool,
}

impl SqliteGroupRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for SqliteGroupRepo {
    async fn create(&self, group: &Group) -> Result<Group, AppError> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (id, name, created_at) VALUES (?, ?, ?) RETURNING *"
        )
            .bind(&group.id).bind(&group.name).bind(group.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Group>, AppError> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Group>, AppError> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn add_member(&self, group_id: &str, person_id: &str) -> Result<(), AppError> {
        sqlx::query("INSERT OR IGNORE INTO group_members (group_id, person_id) VALUES (?, ?)")
            .bind(group_id).bind(person_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
