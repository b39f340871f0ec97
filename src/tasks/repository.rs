use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::tasks::{models::Task, query::TaskFilter};

/// Persistence contract for tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, title: &str, description: &str) -> Result<Task, StoreError>;

    /// One page, filtered and sorted per `filter`
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Count of tasks matching the `completed` filter
    async fn count(&self, completed: Option<bool>) -> Result<i64, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Persist title/description/completed; `None` if the row is gone
    async fn update(&self, task: &Task) -> Result<Option<Task>, StoreError>;

    /// `false` when no row had that id
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Repository for database operations on tasks
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, title: &str, description: &str) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        // Sort column and direction come from closed enums, never from input text
        let query = format!(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE ($1::BOOLEAN IS NULL OR completed = $1)
            ORDER BY {} {}, id ASC
            LIMIT $2 OFFSET $3
            "#,
            filter.sort.column(),
            filter.order.keyword(),
        );

        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(filter.completed)
            .bind(i64::from(filter.limit))
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn count(&self, completed: Option<bool>) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasks WHERE ($1::BOOLEAN IS NULL OR completed = $1)",
        )
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, completed, created_at, updated_at FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, StoreError> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, completed = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
