use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Task, TaskCreate, TaskUpdate};

/// Postgres repository for tasks. All mutating queries are owner-scoped so
/// ownership is enforced at the write itself, not just by a prior read.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

const TASK_COLUMNS: &str = "id, title, description, completed, owner_id, created_at, updated_at";

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every task belonging to `owner_id`, newest first.
    pub async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Inserts a new task owned by `owner_id`. `completed`, `created_at` and
    /// `updated_at` take their database defaults.
    pub async fn insert(&self, owner_id: i32, input: TaskCreate) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Fetches a task by id regardless of owner. Callers must run the result
    /// through the ownership check before exposing it.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to a task the owner holds, refreshing
    /// `updated_at`. Returns `None` when the task does not exist or belongs to
    /// someone else; callers map that to a 404 so existence is not leaked.
    pub async fn update(
        &self,
        id: i32,
        owner_id: i32,
        changes: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 completed = COALESCE($3, completed),
                 updated_at = NOW()
             WHERE id = $4 AND owner_id = $5
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.completed)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task the owner holds. Returns false when nothing was deleted
    /// (missing or non-owned task).
    pub async fn delete_for_owner(&self, id: i32, owner_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
