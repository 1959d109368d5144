// ABOUTME: Task storage layer using SQLite
// ABOUTME: Persistent backend with embedded migrations and single-statement updates

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use taskbot_core::{Task, TaskCreateInput, TaskUpdateInput};
use tracing::{debug, info};

use crate::{StorageError, StorageResult, TaskStorage};

const MAX_CONNECTIONS: u32 = 10;

pub struct SqliteTaskStorage {
    pool: SqlitePool,
}

impl SqliteTaskStorage {
    /// Open (creating if needed) the database at `database_url` and run migrations
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        info!("Connected to task database at {}", database_url);
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running migrations first
    pub async fn from_pool(pool: SqlitePool) -> StorageResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    fn row_to_task(row: &SqliteRow) -> StorageResult<Task> {
        Ok(Task {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            due_date: row.try_get::<NaiveDate, _>("due_date")?,
            completed: row.try_get("completed")?,
        })
    }
}

#[async_trait]
impl TaskStorage for SqliteTaskStorage {
    async fn list_tasks_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> StorageResult<(Vec<Task>, i64)> {
        debug!("Fetching tasks (limit: {}, offset: {})", limit, offset);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, due_date, completed
            FROM tasks
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let tasks = rows
            .iter()
            .map(Self::row_to_task)
            .collect::<StorageResult<Vec<_>>>()?;
        Ok((tasks, count))
    }

    async fn create_task(&self, input: TaskCreateInput) -> StorageResult<Task> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (title, description, due_date, completed)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(input.completed)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created task: {}", id);
        Ok(input.into_task(id))
    }

    async fn get_task(&self, id: i64) -> StorageResult<Task> {
        debug!("Fetching task: {}", id);

        let row = sqlx::query(
            "SELECT id, title, description, due_date, completed FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(id))?;

        Self::row_to_task(&row)
    }

    async fn update_task(&self, id: i64, input: TaskUpdateInput) -> StorageResult<Task> {
        debug!("Updating task: {}", id);

        if input.is_empty() {
            return self.get_task(id).await;
        }

        // One statement, so concurrent partial updates of the same row cannot
        // overwrite each other's fields
        let row = sqlx::query(
            r#"
            UPDATE tasks SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                due_date = COALESCE(?, due_date),
                completed = COALESCE(?, completed)
            WHERE id = ?
            RETURNING id, title, description, due_date, completed
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.due_date)
        .bind(input.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound(id))?;

        Self::row_to_task(&row)
    }

    async fn delete_task(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting task: {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}
