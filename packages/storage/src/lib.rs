// ABOUTME: Data layer and persistence for Taskbot
// ABOUTME: Task repository trait plus in-memory and SQLite implementations

use async_trait::async_trait;
use taskbot_core::{Task, TaskCreateInput, TaskUpdateInput};
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryTaskStorage;
pub use sqlite::SqliteTaskStorage;

// Re-exported so callers can build pools and match on driver errors
pub use sqlx;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Task {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Repository over the task collection.
///
/// Each call is atomic with respect to the record it touches; there are no
/// cross-record transactions.
#[async_trait]
pub trait TaskStorage: Send + Sync {
    /// Tasks in insertion order, plus the total number of tasks
    async fn list_tasks_paginated(&self, limit: i64, offset: i64)
        -> StorageResult<(Vec<Task>, i64)>;
    async fn create_task(&self, input: TaskCreateInput) -> StorageResult<Task>;
    async fn get_task(&self, id: i64) -> StorageResult<Task>;
    async fn update_task(&self, id: i64, input: TaskUpdateInput) -> StorageResult<Task>;
    async fn delete_task(&self, id: i64) -> StorageResult<()>;
}
