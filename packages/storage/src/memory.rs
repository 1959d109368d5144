// ABOUTME: In-memory task storage
// ABOUTME: Non-persistent backend used for tests and DATABASE_URL=memory

use std::collections::BTreeMap;

use async_trait::async_trait;
use taskbot_core::{Task, TaskCreateInput, TaskUpdateInput};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{StorageError, StorageResult, TaskStorage};

#[derive(Debug)]
struct MemoryState {
    // Ids are handed out in increasing order, so key order is insertion order
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryTaskStorage {
    state: RwLock<MemoryState>,
}

impl InMemoryTaskStorage {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryTaskStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStorage for InMemoryTaskStorage {
    async fn list_tasks_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> StorageResult<(Vec<Task>, i64)> {
        debug!("Fetching tasks (limit: {}, offset: {})", limit, offset);

        let state = self.state.read().await;
        let tasks = state
            .tasks
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((tasks, state.tasks.len() as i64))
    }

    async fn create_task(&self, input: TaskCreateInput) -> StorageResult<Task> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        debug!("Creating task: {}", id);
        let task = input.into_task(id);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: i64) -> StorageResult<Task> {
        debug!("Fetching task: {}", id);

        self.state
            .read()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn update_task(&self, id: i64, input: TaskUpdateInput) -> StorageResult<Task> {
        debug!("Updating task: {}", id);

        let mut state = self.state.write().await;
        let task = state.tasks.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        task.apply(input);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> StorageResult<()> {
        debug!("Deleting task: {}", id);

        self.state
            .write()
            .await
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }
}
