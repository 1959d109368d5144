// ABOUTME: HTTP API layer for the Taskbot task store providing REST endpoints and routing
// ABOUTME: Maps the task repository onto /tasks/ list/create/retrieve/update/delete endpoints

use std::sync::Arc;

use axum::{routing::get, Router};
use taskbot_storage::TaskStorage;

pub mod error;
pub mod health;
pub mod pagination;
pub mod tasks_handlers;

pub use error::{ApiResult, AppError};

/// Shared handler state
#[derive(Clone)]
pub struct DbState {
    pub task_storage: Arc<dyn TaskStorage>,
}

impl DbState {
    pub fn new(task_storage: Arc<dyn TaskStorage>) -> Self {
        Self { task_storage }
    }
}

/// Creates the task store router
pub fn create_router(state: DbState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/tasks/",
            get(tasks_handlers::list_tasks).post(tasks_handlers::create_task),
        )
        .route(
            "/tasks/{task_id}/",
            get(tasks_handlers::get_task)
                .put(tasks_handlers::replace_task)
                .patch(tasks_handlers::update_task)
                .delete(tasks_handlers::delete_task),
        )
        .with_state(state)
}
