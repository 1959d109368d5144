// ABOUTME: Translates task store responses into reply text
// ABOUTME: Status-code to message mapping for every command that calls the store

use reqwest::StatusCode;
use taskbot_core::Task;
use tracing::warn;

use crate::client::{ApiResponse, ClientError};
use crate::messages;

type StoreResult<T> = Result<ApiResponse<T>, ClientError>;

/// Unwrap a store result, logging transport failures; `None` means "generic failure"
fn settle<T>(result: StoreResult<T>) -> Option<ApiResponse<T>> {
    match result {
        Ok(response) => Some(response),
        Err(e) => {
            warn!("Task store request failed: {}", e);
            None
        }
    }
}

/// `<id>. <title> (<due_date>)`
pub fn format_task_line(task: &Task) -> String {
    format!("{}. {} ({})", task.id, task.title, task.due_date)
}

pub fn format_task_details(task: &Task) -> String {
    let status = if task.completed {
        messages::STATUS_DONE
    } else {
        messages::STATUS_NOT_DONE
    };
    format!(
        "Task {}:\n\nTitle: {}\nDescription: {}\nDue date: {}\nStatus: {}",
        task.id, task.title, task.description, task.due_date, status
    )
}

pub fn render_created(result: StoreResult<()>) -> String {
    match settle(result) {
        Some(response) if response.status == StatusCode::CREATED => messages::CREATE_OK.to_string(),
        _ => messages::CREATE_FAILED.to_string(),
    }
}

pub fn render_list(result: StoreResult<Vec<Task>>) -> String {
    match settle(result) {
        Some(ApiResponse {
            status,
            body: Some(tasks),
        }) if status == StatusCode::OK => {
            if tasks.is_empty() {
                messages::LIST_EMPTY.to_string()
            } else {
                tasks
                    .iter()
                    .map(format_task_line)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
        _ => messages::LIST_FAILED.to_string(),
    }
}

pub fn render_task(result: StoreResult<Task>) -> String {
    match settle(result) {
        Some(ApiResponse {
            status,
            body: Some(task),
        }) if status == StatusCode::OK => format_task_details(&task),
        Some(response) if response.status == StatusCode::NOT_FOUND => {
            messages::TASK_NOT_FOUND.to_string()
        }
        _ => messages::VIEW_FAILED.to_string(),
    }
}

/// Shared by `/update` and `/complete`, which differ only in wording
pub fn render_updated(result: StoreResult<()>, success: &str, failure: &str) -> String {
    match settle(result) {
        Some(response) if response.status == StatusCode::OK => success.to_string(),
        Some(response) if response.status == StatusCode::NOT_FOUND => {
            messages::TASK_NOT_FOUND.to_string()
        }
        _ => failure.to_string(),
    }
}

pub fn render_deleted(result: StoreResult<()>) -> String {
    match settle(result) {
        Some(response) if response.status == StatusCode::NO_CONTENT => {
            messages::DELETE_OK.to_string()
        }
        Some(response) if response.status == StatusCode::NOT_FOUND => {
            messages::TASK_NOT_FOUND.to_string()
        }
        _ => messages::DELETE_FAILED.to_string(),
    }
}
