// ABOUTME: Core types and validation for Taskbot
// ABOUTME: Foundational package shared by the task store, its storage backends and the bot client

pub mod constants;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{Task, TaskCreateInput, TaskUpdateInput};

// Re-export constants
pub use constants::{DUE_DATE_FORMAT, PAGE_SIZE, TITLE_MAX_LENGTH};

// Re-export validation
pub use validation::{
    parse_due_date, validate_task_create, validate_task_update, ValidationErrors,
    NON_FIELD_ERRORS,
};
