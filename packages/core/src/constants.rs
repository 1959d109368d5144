/// Maximum number of characters accepted for a task title
pub const TITLE_MAX_LENGTH: usize = 255;

/// Wire and storage format of `due_date`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of tasks returned per page by the list endpoint
pub const PAGE_SIZE: i64 = 10;
