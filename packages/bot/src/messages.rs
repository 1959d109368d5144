// Reply texts sent back to the user

pub const WELCOME: &str =
    "Hi, I'm a task management bot. For a list of available commands, type /help.";

pub const HELP: &str = "List of available commands:
/create <title> <description> <due_date> - create a new task. Date format: YYYY-MM-DD.
/list - display the list of all tasks.
/view <task_id> - view a specific task by its identifier.
/update <task_id> <new_title> - update the task title.
/complete <task_id> - mark the task as completed.
/delete <task_id> - delete a task.";

pub const TASK_NOT_FOUND: &str = "Task not found.";

pub const CREATE_OK: &str = "The task has been successfully created.";
pub const CREATE_FAILED: &str = "Failed to create a task.";
pub const CREATE_USAGE: &str =
    "Incorrect entry of the /create command. Example: /create <title> <description> <due_date>";

pub const LIST_EMPTY: &str = "The task list is empty.";
pub const LIST_FAILED: &str = "Failed to get the task list.";

pub const VIEW_FAILED: &str = "Failed to get task information.";
pub const VIEW_USAGE: &str = "Incorrect entry of the /view command. Example: /view <task_id>";

pub const UPDATE_OK: &str = "The task title has been successfully updated.";
pub const UPDATE_FAILED: &str = "Failed to update the task title.";
pub const UPDATE_USAGE: &str =
    "Incorrect entry of the /update command. Example: /update <task_id> <new_title>";

pub const COMPLETE_OK: &str = "The task is marked as completed.";
pub const COMPLETE_FAILED: &str = "It was not possible to mark the task as completed.";
pub const COMPLETE_USAGE: &str =
    "Incorrect entry of the /complete command. Example: /complete <task_id>";

pub const DELETE_OK: &str = "The task has been successfully deleted.";
pub const DELETE_FAILED: &str = "The task could not be deleted.";
pub const DELETE_USAGE: &str = "Incorrect entry of the /delete command. Example: /delete <task_id>";

pub const STATUS_DONE: &str = "Done";
pub const STATUS_NOT_DONE: &str = "Not done";
