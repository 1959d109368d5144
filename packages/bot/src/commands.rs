// ABOUTME: Command-line parsing for chat messages
// ABOUTME: Splits "/name args..." and turns argument lists into typed command arguments

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing arguments")]
    MissingArguments,
    #[error("task id must be an integer, got {0:?}")]
    InvalidTaskId(String),
    #[error("unexpected extra arguments")]
    UnexpectedArguments,
}

/// A message that looks like a bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// Lower-cased command name without the leading slash or `@botname` suffix
    pub name: String,
    pub args: Vec<&'a str>,
}

/// Split a message into command name and whitespace-separated arguments.
///
/// Returns `None` for anything that is not a `/command`.
pub fn parse_command_line(text: &str) -> Option<CommandLine<'_>> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;
    let name = head.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    Some(CommandLine {
        name: name.to_lowercase(),
        args: tokens.collect(),
    })
}

/// Arguments of `/create <title> <description...> <due_date>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl CreateArgs {
    /// First token is the title, last the due date, the rest the description
    pub fn parse(args: &[&str]) -> Result<Self, UsageError> {
        match args {
            [title, middle @ .., due_date] => Ok(Self {
                title: title.to_string(),
                description: middle.join(" "),
                due_date: due_date.to_string(),
            }),
            _ => Err(UsageError::MissingArguments),
        }
    }
}

/// Arguments of `/update <task_id> <new_title>`; tokens after the title are ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    pub task_id: i64,
    pub title: String,
}

impl UpdateArgs {
    pub fn parse(args: &[&str]) -> Result<Self, UsageError> {
        match args {
            [task_id, title, ..] => Ok(Self {
                task_id: parse_id(task_id)?,
                title: title.to_string(),
            }),
            _ => Err(UsageError::MissingArguments),
        }
    }
}

/// Exactly one integer argument, as taken by `/view`, `/complete` and `/delete`
pub fn parse_task_id(args: &[&str]) -> Result<i64, UsageError> {
    match args {
        [] => Err(UsageError::MissingArguments),
        [task_id] => parse_id(task_id),
        _ => Err(UsageError::UnexpectedArguments),
    }
}

fn parse_id(raw: &str) -> Result<i64, UsageError> {
    raw.parse::<i64>()
        .map_err(|_| UsageError::InvalidTaskId(raw.to_string()))
}
