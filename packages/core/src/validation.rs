// ABOUTME: Field-level validation of task payloads
// ABOUTME: Turns untrusted JSON bodies into create/update inputs or per-field error lists

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::{DUE_DATE_FORMAT, TITLE_MAX_LENGTH};
use crate::types::{TaskCreateInput, TaskUpdateInput};

/// Key used for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_NOT_BOOLEAN: &str = "Must be a valid boolean.";
const MSG_BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

const TRUE_VALUES: &[&str] = &["t", "y", "yes", "true", "on", "1"];
const FALSE_VALUES: &[&str] = &["f", "n", "no", "false", "off", "0"];

/// Validation failures keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).ok()
}

/// Validate a full create payload
pub fn validate_task_create(body: &Value) -> Result<TaskCreateInput, ValidationErrors> {
    let fields = FieldSet::read(body, true)?;
    match (fields.title, fields.description, fields.due_date) {
        (Some(title), Some(description), Some(due_date)) => Ok(TaskCreateInput {
            title,
            description,
            due_date,
            completed: fields.completed.unwrap_or(false),
        }),
        // FieldSet::read reports every missing required field
        _ => Err(ValidationErrors::non_field("Invalid data.")),
    }
}

/// Validate an update payload.
///
/// With `partial` only the supplied fields are checked; otherwise the
/// payload must carry every required field, as on create.
pub fn validate_task_update(body: &Value, partial: bool) -> Result<TaskUpdateInput, ValidationErrors> {
    let fields = FieldSet::read(body, !partial)?;
    Ok(TaskUpdateInput {
        title: fields.title,
        description: fields.description,
        due_date: fields.due_date,
        completed: fields.completed,
    })
}

struct FieldSet {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    completed: Option<bool>,
}

impl FieldSet {
    fn read(body: &Value, require_all: bool) -> Result<Self, ValidationErrors> {
        let object = as_object(body)?;
        let mut errors = ValidationErrors::new();

        let title = read_field(object, "title", require_all, &mut errors, |v| {
            char_field(v, Some(TITLE_MAX_LENGTH))
        });
        let description = read_field(object, "description", require_all, &mut errors, |v| {
            char_field(v, None)
        });
        let due_date = read_field(object, "due_date", require_all, &mut errors, date_field);
        // `completed` has a default, so it is never required
        let completed = read_field(object, "completed", false, &mut errors, bool_field);

        if errors.is_empty() {
            Ok(Self {
                title,
                description,
                due_date,
                completed,
            })
        } else {
            Err(errors)
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    let kind = match body {
        Value::Object(object) => return Ok(object),
        Value::Null => return Err(ValidationErrors::non_field("No data provided")),
        Value::Array(_) => "list",
        Value::String(_) => "str",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
    };
    Err(ValidationErrors::non_field(format!(
        "Invalid data. Expected a dictionary, but got {}.",
        kind
    )))
}

fn read_field<T>(
    object: &Map<String, Value>,
    name: &str,
    required: bool,
    errors: &mut ValidationErrors,
    parse: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match object.get(name) {
        None => {
            if required {
                errors.add(name, MSG_REQUIRED);
            }
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.add(name, message);
                None
            }
        },
    }
}

fn char_field(value: &Value, max_length: Option<usize>) -> Result<String, String> {
    let raw = match value {
        Value::Null => return Err(MSG_NULL.to_string()),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(MSG_NOT_STRING.to_string()),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    if let Some(max) = max_length {
        if trimmed.chars().count() > max {
            return Err(format!(
                "Ensure this field has no more than {} characters.",
                max
            ));
        }
    }
    Ok(trimmed.to_string())
}

fn date_field(value: &Value) -> Result<NaiveDate, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => parse_due_date(s).ok_or_else(|| MSG_BAD_DATE.to_string()),
        _ => Err(MSG_BAD_DATE.to_string()),
    }
}

fn bool_field(value: &Value) -> Result<bool, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(MSG_NOT_BOOLEAN.to_string()),
        },
        Value::String(s) => {
            let lowered = s.to_lowercase();
            if TRUE_VALUES.contains(&lowered.as_str()) {
                Ok(true)
            } else if FALSE_VALUES.contains(&lowered.as_str()) {
                Ok(false)
            } else {
                Err(MSG_NOT_BOOLEAN.to_string())
            }
        }
        _ => Err(MSG_NOT_BOOLEAN.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_create_payload() {
        let input = validate_task_create(&json!({
            "title": "alpha",
            "description": "a simple task",
            "due_date": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(
            input,
            TaskCreateInput {
                title: "alpha".to_string(),
                description: "a simple task".to_string(),
                due_date: date(2024, 1, 1),
                completed: false,
            }
        );
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = validate_task_create(&json!({})).unwrap_err();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["description", "due_date", "title"]);
        assert_eq!(errors.get("title"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert!(errors.get("completed").is_none());
    }

    #[rstest]
    #[case("2024-13-01")]
    #[case("2024-02-30")]
    #[case("01/02/2024")]
    #[case("tomorrow")]
    fn test_create_rejects_bad_dates(#[case] due_date: &str) {
        let errors = validate_task_create(&json!({
            "title": "alpha",
            "description": "desc",
            "due_date": due_date
        }))
        .unwrap_err();

        assert_eq!(errors.get("due_date"), Some(&[MSG_BAD_DATE.to_string()][..]));
    }

    #[test]
    fn test_blank_and_oversized_strings() {
        let errors = validate_task_create(&json!({
            "title": "x".repeat(TITLE_MAX_LENGTH + 1),
            "description": "   ",
            "due_date": "2024-01-01"
        }))
        .unwrap_err();

        assert_eq!(
            errors.get("title"),
            Some(&["Ensure this field has no more than 255 characters.".to_string()][..])
        );
        assert_eq!(errors.get("description"), Some(&[MSG_BLANK.to_string()][..]));
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("false"), false)]
    #[case(json!("Yes"), true)]
    #[case(json!(0), false)]
    fn test_completed_accepts_boolean_spellings(#[case] raw: Value, #[case] expected: bool) {
        let input = validate_task_update(&json!({ "completed": raw }), true).unwrap();
        assert_eq!(input.completed, Some(expected));
    }

    #[test]
    fn test_completed_rejects_garbage() {
        let errors = validate_task_update(&json!({"completed": "maybe"}), true).unwrap_err();
        assert_eq!(errors.get("completed"), Some(&[MSG_NOT_BOOLEAN.to_string()][..]));
    }

    #[test]
    fn test_partial_update_only_reads_supplied_fields() {
        let input = validate_task_update(&json!({"title": "renamed"}), true).unwrap();
        assert_eq!(
            input,
            TaskUpdateInput {
                title: Some("renamed".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_full_update_requires_fields() {
        let errors = validate_task_update(&json!({"title": "renamed"}), false).unwrap_err();
        assert!(errors.get("description").is_some());
        assert!(errors.get("due_date").is_some());
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_task_create(&json!(["title"])).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS),
            Some(&["Invalid data. Expected a dictionary, but got list.".to_string()][..])
        );
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let errors = validate_task_create(&json!({"title": null, "description": "d", "due_date": "2024-01-01"}))
            .unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"title": [MSG_NULL]})
        );
        assert_eq!(errors.to_string(), format!("title: {}", MSG_NULL));
    }
}
