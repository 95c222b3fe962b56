use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::entry::NewEntry;

pub const NAME_MAX_CHARS: usize = 50;
pub const TASK_COUNT_RANGE: (i32, i32) = (1, 50);
pub const FOCUS_HOURS_RANGE: (f64, f64) = (0.0, 12.0);
pub const STRESS_LEVEL_RANGE: (i32, i32) = (1, 5);

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s.,'\-]").expect("valid charset regex"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Raw submission body. Fields stay untyped so numbers sent as strings
/// (`"5"`) can be coerced and every failure can name its field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateEntryRequest {
    pub name: Option<Value>,
    pub task_count: Option<Value>,
    pub focus_hours: Option<Value>,
    pub stress_level: Option<Value>,
}

/// Strips tag-like substrings, drops characters outside word characters,
/// whitespace and `.,'-`, collapses whitespace runs and trims.
pub fn sanitize_name(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, "");
    let allowed = DISALLOWED_RE.replace_all(&without_tags, "");
    WHITESPACE_RE.replace_all(&allowed, " ").trim().to_string()
}

/// Validates a submission, returning the first offending field.
pub fn validate_new_entry(req: &CreateEntryRequest) -> Result<NewEntry, AppError> {
    let name = validate_name(req.name.as_ref())?;

    let (min, max) = TASK_COUNT_RANGE;
    let task_count = validate_integer("task_count", req.task_count.as_ref(), min, max)?;

    let focus_hours = coerce_number("focus_hours", req.focus_hours.as_ref())?;
    let (lo, hi) = FOCUS_HOURS_RANGE;
    if !(lo..=hi).contains(&focus_hours) {
        return Err(AppError::validation(
            "focus_hours",
            format!("focus_hours must be between {lo} and {hi}"),
        ));
    }

    let (min, max) = STRESS_LEVEL_RANGE;
    let stress_level = validate_integer("stress_level", req.stress_level.as_ref(), min, max)?;

    Ok(NewEntry {
        name,
        task_count,
        focus_hours,
        stress_level,
    })
}

fn validate_name(value: Option<&Value>) -> Result<String, AppError> {
    let raw = match value {
        None | Some(Value::Null) => return Err(required("name")),
        Some(Value::String(s)) => s,
        Some(_) => return Err(AppError::validation("name", "name must be a string")),
    };
    if raw.trim().is_empty() {
        return Err(required("name"));
    }

    // Stored exactly as submitted or not at all.
    let sanitized = sanitize_name(raw);
    if sanitized != *raw {
        return Err(AppError::validation(
            "name",
            "name contains invalid characters",
        ));
    }
    if sanitized.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::validation(
            "name",
            format!("name must be at most {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(sanitized)
}

fn validate_integer(
    field: &'static str,
    value: Option<&Value>,
    min: i32,
    max: i32,
) -> Result<i32, AppError> {
    let n = coerce_number(field, value)?;
    if n.fract() != 0.0 || n < f64::from(min) || n > f64::from(max) {
        return Err(AppError::validation(
            field,
            format!("{field} must be an integer between {min} and {max}"),
        ));
    }
    Ok(n as i32)
}

fn coerce_number(field: &'static str, value: Option<&Value>) -> Result<f64, AppError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(required(field)),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(required(field)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::validation(field, format!("{field} must be a number")))
}

fn required(field: &'static str) -> AppError {
    AppError::validation(field, format!("{field} is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateEntryRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({ "name": "Ana", "task_count": 5, "focus_hours": 3.5, "stress_level": 2 })
    }

    fn with(field: &str, value: Value) -> CreateEntryRequest {
        let mut body = valid_body();
        body[field] = value;
        request(body)
    }

    fn rejected_field(req: &CreateEntryRequest) -> Option<&'static str> {
        validate_new_entry(req).err().and_then(|e| e.field())
    }

    #[test]
    fn test_sanitize_strips_tags_and_symbols() {
        assert_eq!(sanitize_name("<b>Ana</b>"), "Ana");
        assert_eq!(sanitize_name("Ana!@#$"), "Ana");
        assert_eq!(sanitize_name("  Mary   Jane\t O'Neil-Smith. "), "Mary Jane O'Neil-Smith.");
    }

    #[test]
    fn test_sanitize_keeps_allowed_punctuation() {
        assert_eq!(sanitize_name("Dr. J. Doe, Jr."), "Dr. J. Doe, Jr.");
    }

    #[test]
    fn test_valid_entry_passes_through() {
        let entry = validate_new_entry(&request(valid_body())).unwrap();
        assert_eq!(
            entry,
            NewEntry {
                name: "Ana".to_string(),
                task_count: 5,
                focus_hours: 3.5,
                stress_level: 2,
            }
        );
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let req = request(json!({
            "name": "Ana",
            "task_count": "7",
            "focus_hours": " 2.25 ",
            "stress_level": "3"
        }));
        let entry = validate_new_entry(&req).unwrap();
        assert_eq!(entry.task_count, 7);
        assert_eq!(entry.focus_hours, 2.25);
        assert_eq!(entry.stress_level, 3);
    }

    #[test]
    fn test_missing_fields_name_the_field() {
        for field in ["name", "task_count", "focus_hours", "stress_level"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            let err = validate_new_entry(&request(body)).unwrap_err();
            assert_eq!(err.field(), Some(field));
            assert!(err.to_string().contains("is required"), "Error was {err}");
        }
    }

    #[test]
    fn test_null_and_blank_count_as_missing() {
        assert_eq!(rejected_field(&with("task_count", Value::Null)), Some("task_count"));
        assert_eq!(rejected_field(&with("stress_level", json!("  "))), Some("stress_level"));
        assert_eq!(rejected_field(&with("name", json!("   "))), Some("name"));
    }

    #[test]
    fn test_script_name_rejected() {
        assert_eq!(
            rejected_field(&with("name", json!("<script>alert(1)</script>"))),
            Some("name")
        );
        assert_eq!(rejected_field(&with("name", json!("Ana<br/>"))), Some("name"));
    }

    #[test]
    fn test_name_that_would_be_mutated_is_rejected() {
        assert_eq!(rejected_field(&with("name", json!(" Ana"))), Some("name"));
        assert_eq!(rejected_field(&with("name", json!("Ana  Lee"))), Some("name"));
        assert_eq!(rejected_field(&with("name", json!("Ana#1"))), Some("name"));
    }

    #[test]
    fn test_name_length_limit() {
        let fifty = "a".repeat(50);
        assert!(validate_new_entry(&with("name", json!(fifty))).is_ok());
        let fifty_one = "a".repeat(51);
        assert_eq!(rejected_field(&with("name", json!(fifty_one))), Some("name"));
    }

    #[test]
    fn test_non_string_name_rejected() {
        assert_eq!(rejected_field(&with("name", json!(42))), Some("name"));
    }

    #[test]
    fn test_task_count_bounds() {
        for bad in [json!(0), json!(51), json!(3.5), json!("abc"), json!(true)] {
            assert_eq!(rejected_field(&with("task_count", bad)), Some("task_count"));
        }
        for good in [1, 50] {
            assert!(validate_new_entry(&with("task_count", json!(good))).is_ok());
        }
    }

    #[test]
    fn test_stress_level_bounds() {
        for bad in [0, 6] {
            assert_eq!(
                rejected_field(&with("stress_level", json!(bad))),
                Some("stress_level")
            );
        }
        for good in [1, 5] {
            assert!(validate_new_entry(&with("stress_level", json!(good))).is_ok());
        }
    }

    #[test]
    fn test_focus_hours_bounds() {
        for bad in [json!(-0.1), json!(12.1), json!("NaN"), json!("inf")] {
            assert_eq!(rejected_field(&with("focus_hours", bad)), Some("focus_hours"));
        }
        for good in [json!(0), json!(12), json!(7.75)] {
            assert!(validate_new_entry(&with("focus_hours", good)).is_ok());
        }
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let req = request(json!({ "name": "Ana", "task_count": 0, "stress_level": 9 }));
        assert_eq!(rejected_field(&req), Some("task_count"));
    }
}
