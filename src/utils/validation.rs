use crate::domain::model::Fields;
use crate::utils::error::{HbnbError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$")
            .unwrap_or_else(|e| panic!("email regex failed to compile: {}", e))
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HbnbError::invalid(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Non-blank and at most `max` characters.
pub fn validate_length(field_name: &str, value: &str, max: usize) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.chars().count() > max {
        return Err(HbnbError::invalid(
            field_name,
            format!("Value must be {} characters or less", max),
        ));
    }
    Ok(())
}

/// Closed interval check; NaN and infinities never pass.
pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(HbnbError::invalid(
            field_name,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HbnbError::invalid(field_name, "Value must be greater than 0"));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(HbnbError::invalid(field_name, "Email cannot be empty"));
    }
    if !email_regex().is_match(value) {
        return Err(HbnbError::invalid(field_name, "Invalid email format"));
    }
    Ok(())
}

pub fn validate_required_field<'a>(field_name: &str, fields: &'a Fields) -> Result<&'a Value> {
    match fields.get(field_name) {
        Some(Value::Null) | None => Err(HbnbError::missing(field_name)),
        Some(value) => Ok(value),
    }
}

pub fn as_str<'a>(field_name: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| HbnbError::invalid(field_name, "Value must be a string"))
}

pub fn as_f64(field_name: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| HbnbError::invalid(field_name, "Value must be a number"))
}

pub fn as_i64(field_name: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| HbnbError::invalid(field_name, "Value must be an integer"))
}

pub fn as_bool(field_name: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| HbnbError::invalid(field_name, "Value must be a boolean"))
}

pub fn required_str<'a>(fields: &'a Fields, field_name: &str) -> Result<&'a str> {
    as_str(field_name, validate_required_field(field_name, fields)?)
}

pub fn required_f64(fields: &Fields, field_name: &str) -> Result<f64> {
    as_f64(field_name, validate_required_field(field_name, fields)?)
}

pub fn required_i64(fields: &Fields, field_name: &str) -> Result<i64> {
    as_i64(field_name, validate_required_field(field_name, fields)?)
}

/// Absent and `null` both read as `None`.
pub fn optional_str<'a>(fields: &'a Fields, field_name: &str) -> Result<Option<&'a str>> {
    match fields.get(field_name) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => as_str(field_name, value).map(Some),
    }
}

pub fn optional_f64(fields: &Fields, field_name: &str) -> Result<Option<f64>> {
    match fields.get(field_name) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => as_f64(field_name, value).map(Some),
    }
}

pub fn optional_bool(fields: &Fields, field_name: &str) -> Result<Option<bool>> {
    match fields.get(field_name) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => as_bool(field_name, value).map(Some),
    }
}

/// Present-but-`null` in an update body, for fields that cannot be cleared.
fn reject_null(field_name: &str) -> HbnbError {
    HbnbError::invalid(field_name, "Value must not be null")
}

/// Absent reads as `None`; an explicit `null` is rejected.
pub fn update_str<'a>(fields: &'a Fields, field_name: &str) -> Result<Option<&'a str>> {
    match fields.get(field_name) {
        None => Ok(None),
        Some(Value::Null) => Err(reject_null(field_name)),
        Some(value) => as_str(field_name, value).map(Some),
    }
}

pub fn update_f64(fields: &Fields, field_name: &str) -> Result<Option<f64>> {
    match fields.get(field_name) {
        None => Ok(None),
        Some(Value::Null) => Err(reject_null(field_name)),
        Some(value) => as_f64(field_name, value).map(Some),
    }
}

pub fn update_bool(fields: &Fields, field_name: &str) -> Result<Option<bool>> {
    match fields.get(field_name) {
        None => Ok(None),
        Some(Value::Null) => Err(reject_null(field_name)),
        Some(value) => as_bool(field_name, value).map(Some),
    }
}

pub fn optional_id_list(fields: &Fields, field_name: &str) -> Result<Vec<String>> {
    match fields.get(field_name) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| as_str(field_name, item).map(str::to_string))
            .collect(),
        Some(_) => Err(HbnbError::invalid(field_name, "Value must be a list of ids")),
    }
}
