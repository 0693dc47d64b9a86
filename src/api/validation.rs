use serde_json::Value;

use crate::api::error::ApiError;

/// Returns the trimmed title, which is what gets stored.
pub fn title(value: Option<&Value>) -> Result<String, ApiError> {
    let raw = match value {
        Some(Value::String(raw)) => raw,
        Some(_) => return Err(ApiError::validation("Title must be a string")),
        None => return Err(ApiError::validation("Title is required")),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Title cannot be empty"));
    }
    Ok(trimmed.to_string())
}

pub fn completed(value: Option<&Value>) -> Result<bool, ApiError> {
    match value {
        Some(Value::Bool(value)) => Ok(*value),
        _ => Err(ApiError::validation("Completed must be a boolean")),
    }
}

pub fn todo_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid todo id: {}", raw)))
}
