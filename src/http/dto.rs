//! Wire-shape checks for JSON request bodies.
//!
//! These run before service validation. They check JSON types and, so a
//! single response lists every problem, the title rules as well. `null` is
//! treated the same as an absent field; unknown fields are ignored.

use crate::task::services::{
    CreateTaskRequest, FieldViolation, UpdateTaskRequest, ValidationErrors, title_violation,
};
use serde_json::{Map, Value};

const TITLE_REQUIRED: &str = "Title is required";
const TITLE_NOT_STRING: &str = "Title must be a string";
const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
const COMPLETED_NOT_BOOLEAN: &str = "Completed must be a boolean";
const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";

/// Reads a create request from a JSON body.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every problem found: a body that is
/// not an object, a missing, mistyped or invalid title, or a description
/// that is not a string.
pub fn parse_create(body: Value) -> Result<CreateTaskRequest, ValidationErrors> {
    let mut fields = into_object(body)?;
    let mut violations = Vec::new();

    let title = checked_title(&mut fields, &mut violations);
    if title.is_none() && violations.is_empty() {
        violations.push(FieldViolation::new("title", TITLE_REQUIRED));
    }
    let description = optional_string(
        &mut fields,
        "description",
        DESCRIPTION_NOT_STRING,
        &mut violations,
    );

    if let Some(errors) = ValidationErrors::new(violations) {
        return Err(errors);
    }

    let mut request = CreateTaskRequest::new(title.unwrap_or_default());
    if let Some(details) = description {
        request = request.with_description(details);
    }
    Ok(request)
}

/// Reads a partial update request from a JSON body.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every problem found: a body that is
/// not an object, a supplied field with the wrong JSON type, or an invalid
/// title.
pub fn parse_update(body: Value) -> Result<UpdateTaskRequest, ValidationErrors> {
    let mut fields = into_object(body)?;
    let mut violations = Vec::new();

    let title = checked_title(&mut fields, &mut violations);
    let description = optional_string(
        &mut fields,
        "description",
        DESCRIPTION_NOT_STRING,
        &mut violations,
    );
    let completed = match fields.remove("completed") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(flag)) => Some(flag),
        Some(_) => {
            violations.push(FieldViolation::new("completed", COMPLETED_NOT_BOOLEAN));
            None
        }
    };

    if let Some(errors) = ValidationErrors::new(violations) {
        return Err(errors);
    }

    let mut request = UpdateTaskRequest::new();
    if let Some(text) = title {
        request = request.with_title(text);
    }
    if let Some(text) = description {
        request = request.with_description(text);
    }
    if let Some(flag) = completed {
        request = request.with_completed(flag);
    }
    Ok(request)
}

fn into_object(body: Value) -> Result<Map<String, Value>, ValidationErrors> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(ValidationErrors::single("body", BODY_NOT_OBJECT)),
    }
}

/// Reads `title`, recording a type or content violation.
fn checked_title(
    fields: &mut Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let title = optional_string(fields, "title", TITLE_NOT_STRING, violations)?;
    violations.extend(title_violation(&title));
    Some(title)
}

fn optional_string(
    fields: &mut Map<String, Value>,
    name: &str,
    type_message: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.remove(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            violations.push(FieldViolation::new(name, type_message));
            None
        }
    }
}
