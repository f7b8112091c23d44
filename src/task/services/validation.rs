//! Per-operation request validation.
//!
//! Each operation has one validation function that either produces the
//! value handed to the record store or an itemized list of violations. No
//! store call is made for a request that fails here.

use super::{CreateTaskRequest, UpdateTaskRequest};
use crate::task::domain::{NewTask, TaskPatch, TaskTitle};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending request field.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty collection of violations for one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request is invalid: {}", summarize(.0))]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Wraps a list of violations, or returns `None` when it is empty.
    #[must_use]
    pub fn new(violations: Vec<FieldViolation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self(violations))
    }

    /// Creates an error holding a single violation.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldViolation::new(field, message)])
    }

    /// Returns the violations in the order they were detected.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Returns `true` when any violation refers to `field`.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }

    /// Consumes the error, returning the violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.0
    }

    /// Appends the violations of `other`, keeping detection order.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

/// Combines two independently checked inputs, reporting the violations of
/// both when both fail.
///
/// # Errors
///
/// Returns the merged [`ValidationErrors`] of whichever inputs failed.
pub fn combine<A, B>(
    first: Result<A, ValidationErrors>,
    second: Result<B, ValidationErrors>,
) -> Result<(A, B), ValidationErrors> {
    match (first, second) {
        (Ok(left), Ok(right)) => Ok((left, right)),
        (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
        (Err(left), Err(right)) => Err(left.merge(right)),
    }
}

/// Checks a raw title against the stored-title rules.
///
/// Returns the violation a create or update would report for `raw`, if any.
#[must_use]
pub fn title_violation(raw: &str) -> Option<FieldViolation> {
    TaskTitle::new(raw)
        .err()
        .map(|err| FieldViolation::new("title", err.to_string()))
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a create request.
///
/// # Errors
///
/// Returns [`ValidationErrors`] when the title is empty after trimming or
/// longer than [`TaskTitle::MAX_CHARS`] characters.
pub fn validate_create(
    request: CreateTaskRequest,
    now: DateTime<Utc>,
) -> Result<NewTask, ValidationErrors> {
    let CreateTaskRequest { title, description } = request;
    let valid_title =
        TaskTitle::new(title).map_err(|err| ValidationErrors::single("title", err.to_string()))?;
    Ok(NewTask::new(valid_title, description, now))
}

/// Validates an update request.
///
/// Only supplied fields are checked; an empty request is valid and yields a
/// patch that only refreshes `updated_at`.
///
/// # Errors
///
/// Returns [`ValidationErrors`] when a supplied title is empty after
/// trimming or longer than [`TaskTitle::MAX_CHARS`] characters.
pub fn validate_update(
    request: UpdateTaskRequest,
    now: DateTime<Utc>,
) -> Result<TaskPatch, ValidationErrors> {
    let UpdateTaskRequest {
        title,
        description,
        completed,
    } = request;

    let mut violations = Vec::new();
    let mut patch = TaskPatch::new(now);

    if let Some(raw_title) = title {
        match TaskTitle::new(raw_title) {
            Ok(valid) => patch = patch.with_title(valid),
            Err(err) => violations.push(FieldViolation::new("title", err.to_string())),
        }
    }
    if let Some(text) = description {
        patch = patch.with_description(text);
    }
    if let Some(flag) = completed {
        patch = patch.with_completed(flag);
    }

    ValidationErrors::new(violations).map_or(Ok(patch), Err)
}
