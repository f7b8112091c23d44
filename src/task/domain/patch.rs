//! Insert and partial-update values handed to the record store.

use super::TaskTitle;
use chrono::{DateTime, Utc};

/// Validated input for creating a task.
///
/// The store assigns the identifier; `completed` always starts as `false` and
/// both timestamps are set to `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an insert value stamped with the given creation time.
    #[must_use]
    pub const fn new(
        title: TaskTitle,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title,
            description,
            created_at,
        }
    }

    /// Returns the validated title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Partial update for an existing task.
///
/// Each field is applied only when present; absent fields keep their stored
/// values. `updated_at` is refreshed on every application, including an
/// otherwise empty patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    completed: Option<bool>,
    updated_at: DateTime<Utc>,
}

impl TaskPatch {
    /// Creates a patch that changes nothing but the update timestamp.
    #[must_use]
    pub const fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            description: None,
            completed: None,
            updated_at,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement completion flag, if any.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns the refresh timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when no field other than the timestamp is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}
