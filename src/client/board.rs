//! Stateful view model behind the task page.

use super::api::{TaskApi, TaskDraft, TaskView};
use std::sync::Arc;

const TITLE_REQUIRED: &str = "Title is required";

/// The list as last fetched, plus any messages to show the user.
///
/// Every successful or failed mutation is followed by a full re-fetch. A
/// failed fetch keeps the previously loaded list. Nothing is retried.
pub struct TaskBoard<A: TaskApi> {
    api: Arc<A>,
    tasks: Vec<TaskView>,
    draft: TaskDraft,
    form_error: Option<String>,
    error: Option<String>,
}

impl<A: TaskApi> TaskBoard<A> {
    /// Creates an empty board; call [`Self::mount`] to load tasks.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            draft: TaskDraft::default(),
            form_error: None,
            error: None,
        }
    }

    /// Loads the task list.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Submits the create form.
    ///
    /// An empty title is rejected locally with an inline message and no API
    /// call. On success the form is cleared.
    pub async fn submit(&mut self, title: &str, description: &str) {
        self.draft = TaskDraft::from_form(title, description);
        if title.trim().is_empty() {
            self.form_error = Some(TITLE_REQUIRED.to_owned());
            return;
        }
        self.form_error = None;

        match self.api.create(&self.draft).await {
            Ok(task) => {
                tracing::debug!(task_id = task.id, "task added");
                self.draft = TaskDraft::default();
            }
            Err(err) => self.fail("Could not add the task", &err),
        }
        self.refresh().await;
    }

    /// Flips the completion flag of task `id`, sending only `completed`.
    pub async fn toggle(&mut self, id: i64, currently_completed: bool) {
        if let Err(err) = self.api.set_completed(id, !currently_completed).await {
            self.fail("Could not update the task", &err);
        }
        self.refresh().await;
    }

    /// Deletes task `id`.
    pub async fn delete(&mut self, id: i64) {
        if let Err(err) = self.api.delete(id).await {
            self.fail("Could not delete the task", &err);
        }
        self.refresh().await;
    }

    /// Tasks as last fetched, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[TaskView] {
        &self.tasks
    }

    /// Looks up a loaded task.
    #[must_use]
    pub fn task(&self, id: i64) -> Option<&TaskView> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Form values to redisplay.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Inline message shown next to the form.
    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Banner message for a failed API call.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` when the last action left a message for the user.
    #[must_use]
    pub const fn has_messages(&self) -> bool {
        self.form_error.is_some() || self.error.is_some()
    }

    async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => self.fail("Could not load tasks", &err),
        }
    }

    fn fail(&mut self, action: &str, err: &dyn std::error::Error) {
        tracing::warn!(error = %err, "{action}");
        let mut message = format!("{action}: {err}");
        if let Some(previous) = self.error.take() {
            message = format!("{previous}. {message}");
        }
        self.error = Some(message);
    }
}
