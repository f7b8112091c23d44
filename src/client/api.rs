//! Port and reqwest adapter for talking to the REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description, omitted when blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskDraft {
    /// Builds a draft from raw form input; a blank description becomes
    /// `None`.
    #[must_use]
    pub fn from_form(title: &str, description: &str) -> Self {
        let trimmed = description.trim();
        Self {
            title: title.to_owned(),
            description: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
        }
    }
}

/// Failures talking to the API.
#[derive(Debug, Error)]
pub enum TaskApiError {
    /// The request could not be sent or the response not read.
    #[error("could not reach the task API: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// Response status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("unexpected response from the task API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the client needs from the REST API.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches every task, newest first.
    async fn list(&self) -> Result<Vec<TaskView>, TaskApiError>;

    /// Creates a task.
    async fn create(&self, draft: &TaskDraft) -> Result<TaskView, TaskApiError>;

    /// Sets only the completion flag of task `id`.
    async fn set_completed(&self, id: i64, completed: bool) -> Result<TaskView, TaskApiError>;

    /// Deletes task `id`.
    async fn delete(&self, id: i64) -> Result<(), TaskApiError>;
}

/// [`TaskApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Creates an adapter for the API at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates an adapter reusing an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<TaskView>, TaskApiError> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        decode(response).await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<TaskView, TaskApiError> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<TaskView, TaskApiError> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), TaskApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        decode::<Value>(response).await.map(drop)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TaskApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if status.is_success() {
        Ok(serde_json::from_slice(&body)?)
    } else {
        Err(TaskApiError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}

/// Extracts a readable message from an API error body.
///
/// Understands `{"error": "..."}` and `{"errors": [{"message": "..."}]}`;
/// anything else falls back to the status reason.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let from_body = parsed.and_then(|value| {
        if let Some(text) = value.get("error").and_then(Value::as_str) {
            return Some(text.to_owned());
        }
        let messages: Vec<&str> = value
            .get("errors")?
            .as_array()?
            .iter()
            .filter_map(|item| item.get("message").and_then(Value::as_str))
            .collect();
        (!messages.is_empty()).then(|| messages.join("; "))
    });
    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_owned()
    })
}
