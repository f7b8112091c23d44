//! Unit tests for the browser client.


use super::api::{TaskApi, TaskApiError, TaskDraft, TaskView};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

mockall::mock! {
    pub Api {}

    #[async_trait]
    impl TaskApi for Api {
        async fn list(&self) -> Result<Vec<TaskView>, TaskApiError>;
        async fn create(&self, draft: &TaskDraft) -> Result<TaskView, TaskApiError>;
        async fn set_completed(&self, id: i64, completed: bool) -> Result<TaskView, TaskApiError>;
        async fn delete(&self, id: i64) -> Result<(), TaskApiError>;
    }
}

fn timestamp(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn view(id: i64, title: &str, completed: bool) -> TaskView {
    TaskView {
        id,
        title: title.to_owned(),
        description: None,
        completed,
        created_at: timestamp(0),
        updated_at: timestamp(1),
    }
}

pub(super) fn server_error() -> TaskApiError {
    TaskApiError::Status {
        status: 500,
        message: "Internal server error".to_owned(),
    }
}
