//! `PostgreSQL` record store tests.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use taskboard::task::{
    domain::{NewTask, TaskId, TaskPatch, TaskTitle},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};

use crate::postgres::helpers::{BoxError, connect};

fn new_task(title: &str, created_at: DateTime<Utc>) -> Result<NewTask, BoxError> {
    Ok(NewTask::new(TaskTitle::new(title)?, None, created_at))
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_insert_assigns_id_and_defaults() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let now = DefaultClock.utc();

    let first = store.repository.insert(&new_task("first", now)?).await?;
    let second = store.repository.insert(&new_task("second", now)?).await?;

    assert!(first.id().value() > 0);
    assert!(second.id() > first.id());
    assert!(!first.completed());
    assert_eq!(first.created_at(), first.updated_at());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_service_trims_title_and_keeps_description() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let service = TaskService::new(Arc::new(store.repository.clone()), Arc::new(DefaultClock));

    let created = service
        .create(CreateTaskRequest::new("  Buy milk ").with_description("Semi-skimmed"))
        .await?;

    assert_eq!(created.title().as_str(), "Buy milk");
    assert_eq!(created.description(), Some("Semi-skimmed"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_list_is_newest_first_with_id_tiebreak() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let base = DefaultClock.utc();
    for (title, offset) in [("old", 0), ("new", 10), ("tie-a", 5), ("tie-b", 5)] {
        store
            .repository
            .insert(&new_task(title, base + TimeDelta::seconds(offset))?)
            .await?;
    }

    let listed = store.repository.list_all().await?;
    let titles: Vec<&str> = listed.iter().map(|task| task.title().as_str()).collect();

    assert_eq!(titles, vec!["new", "tie-b", "tie-a", "old"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_touches_only_present_fields() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let now = DefaultClock.utc();
    let stored = store
        .repository
        .insert(&NewTask::new(
            TaskTitle::new("Paint fence")?,
            Some("White".to_owned()),
            now,
        ))
        .await?;
    let later = now + TimeDelta::seconds(2);

    let updated = store
        .repository
        .update_by_id(stored.id(), &TaskPatch::new(later).with_completed(true))
        .await?
        .ok_or("task should exist")?;

    assert!(updated.completed());
    assert_eq!(updated.title(), stored.title());
    assert_eq!(updated.description(), Some("White"));
    assert_eq!(updated.created_at(), stored.created_at());
    assert!(updated.updated_at() > stored.updated_at());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_stale_patch_keeps_updated_at() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let now = DefaultClock.utc();
    let stored = store.repository.insert(&new_task("Sweep porch", now)?).await?;
    let earlier = now - TimeDelta::minutes(5);

    let updated = store
        .repository
        .update_by_id(stored.id(), &TaskPatch::new(earlier).with_completed(true))
        .await?
        .ok_or("task should exist")?;

    assert!(updated.completed());
    assert_eq!(updated.updated_at(), stored.updated_at());
    assert!(updated.updated_at() >= updated.created_at());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_missing_rows_report_absence() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let service = TaskService::new(Arc::new(store.repository.clone()), Arc::new(DefaultClock));

    let update = service
        .update(
            TaskId::new(999_999),
            UpdateTaskRequest::new().with_completed(true),
        )
        .await;
    let delete = service.delete(TaskId::new(999_999)).await;

    assert!(matches!(update, Err(TaskServiceError::NotFound(_))));
    assert!(matches!(delete, Err(TaskServiceError::NotFound(_))));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_delete_returns_prior_row_once() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let stored = store
        .repository
        .insert(&new_task("Throw away", DefaultClock.utc())?)
        .await?;

    let first = store.repository.delete_by_id(stored.id()).await?;
    let second = store.repository.delete_by_id(stored.id()).await?;

    assert_eq!(first.map(|task| task.id()), Some(stored.id()));
    assert!(second.is_none());
    assert!(store.repository.list_all().await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_schema_creation_is_idempotent() -> Result<(), BoxError> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    store
        .repository
        .insert(&new_task("survivor", DefaultClock.utc())?)
        .await?;

    let restarted = store.reconnect()?;
    restarted.ensure_schema().await?;
    let listed = restarted.list_all().await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed.first().map(|task| task.title().as_str()),
        Some("survivor")
    );
    Ok(())
}
