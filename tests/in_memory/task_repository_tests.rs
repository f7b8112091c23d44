//! Record store contract tests against the in-memory adapter.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, TaskId, TaskPatch, TaskTitle},
    ports::TaskRepository,
};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn new_task(title: &str, created_at: DateTime<Utc>) -> NewTask {
    NewTask::new(
        TaskTitle::new(title).expect("valid title"),
        None,
        created_at,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_start_at_one_and_are_never_reused(repository: InMemoryTaskRepository) {
    let now = DefaultClock.utc();
    let first = repository
        .insert(&new_task("first", now))
        .await
        .expect("insert succeeds");
    repository
        .delete_by_id(first.id())
        .await
        .expect("delete succeeds");
    let second = repository
        .insert(&new_task("second", now))
        .await
        .expect("insert succeeds");

    assert_eq!(first.id(), TaskId::new(1));
    assert_eq!(second.id(), TaskId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_sets_defaults(repository: InMemoryTaskRepository) {
    let now = DefaultClock.utc();
    let stored = repository
        .insert(&NewTask::new(
            TaskTitle::new("Plan trip").expect("valid title"),
            Some("Book trains".to_owned()),
            now,
        ))
        .await
        .expect("insert succeeds");

    assert!(!stored.completed());
    assert_eq!(stored.description(), Some("Book trains"));
    assert_eq!(stored.created_at(), now);
    assert_eq!(stored.updated_at(), now);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_newest_first_with_id_tiebreak(repository: InMemoryTaskRepository) {
    let base = DefaultClock.utc();
    for (title, offset) in [("old", 0), ("new", 10), ("tie-a", 5), ("tie-b", 5)] {
        repository
            .insert(&new_task(title, base + TimeDelta::seconds(offset)))
            .await
            .expect("insert succeeds");
    }

    let listed = repository.list_all().await.expect("list succeeds");
    let titles: Vec<&str> = listed.iter().map(|task| task.title().as_str()).collect();

    assert_eq!(titles, vec!["new", "tie-b", "tie-a", "old"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_merges_only_present_fields(repository: InMemoryTaskRepository) {
    let now = DefaultClock.utc();
    let stored = repository
        .insert(&NewTask::new(
            TaskTitle::new("Paint fence").expect("valid title"),
            Some("White".to_owned()),
            now,
        ))
        .await
        .expect("insert succeeds");
    let later = now + TimeDelta::seconds(1);

    let updated = repository
        .update_by_id(
            stored.id(),
            &TaskPatch::new(later).with_title(TaskTitle::new("Paint gate").expect("valid title")),
        )
        .await
        .expect("update succeeds")
        .expect("task exists");

    assert_eq!(updated.title().as_str(), "Paint gate");
    assert_eq!(updated.description(), Some("White"));
    assert!(!updated.completed());
    assert_eq!(updated.updated_at(), later);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_patch_keeps_updated_at(repository: InMemoryTaskRepository) {
    let now = DefaultClock.utc();
    let stored = repository
        .insert(&NewTask::new(
            TaskTitle::new("Sweep porch").expect("valid title"),
            None,
            now,
        ))
        .await
        .expect("insert succeeds");

    let updated = repository
        .update_by_id(
            stored.id(),
            &TaskPatch::new(now - TimeDelta::minutes(5)).with_completed(true),
        )
        .await
        .expect("update succeeds")
        .expect("task exists");

    assert!(updated.completed());
    assert_eq!(updated.updated_at(), stored.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_ids_report_absence(repository: InMemoryTaskRepository) {
    let patch = TaskPatch::new(DefaultClock.utc()).with_completed(true);

    let updated = repository
        .update_by_id(TaskId::new(42), &patch)
        .await
        .expect("update succeeds");
    let deleted = repository
        .delete_by_id(TaskId::new(42))
        .await
        .expect("delete succeeds");

    assert!(updated.is_none());
    assert!(deleted.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_prior_row_and_is_permanent(repository: InMemoryTaskRepository) {
    let stored = repository
        .insert(&new_task("Throw away", DefaultClock.utc()))
        .await
        .expect("insert succeeds");

    let deleted = repository
        .delete_by_id(stored.id())
        .await
        .expect("delete succeeds");

    assert_eq!(deleted, Some(stored));
    assert!(repository.list_all().await.expect("list succeeds").is_empty());
}
