//! When steps for task CRUD BDD scenarios.

use super::world::TaskCrudWorld;
use axum::http::Method;
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"a task titled "{title}" is created"#)]
fn create_task(world: &mut TaskCrudWorld, title: String) -> Result<(), eyre::Report> {
    world.send(Method::POST, "/tasks", Some(&json!({ "title": title })))?;
    if let Some(id) = world.last_body["id"].as_i64() {
        world.task_id = Some(id);
    }
    Ok(())
}

#[when("a task with a blank title is created")]
fn create_blank_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    world.send(Method::POST, "/tasks", Some(&json!({ "title": "   " })))
}

#[when("the task is marked as completed")]
fn complete_current_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    let id = world.current_task_id()?;
    world.send(
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(&json!({ "completed": true })),
    )
}

#[when("task {id:i64} is marked as completed")]
fn complete_task_by_id(world: &mut TaskCrudWorld, id: i64) -> Result<(), eyre::Report> {
    world.send(
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(&json!({ "completed": true })),
    )
}

#[when("the task is deleted")]
fn delete_current_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    let id = world.current_task_id()?;
    world.send(Method::DELETE, &format!("/tasks/{id}"), None)
}
