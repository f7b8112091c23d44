//! Then steps for task CRUD BDD scenarios.

use super::world::TaskCrudWorld;
use axum::http::Method;
use rstest_bdd_macros::then;
use serde_json::Value;

#[then("the response status is {status:u16}")]
fn response_status_is(world: &TaskCrudWorld, status: u16) -> Result<(), eyre::Report> {
    let actual = world
        .last_status
        .ok_or_else(|| eyre::eyre!("no request has been sent"))?;
    if actual.as_u16() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {actual} with body {}",
            world.last_body
        ));
    }
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskCrudWorld, title: String) -> Result<(), eyre::Report> {
    match world.last_body["title"].as_str() {
        Some(actual) if actual == title => Ok(()),
        other => Err(eyre::eyre!("expected title {title:?}, got {other:?}")),
    }
}

#[then("the task is completed")]
fn task_is_completed(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    if world.last_body["completed"] == Value::Bool(true) {
        Ok(())
    } else {
        Err(eyre::eyre!("task is not completed: {}", world.last_body))
    }
}

#[then(r#"the errors mention "{field}""#)]
fn errors_mention(world: &TaskCrudWorld, field: String) -> Result<(), eyre::Report> {
    let mentioned = world.last_body["errors"]
        .as_array()
        .is_some_and(|errors| {
            errors
                .iter()
                .any(|violation| violation["field"].as_str() == Some(field.as_str()))
        });
    if mentioned {
        Ok(())
    } else {
        Err(eyre::eyre!(
            "expected a violation for {field}, got {}",
            world.last_body
        ))
    }
}

#[then("the task list no longer contains the task")]
fn list_excludes_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    let id = world.current_task_id()?;
    world.send(Method::GET, "/tasks", None)?;
    let listed = world.last_body.as_array().cloned().unwrap_or_default();
    if listed.iter().any(|task| task["id"].as_i64() == Some(id)) {
        return Err(eyre::eyre!("task {id} is still listed"));
    }
    Ok(())
}

#[then("the task list is empty")]
fn list_is_empty(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    world.send(Method::GET, "/tasks", None)?;
    if world.last_body == Value::Array(Vec::new()) {
        Ok(())
    } else {
        Err(eyre::eyre!("expected no tasks, got {}", world.last_body))
    }
}
