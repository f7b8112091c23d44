//! Given steps for task CRUD BDD scenarios.

use super::world::TaskCrudWorld;
use axum::http::Method;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty task board")]
fn empty_task_board(world: &mut TaskCrudWorld) {
    world.task_id = None;
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut TaskCrudWorld, title: String) -> Result<(), eyre::Report> {
    world.send(Method::POST, "/tasks", Some(&json!({ "title": title })))?;
    world.task_id = world.last_body["id"].as_i64();
    world
        .task_id
        .map(|_| ())
        .ok_or_else(|| eyre::eyre!("create did not return an id: {}", world.last_body))
}
