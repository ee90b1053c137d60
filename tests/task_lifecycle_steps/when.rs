//! When steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"a task titled "{title}" with description "{description}" is created"#)]
fn create_task(
    world: &mut LifecycleWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    world.send(
        "POST",
        "/tasks",
        Some(json!({"title": title, "description": description})),
    )?;
    world.created_id = world.last_body["id"].as_str().map(str::to_owned);
    Ok(())
}

#[when("a task without a title is created")]
fn create_untitled_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    world.send("POST", "/tasks", Some(json!({"description": "nothing"})))
}

#[when("the created task is fetched")]
fn fetch_created_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.created_id()?;
    world.send("GET", &format!("/tasks/{id}"), None)
}

#[when(r#"the task "{id}" is fetched"#)]
fn fetch_task(world: &mut LifecycleWorld, id: String) -> Result<(), eyre::Report> {
    world.send("GET", &format!("/api/v1/tasks/{id}"), None)
}

#[when(r#"the created task is renamed to "{title}" with description "{description}""#)]
fn rename_created_task(
    world: &mut LifecycleWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.created_id()?;
    world.send(
        "PUT",
        &format!("/tasks/{id}"),
        Some(json!({"title": title, "description": description})),
    )
}

#[when("the created task is deleted")]
fn delete_created_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.created_id()?;
    world.send("DELETE", &format!("/tasks/{id}"), None)
}

#[when("all tasks are listed")]
fn list_tasks(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    world.send("GET", "/tasks", None)
}
