//! Then steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use rstest_bdd_macros::then;

#[then("the response status is {status:u16}")]
fn response_status(world: &LifecycleWorld, status: u16) -> Result<(), eyre::Report> {
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

#[then("the response carries a task identifier")]
fn response_has_identifier(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.last_body["id"].as_str().unwrap_or_default();
    if id.is_empty() {
        return Err(eyre::eyre!("response lacks an id: {}", world.last_body));
    }
    if world.last_body["created_at"].as_str().is_none() {
        return Err(eyre::eyre!("response lacks created_at: {}", world.last_body));
    }
    Ok(())
}

#[then(r#"the response task has title "{title}" and description "{description}""#)]
fn response_task_fields(
    world: &LifecycleWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let body = &world.last_body;
    if body["title"] != title.as_str() || body["description"] != description.as_str() {
        return Err(eyre::eyre!(
            "expected title {title:?} and description {description:?}, got {body}"
        ));
    }
    if let Some(expected) = world.created_id.as_deref()
        && body["id"] != expected
    {
        return Err(eyre::eyre!("task id changed: {body}"));
    }
    Ok(())
}

#[then("the response task has an update timestamp")]
fn response_task_updated(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    if world.last_body["updated_at"].is_null() {
        return Err(eyre::eyre!("updated_at is null: {}", world.last_body));
    }
    Ok(())
}

#[then("the task list has {count:usize} entries")]
fn task_list_length(world: &LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = world.last_body["tasks"]
        .as_array()
        .ok_or_else(|| eyre::eyre!("response lacks a task list: {}", world.last_body))?;
    if tasks.len() != count {
        return Err(eyre::eyre!("expected {count} tasks, found {}", tasks.len()));
    }
    Ok(())
}
