//! Given steps for task lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("a task service running behind the gateway")]
fn task_service_running(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    world.start()
}

#[given(r#"an existing task titled "{title}""#)]
fn existing_task(world: &mut LifecycleWorld, title: String) -> Result<(), eyre::Report> {
    world.send("POST", "/tasks", Some(json!({"title": title})))?;
    let id = world.last_body["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("create response lacks an id: {}", world.last_body))?
        .to_owned();
    world.created_id = Some(id);
    Ok(())
}
