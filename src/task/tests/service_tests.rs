//! Service orchestration tests for task management.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{TaskService, TaskServiceErrorKind},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use rstest::{fixture, rstest};

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

mock! {
    pub Repository {}

    #[async_trait]
    impl TaskRepository for Repository {
        async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task>;
        async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize>;
    }
}

fn storage_failure() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("connection reset"))
}

fn mocked(repository: MockRepository) -> TaskService<MockRepository, DefaultClock> {
    TaskService::new(Arc::new(repository), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_returns_same_task(service: TestService) {
    let created = service
        .create_task("Buy milk", "2%")
        .await
        .expect("create should succeed");
    let fetched = service
        .get_task(&created.id().to_string())
        .await
        .expect("get should succeed");

    assert_eq!(fetched, created);
    assert_eq!(fetched.title().as_str(), "Buy milk");
    assert_eq!(fetched.description(), "2%");
    assert_eq!(fetched.updated_at(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_blank_title_writes_nothing() {
    let mut repository = MockRepository::new();
    repository.expect_create().never();

    let result = mocked(repository).create_task("   ", "ignored").await;

    let err = result.expect_err("blank title must be rejected");
    assert_eq!(err.kind(), TaskServiceErrorKind::InvalidArgument);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_propagates_storage_failure() {
    let mut repository = MockRepository::new();
    repository
        .expect_create()
        .times(1)
        .returning(|_| Err(storage_failure()));

    let err = mocked(repository)
        .create_task("Buy milk", "")
        .await
        .expect_err("storage failure must surface");

    assert_eq!(err.kind(), TaskServiceErrorKind::Storage);
    assert!(std::error::Error::source(&err).is_some());
}

#[rstest]
#[case("")]
#[case("abc")]
#[tokio::test(flavor = "multi_thread")]
async fn get_with_malformed_id_is_invalid_argument(service: TestService, #[case] id: &str) {
    let err = service.get_task(id).await.expect_err("id is malformed");
    assert_eq!(err.kind(), TaskServiceErrorKind::InvalidArgument);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_is_not_found(service: TestService) {
    let err = service
        .get_task(&TaskId::new().to_string())
        .await
        .expect_err("nothing stored");
    assert_eq!(err.kind(), TaskServiceErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_of_empty_store_is_empty(service: TestService) {
    let tasks = service.list_tasks().await.expect("list should succeed");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_propagates_storage_failure() {
    let mut repository = MockRepository::new();
    repository.expect_list().returning(|| Err(storage_failure()));

    let err = mocked(repository)
        .list_tasks()
        .await
        .expect_err("storage failure must surface");
    assert_eq!(err.kind(), TaskServiceErrorKind::Storage);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_get_reflects_new_values(service: TestService) {
    let created = service
        .create_task("Draft", "first pass")
        .await
        .expect("create should succeed");
    let id = created.id().to_string();

    let updated = service
        .update_task(&id, "  Final  ", "second pass")
        .await
        .expect("update should succeed");
    let fetched = service.get_task(&id).await.expect("get should succeed");

    assert_eq!(fetched, updated);
    assert_eq!(fetched.id(), created.id());
    assert_eq!(fetched.created_at(), created.created_at());
    assert_eq!(fetched.title().as_str(), "Final");
    assert_eq!(fetched.description(), "second pass");
    assert!(fetched.updated_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found(service: TestService) {
    let err = service
        .update_task(&TaskId::new().to_string(), "Title", "")
        .await
        .expect_err("nothing stored");
    assert_eq!(err.kind(), TaskServiceErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_validates_before_reading() {
    let mut repository = MockRepository::new();
    repository.expect_get().never();
    repository.expect_update().never();
    let service = mocked(repository);

    let blank = service
        .update_task(&TaskId::new().to_string(), "", "")
        .await
        .expect_err("blank title");
    let malformed = service
        .update_task("nope", "Title", "")
        .await
        .expect_err("malformed id");

    assert_eq!(blank.kind(), TaskServiceErrorKind::InvalidArgument);
    assert_eq!(malformed.kind(), TaskServiceErrorKind::InvalidArgument);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_is_not_found(service: TestService) {
    let created = service
        .create_task("Temporary", "")
        .await
        .expect("create should succeed");
    let id = created.id().to_string();

    assert!(service.delete_task(&id).await.expect("delete should succeed"));
    let err = service.get_task(&id).await.expect_err("task is gone");
    assert_eq!(err.kind(), TaskServiceErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_of_unknown_task_succeeds(service: TestService) {
    let deleted = service
        .delete_task(&TaskId::new().to_string())
        .await
        .expect("delete is idempotent");
    assert!(deleted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_propagates_storage_failure() {
    let mut repository = MockRepository::new();
    repository
        .expect_delete()
        .returning(|_| Err(storage_failure()));

    let err = mocked(repository)
        .delete_task(&TaskId::new().to_string())
        .await
        .expect_err("storage failure must surface");
    assert_eq!(err.kind(), TaskServiceErrorKind::Storage);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn error_display_names_kind_and_keeps_cause(service: TestService) {
    let err = service
        .create_task("", "")
        .await
        .expect_err("blank title");

    assert!(err.to_string().starts_with("invalid_argument: "));
    assert_eq!(err.to_string(), format!("invalid_argument: {}", err.message()));
    let cause = std::error::Error::source(&err).expect("domain error is kept");
    assert_eq!(cause.to_string(), err.message());
}
