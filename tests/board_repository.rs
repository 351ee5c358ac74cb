mod common;

use common::{signed_up, CountingBackend};
use taskboard::backend::BackendError;
use taskboard::error::{BoardError, Operation};
use taskboard::repositories::BoardRepository;

#[tokio::test]
async fn test_created_board_is_listed() {
    let backend = CountingBackend::new().await;
    let session = signed_up(backend.as_ref(), "u1@example.com").await;

    BoardRepository::create(backend.as_ref(), session.owner_id(), "Launch", "Q1 launch plan")
        .await
        .unwrap();

    let boards = BoardRepository::list(backend.as_ref(), session.owner_id()).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Launch");
    assert_eq!(boards[0].description.as_deref(), Some("Q1 launch plan"));
    assert_eq!(boards[0].user_id, session.owner_id());
}

#[tokio::test]
async fn test_boards_are_scoped_to_owner() {
    let backend = CountingBackend::new().await;
    let alice = signed_up(backend.as_ref(), "alice@example.com").await;
    let bob = signed_up(backend.as_ref(), "bob@example.com").await;

    BoardRepository::create(backend.as_ref(), alice.owner_id(), "Alice", "hers").await.unwrap();
    BoardRepository::create(backend.as_ref(), bob.owner_id(), "Bob", "his").await.unwrap();

    let boards = BoardRepository::list(backend.as_ref(), alice.owner_id()).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Alice");
}

#[tokio::test]
async fn test_blank_fields_make_no_backend_call() {
    let backend = CountingBackend::new().await;
    let session = signed_up(backend.as_ref(), "u1@example.com").await;

    let empty_name = BoardRepository::create(backend.as_ref(), session.owner_id(), "", "desc").await;
    let blank_description = BoardRepository::create(backend.as_ref(), session.owner_id(), "Name", "   ").await;

    assert!(matches!(empty_name, Err(BoardError::Validation { .. })));
    assert!(matches!(blank_description, Err(BoardError::Validation { .. })));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_update_replaces_name_and_description() {
    let backend = CountingBackend::new().await;
    let session = signed_up(backend.as_ref(), "u1@example.com").await;
    BoardRepository::create(backend.as_ref(), session.owner_id(), "Launch", "Q1 launch plan")
        .await
        .unwrap();
    let board_id = BoardRepository::list(backend.as_ref(), session.owner_id()).await.unwrap()[0]
        .id
        .clone();

    BoardRepository::update(backend.as_ref(), &board_id, "Relaunch", "Q2 plan").await.unwrap();

    let boards = BoardRepository::list(backend.as_ref(), session.owner_id()).await.unwrap();
    assert_eq!(boards[0].id, board_id);
    assert_eq!(boards[0].name, "Relaunch");
    assert_eq!(boards[0].description.as_deref(), Some("Q2 plan"));
}

#[tokio::test]
async fn test_update_validates_before_sending() {
    let backend = CountingBackend::new().await;
    let result = BoardRepository::update(backend.as_ref(), "any", "Name", "").await;
    assert!(result.unwrap_err().is_validation());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_delete_removes_board() {
    let backend = CountingBackend::new().await;
    let session = signed_up(backend.as_ref(), "u1@example.com").await;
    BoardRepository::create(backend.as_ref(), session.owner_id(), "Launch", "Q1").await.unwrap();
    let board_id = BoardRepository::list(backend.as_ref(), session.owner_id()).await.unwrap()[0]
        .id
        .clone();

    BoardRepository::delete(backend.as_ref(), &board_id).await.unwrap();

    assert!(BoardRepository::list(backend.as_ref(), session.owner_id()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_failure_is_query_error() {
    let backend = CountingBackend::new().await;
    backend.set_fail_fetches(true);

    let err = BoardRepository::list(backend.as_ref(), "u1").await.unwrap_err();
    assert_eq!(
        err,
        BoardError::Query {
            operation: Operation::LoadBoards,
            source: BackendError::Network("connection refused".to_string()),
        }
    );
    assert_eq!(err.notification().title, "Loading boards failed");
}
