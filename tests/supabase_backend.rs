//! HTTP mock tests for the Supabase backend.
//!
//! Uses wiremock to stand in for the PostgREST and GoTrue endpoints.

use serde_json::json;
use taskboard::backend::{Backend, BackendError, CreateColumnArgs, SupabaseBackend, UpdateTaskArgs};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "anon-key";

fn backend_for(server: &MockServer) -> SupabaseBackend {
    SupabaseBackend::new(&server.uri(), ANON_KEY.to_string())
}

fn session_json(token: &str) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1736951400,
        "refresh_token": "refresh",
        "user": { "id": "u1", "email": "u1@example.com", "aud": "authenticated" }
    })
}

#[tokio::test]
async fn test_fetch_boards_filters_by_owner() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/boards"))
        .and(query_param("user_id", "eq.u1"))
        .and(header("apikey", ANON_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Launch", "description": "Q1 launch plan", "user_id": "u1" },
            { "id": 8, "name": "Ops", "description": null, "user_id": "u1" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let boards = backend_for(&server).fetch_boards("u1").await.unwrap();

    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].id, "7");
    assert_eq!(boards[0].name, "Launch");
    assert_eq!(boards[1].description, None);
}

#[tokio::test]
async fn test_fetch_columns_orders_columns_and_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/columns"))
        .and(query_param("board_id", "eq.b1"))
        .and(query_param("order", "position.asc"))
        .and(query_param("tasks.order", "position.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "c1", "name": "Todo", "board_id": "b1", "position": 0,
                "tasks": [{
                    "id": "t1", "title": "Write spec", "description": null,
                    "due_date": "2025-01-15 14:30", "column_id": "c1", "position": 0
                }]
            },
            { "id": "c2", "name": "Done", "board_id": "b1", "position": 1, "tasks": null }
        ])))
        .mount(&server)
        .await;

    let columns = backend_for(&server).fetch_columns("b1").await.unwrap();

    assert_eq!(columns[0].tasks.len(), 1);
    assert_eq!(columns[0].tasks[0].due_date.as_deref(), Some("2025-01-15 14:30"));
    assert!(columns[1].tasks.is_empty());
}

#[tokio::test]
async fn test_create_column_posts_single_row_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/columns"))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!([{ "name": "Todo", "board_id": "b1", "position": 0 }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "c1", "name": "Todo", "board_id": "b1", "position": 0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let column = backend_for(&server)
        .create_column(CreateColumnArgs {
            name: "Todo".to_string(),
            board_id: "b1".to_string(),
            position: 0,
        })
        .await
        .unwrap();

    assert_eq!(column.id, "c1");
    assert!(column.tasks.is_empty());
}

#[tokio::test]
async fn test_sign_in_token_is_used_for_row_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({ "email": "u1@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("user-token")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/boards"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let session = backend.sign_in("u1@example.com", "secret").await.unwrap();
    assert_eq!(session.owner_id(), "u1");

    let boards = backend.fetch_boards(session.owner_id()).await.unwrap();
    assert!(boards.is_empty());
}

#[tokio::test]
async fn test_bad_credentials_map_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/boards"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);

    let err = backend.sign_in("u1@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, BackendError::InvalidData("Invalid login credentials".to_string()));

    let err = backend.fetch_boards("u1").await.unwrap_err();
    assert_eq!(err, BackendError::Auth("JWT expired".to_string()));
}

#[tokio::test]
async fn test_sign_up_pending_confirmation_returns_no_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u2",
            "email": "new@example.com",
            "confirmation_sent_at": "2025-01-15T14:30:00Z"
        })))
        .mount(&server)
        .await;

    let session = backend_for(&server).sign_up("new@example.com", "secret").await.unwrap();

    assert!(session.is_none());
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.t9"))
        .and(body_json(json!({ "title": "Ship", "description": null, "due_date": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .update_task(
            "t9",
            UpdateTaskArgs {
                title: "Ship".to_string(),
                description: None,
                due_date: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_column_and_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/columns"))
        .and(query_param("id", "eq.c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/columns"))
        .and(query_param("id", "eq.c2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend.delete_column("c1").await.unwrap();

    let err = backend.delete_column("c2").await.unwrap_err();
    assert_eq!(err, BackendError::Other("upstream unavailable".to_string()));
}
