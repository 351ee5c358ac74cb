//! Backend abstraction layer.
//!
//! This module defines the query surface the board client needs from the hosted
//! service: authentication plus select/insert/update/delete over boards, columns
//! and tasks. Implementations translate these calls into their own storage or
//! wire protocol.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::session::Session;

pub mod factory;
pub mod local;
pub mod supabase;

pub use factory::create_backend;
pub use local::LocalBackend;
pub use supabase::SupabaseBackend;

/// Backend-assigned row identifier. Opaque to the client.
pub type RowId = String;

/// Common error types for backend operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// Board row as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendBoard {
    #[serde(deserialize_with = "de_row_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: String,
}

/// Column row, carrying its tasks ordered by position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendColumn {
    #[serde(deserialize_with = "de_row_id")]
    pub id: RowId,
    pub name: String,
    #[serde(deserialize_with = "de_row_id")]
    pub board_id: RowId,
    pub position: i32,
    #[serde(default, deserialize_with = "de_tasks")]
    pub tasks: Vec<BackendTask>,
}

/// Task row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendTask {
    #[serde(deserialize_with = "de_row_id")]
    pub id: RowId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "de_row_id")]
    pub column_id: RowId,
    pub position: i32,
}

/// Arguments for creating a new board.
#[derive(Clone, Debug, Serialize)]
pub struct CreateBoardArgs {
    pub name: String,
    pub description: String,
    pub user_id: String,
}

/// Arguments for updating a board. Both fields are always replaced.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateBoardArgs {
    pub name: String,
    pub description: String,
}

/// Arguments for creating a new column.
#[derive(Clone, Debug, Serialize)]
pub struct CreateColumnArgs {
    pub name: String,
    pub board_id: RowId,
    pub position: i32,
}

/// Arguments for updating a column. Only the name can change.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateColumnArgs {
    pub name: String,
}

/// Arguments for creating a new task.
#[derive(Clone, Debug, Serialize)]
pub struct CreateTaskArgs {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub column_id: RowId,
    pub position: i32,
}

/// Arguments for updating a task (full replacement of the editable fields).
#[derive(Clone, Debug, Serialize)]
pub struct UpdateTaskArgs {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Backend trait that every board service implementation must provide.
///
/// Each call is a single round trip; no multi-row transactions are expected.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "supabase", "local").
    fn backend_type(&self) -> &str;

    // Authentication
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;
    /// Returns `None` when the account must be confirmed before a session is issued.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, BackendError>;
    async fn sign_out(&self, session: &Session) -> Result<(), BackendError>;
    /// Make subsequent row operations on behalf of `session`.
    async fn attach_session(&self, session: &Session);

    // Boards
    async fn fetch_boards(&self, user_id: &str) -> Result<Vec<BackendBoard>, BackendError>;
    async fn create_board(&self, args: CreateBoardArgs) -> Result<BackendBoard, BackendError>;
    async fn update_board(&self, id: &str, args: UpdateBoardArgs) -> Result<BackendBoard, BackendError>;
    async fn delete_board(&self, id: &str) -> Result<(), BackendError>;

    // Columns
    async fn fetch_columns(&self, board_id: &str) -> Result<Vec<BackendColumn>, BackendError>;
    async fn create_column(&self, args: CreateColumnArgs) -> Result<BackendColumn, BackendError>;
    async fn update_column(&self, id: &str, args: UpdateColumnArgs) -> Result<BackendColumn, BackendError>;
    async fn delete_column(&self, id: &str) -> Result<(), BackendError>;

    // Tasks
    async fn fetch_tasks(&self, column_id: &str) -> Result<Vec<BackendTask>, BackendError>;
    async fn create_task(&self, args: CreateTaskArgs) -> Result<BackendTask, BackendError>;
    async fn update_task(&self, id: &str, args: UpdateTaskArgs) -> Result<BackendTask, BackendError>;
}

/// Accept ids as JSON strings or numbers (bigint primary keys come back as numbers).
fn de_row_id<'de, D>(deserializer: D) -> Result<RowId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

// An embedded relation the caller did not select comes back as null.
fn de_tasks<'de, D>(deserializer: D) -> Result<Vec<BackendTask>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BackendTask>>::deserialize(deserializer)?.unwrap_or_default())
}
