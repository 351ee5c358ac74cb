//! Error types surfaced to the user by the board screens.
//!
//! Two kinds exist: validation failures, caught before any backend call, and
//! query failures, where the backend call itself failed. Both render as one
//! notification carrying the operation and the underlying message.

use std::fmt;

use crate::backend::BackendError;
use crate::constants::*;

/// User action a query failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadBoards,
    CreateBoard,
    UpdateBoard,
    DeleteBoard,
    LoadColumns,
    CreateColumn,
    UpdateColumn,
    DeleteColumn,
    LoadTasks,
    CreateTask,
    UpdateTask,
    SignIn,
    SignUp,
    SignOut,
}

impl Operation {
    /// Notification title shown when this operation fails.
    pub fn failure_title(self) -> &'static str {
        match self {
            Operation::LoadBoards => ERROR_BOARDS_LOAD_FAILED,
            Operation::CreateBoard => ERROR_BOARD_CREATE_FAILED,
            Operation::UpdateBoard => ERROR_BOARD_UPDATE_FAILED,
            Operation::DeleteBoard => ERROR_BOARD_DELETE_FAILED,
            Operation::LoadColumns => ERROR_COLUMNS_LOAD_FAILED,
            Operation::CreateColumn => ERROR_COLUMN_CREATE_FAILED,
            Operation::UpdateColumn => ERROR_COLUMN_UPDATE_FAILED,
            Operation::DeleteColumn => ERROR_COLUMN_DELETE_FAILED,
            Operation::LoadTasks => ERROR_TASKS_LOAD_FAILED,
            Operation::CreateTask => ERROR_TASK_CREATE_FAILED,
            Operation::UpdateTask => ERROR_TASK_UPDATE_FAILED,
            Operation::SignIn => ERROR_SIGN_IN_FAILED,
            Operation::SignUp => ERROR_SIGN_UP_FAILED,
            Operation::SignOut => ERROR_SIGN_OUT_FAILED,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_title())
    }
}

/// Errors returned by repositories and screens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    /// A required field was empty or malformed; nothing was sent.
    #[error("{message}")]
    Validation { message: String },

    /// The backend call failed.
    #[error("{operation}: {source}")]
    Query {
        operation: Operation,
        #[source]
        source: BackendError,
    },
}

impl BoardError {
    pub fn validation(message: impl Into<String>) -> Self {
        BoardError::Validation {
            message: message.into(),
        }
    }

    pub fn query(operation: Operation, source: BackendError) -> Self {
        BoardError::Query { operation, source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BoardError::Validation { .. })
    }

    /// The single user-facing notification for this error.
    pub fn notification(&self) -> Notification {
        match self {
            BoardError::Validation { message } => Notification {
                title: VALIDATION_TITLE.to_string(),
                message: message.clone(),
            },
            BoardError::Query { operation, source } => Notification {
                title: operation.failure_title().to_string(),
                message: backend_message(source),
            },
        }
    }
}

/// The message inside a backend error, without the variant prefix.
fn backend_message(err: &BackendError) -> String {
    match err {
        BackendError::Auth(m)
        | BackendError::NotFound(m)
        | BackendError::Network(m)
        | BackendError::InvalidData(m)
        | BackendError::Other(m) => m.clone(),
    }
}

/// A title/message pair shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
