//! Taskboard - a kanban task-board client
//!
//! Users sign in, create boards, split boards into columns and put tasks into
//! columns. All persistence and authentication is delegated to a backend
//! (a hosted Supabase project, or a local SQLite store); after every mutation
//! the affected collection is fetched again in full.
//!
//! # Modules
//!
//! * [`backend`] - Backend trait and its Supabase and local implementations
//! * [`repositories`] - Validated CRUD over boards, columns and tasks
//! * [`refresh`] - Screen controllers that reload after every mutation
//! * [`session`] - Signed-in session token and owner id
//! * [`config`] - Application configuration management
//! * [`utils`] - Due-date encoding and formatting

/// Backend abstraction layer and implementations
pub mod backend;

/// Command-line interface definitions and runners
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// User-facing messages
pub mod constants;

/// SeaORM entity models for the local backend's tables
pub mod entities;

/// Validation and query errors plus the notifications they produce
pub mod error;

/// Logging setup
pub mod logger;

/// Refresh-on-mutate screen controllers
pub mod refresh;

/// Repository layer over the backend
pub mod repositories;

/// Signed-in session handling
pub mod session;

/// Local SQLite storage for the offline backend
pub mod storage;

/// Utility functions for due-date handling
pub mod utils;

pub use error::{BoardError, Notification, Operation};
pub use session::Session;
