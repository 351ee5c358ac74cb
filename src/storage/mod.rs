//! Local storage module backing the offline board backend.
//!
//! This module owns the SeaORM connection and the schema for:
//! - Users
//! - Boards
//! - Columns
//! - Tasks

pub mod db;

pub use db::LocalStorage;
