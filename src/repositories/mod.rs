//! Repository layer for board data.
//!
//! Repositories are stateless: each associated function validates its input,
//! makes exactly one backend round trip and maps failures onto [`BoardError`].
//! They never patch client state; refreshing is the caller's job.
//!
//! [`BoardError`]: crate::error::BoardError

pub mod board;
pub mod column;
pub mod task;

pub use board::BoardRepository;
pub use column::ColumnRepository;
pub use task::TaskRepository;

/// `true` when a required text field has no content.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Blank optional text is stored as null.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.to_string())
    }
}
