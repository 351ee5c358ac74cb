//! Refresh-on-mutate screen controllers.
//!
//! A screen holds a transient copy of one backend collection plus the form state
//! the user is typing into. Every successful create/update/delete is followed by
//! a full reload of the collection; nothing is patched locally, so after each
//! mutation the screen shows exactly what a fresh fetch returns.
//!
//! Failure rules shared by every screen:
//! - validation failures make no backend call and leave the list, the state and
//!   the form untouched;
//! - backend failures keep the previous list and the form so the user can retry,
//!   move the screen to [`ScreenState::Error`] and raise a [`Notification`];
//! - there is no debounce, cache, timeout or cancellation.

pub mod boards;
pub mod columns;

pub use boards::{BoardDraft, BoardEdit, BoardsScreen};
pub use columns::{ColumnRename, ColumnsScreen, TaskDraft, TaskEdit};

use log::warn;

use crate::error::{BoardError, Notification};

/// Lifecycle of a screen's collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A backend call is outstanding
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last backend call failed
    Error {
        /// Message of the failure
        message: String,
    },
}

/// State plus the pending notification, shared by all screens.
#[derive(Debug, Default)]
pub(crate) struct Status {
    pub(crate) state: ScreenState,
    pub(crate) notice: Option<Notification>,
}

impl Status {
    /// Enter `Loading`, returning the state to restore if nothing gets sent.
    pub(crate) fn start(&mut self) -> ScreenState {
        std::mem::replace(&mut self.state, ScreenState::Loading)
    }

    pub(crate) fn loaded(&mut self) {
        self.state = ScreenState::Loaded;
    }

    pub(crate) fn fail(&mut self, previous: ScreenState, err: &BoardError) {
        let notice = err.notification();
        self.state = if err.is_validation() {
            previous
        } else {
            warn!("{notice}");
            ScreenState::Error {
                message: notice.message.clone(),
            }
        };
        self.notice = Some(notice);
    }
}
