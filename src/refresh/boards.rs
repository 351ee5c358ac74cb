//! Board list screen for the signed-in user.

use std::sync::Arc;

use super::{ScreenState, Status};
use crate::backend::{Backend, BackendBoard, RowId};
use crate::constants::VALIDATION_NOTHING_TO_SAVE;
use crate::error::{BoardError, Notification};
use crate::repositories::BoardRepository;
use crate::session::Session;

/// Fields of the "new board" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDraft {
    pub name: String,
    pub description: String,
}

/// Fields of the "edit board" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEdit {
    pub board_id: RowId,
    pub name: String,
    pub description: String,
}

/// Controller for the boards owned by one session's user.
pub struct BoardsScreen {
    backend: Arc<dyn Backend>,
    session: Session,
    boards: Vec<BackendBoard>,
    status: Status,
    draft: BoardDraft,
    edit: Option<BoardEdit>,
}

impl BoardsScreen {
    pub fn new(backend: Arc<dyn Backend>, session: Session) -> Self {
        Self {
            backend,
            session,
            boards: Vec::new(),
            status: Status::default(),
            draft: BoardDraft::default(),
            edit: None,
        }
    }

    pub fn boards(&self) -> &[BackendBoard] {
        &self.boards
    }

    pub fn state(&self) -> &ScreenState {
        &self.status.state
    }

    /// The notification raised by the last failure, if not yet taken.
    pub fn notice(&self) -> Option<&Notification> {
        self.status.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notification> {
        self.status.notice.take()
    }

    pub fn draft(&self) -> &BoardDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BoardDraft {
        &mut self.draft
    }

    pub fn edit(&self) -> Option<&BoardEdit> {
        self.edit.as_ref()
    }

    pub fn edit_mut(&mut self) -> Option<&mut BoardEdit> {
        self.edit.as_mut()
    }

    /// Fetch the owner's boards. On failure the previous list stays in place.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        let previous = self.status.start();
        match BoardRepository::list(self.backend.as_ref(), self.session.owner_id()).await {
            Ok(boards) => {
                self.boards = boards;
                self.status.loaded();
                Ok(())
            }
            Err(err) => {
                self.status.fail(previous, &err);
                Err(err)
            }
        }
    }

    /// Create a board from the draft, then reload. The draft is cleared only on success.
    pub async fn submit_draft(&mut self) -> Result<(), BoardError> {
        let previous = self.status.start();
        let result = BoardRepository::create(
            self.backend.as_ref(),
            self.session.owner_id(),
            &self.draft.name,
            &self.draft.description,
        )
        .await;

        if let Err(err) = result {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.draft = BoardDraft::default();
        self.load().await
    }

    /// Open the edit form for a loaded board. Returns `false` if the board is not in the list.
    pub fn begin_edit(&mut self, board_id: &str) -> bool {
        match self.boards.iter().find(|b| b.id == board_id) {
            Some(board) => {
                self.edit = Some(BoardEdit {
                    board_id: board.id.clone(),
                    name: board.name.clone(),
                    description: board.description.clone().unwrap_or_default(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Save the edit form, then reload. The form is closed only on success.
    pub async fn save_edit(&mut self) -> Result<(), BoardError> {
        let Some(edit) = self.edit.clone() else {
            let err = BoardError::validation(VALIDATION_NOTHING_TO_SAVE);
            let state = self.status.state.clone();
            self.status.fail(state, &err);
            return Err(err);
        };

        let previous = self.status.start();
        if let Err(err) =
            BoardRepository::update(self.backend.as_ref(), &edit.board_id, &edit.name, &edit.description).await
        {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.edit = None;
        self.load().await
    }

    /// Delete a board, then reload.
    pub async fn delete(&mut self, board_id: &str) -> Result<(), BoardError> {
        let previous = self.status.start();
        if let Err(err) = BoardRepository::delete(self.backend.as_ref(), board_id).await {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.load().await
    }
}
