//! Board repository.

use log::{debug, info};

use super::is_blank;
use crate::backend::{Backend, BackendBoard, CreateBoardArgs, UpdateBoardArgs};
use crate::constants::VALIDATION_BOARD_FIELDS;
use crate::error::{BoardError, Operation};

/// Repository for board operations, scoped to the owning user.
pub struct BoardRepository;

impl BoardRepository {
    /// Get all boards owned by `owner_id`, in backend order.
    pub async fn list<B>(backend: &B, owner_id: &str) -> Result<Vec<BackendBoard>, BoardError>
    where
        B: Backend + ?Sized,
    {
        let boards = backend
            .fetch_boards(owner_id)
            .await
            .map_err(|e| BoardError::query(Operation::LoadBoards, e))?;
        debug!("Fetched {} boards for {owner_id}", boards.len());
        Ok(boards)
    }

    /// Create a board owned by `owner_id`. Name and description are both required.
    pub async fn create<B>(backend: &B, owner_id: &str, name: &str, description: &str) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        Self::validate(name, description)?;

        let args = CreateBoardArgs {
            name: name.to_string(),
            description: description.to_string(),
            user_id: owner_id.to_string(),
        };
        let board = backend
            .create_board(args)
            .await
            .map_err(|e| BoardError::query(Operation::CreateBoard, e))?;
        info!("Created board {} ({})", board.name, board.id);
        Ok(())
    }

    /// Replace a board's name and description.
    pub async fn update<B>(backend: &B, board_id: &str, name: &str, description: &str) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        Self::validate(name, description)?;

        let args = UpdateBoardArgs {
            name: name.to_string(),
            description: description.to_string(),
        };
        backend
            .update_board(board_id, args)
            .await
            .map_err(|e| BoardError::query(Operation::UpdateBoard, e))?;
        info!("Updated board {board_id}");
        Ok(())
    }

    /// Delete a board. Confirmation, if any, is the caller's concern.
    pub async fn delete<B>(backend: &B, board_id: &str) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        backend
            .delete_board(board_id)
            .await
            .map_err(|e| BoardError::query(Operation::DeleteBoard, e))?;
        info!("Deleted board {board_id}");
        Ok(())
    }

    fn validate(name: &str, description: &str) -> Result<(), BoardError> {
        if is_blank(name) || is_blank(description) {
            return Err(BoardError::validation(VALIDATION_BOARD_FIELDS));
        }
        Ok(())
    }
}
