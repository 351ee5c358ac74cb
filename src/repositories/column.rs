//! Column repository.

use log::{debug, info};

use super::is_blank;
use crate::backend::{Backend, BackendColumn, CreateColumnArgs, UpdateColumnArgs};
use crate::constants::VALIDATION_COLUMN_NAME;
use crate::error::{BoardError, Operation};

/// Repository for column operations, scoped to the owning board.
pub struct ColumnRepository;

impl ColumnRepository {
    /// Get the columns of a board ordered by position, each with its tasks.
    pub async fn list<B>(backend: &B, board_id: &str) -> Result<Vec<BackendColumn>, BoardError>
    where
        B: Backend + ?Sized,
    {
        let columns = backend
            .fetch_columns(board_id)
            .await
            .map_err(|e| BoardError::query(Operation::LoadColumns, e))?;
        debug!("Fetched {} columns for board {board_id}", columns.len());
        Ok(columns)
    }

    /// Create a column at the end of the board.
    ///
    /// The position is `sibling_count`, the number of columns the caller currently
    /// knows about. Positions are never recomputed, so deletes leave gaps and two
    /// racing creates may share a position.
    pub async fn create<B>(backend: &B, board_id: &str, name: &str, sibling_count: usize) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        if is_blank(name) {
            return Err(BoardError::validation(VALIDATION_COLUMN_NAME));
        }

        let args = CreateColumnArgs {
            name: name.to_string(),
            board_id: board_id.to_string(),
            position: position_for(sibling_count),
        };
        let column = backend
            .create_column(args)
            .await
            .map_err(|e| BoardError::query(Operation::CreateColumn, e))?;
        info!("Created column {} at position {}", column.name, column.position);
        Ok(())
    }

    /// Rename a column. Position and board are left as they are.
    pub async fn update<B>(backend: &B, column_id: &str, name: &str) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        if is_blank(name) {
            return Err(BoardError::validation(VALIDATION_COLUMN_NAME));
        }

        let args = UpdateColumnArgs { name: name.to_string() };
        backend
            .update_column(column_id, args)
            .await
            .map_err(|e| BoardError::query(Operation::UpdateColumn, e))?;
        info!("Renamed column {column_id}");
        Ok(())
    }

    /// Delete a column. Sibling positions are not touched.
    pub async fn delete<B>(backend: &B, column_id: &str) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        backend
            .delete_column(column_id)
            .await
            .map_err(|e| BoardError::query(Operation::DeleteColumn, e))?;
        info!("Deleted column {column_id}");
        Ok(())
    }
}

/// Convert a sibling count into a stored position.
pub(crate) fn position_for(sibling_count: usize) -> i32 {
    i32::try_from(sibling_count).unwrap_or(i32::MAX)
}
