//! Board detail screen: the columns of one board with their tasks.
//!
//! Column and task mutations both reload the whole board, since the column
//! fetch carries every column's tasks.

use std::sync::Arc;

use super::{ScreenState, Status};
use crate::backend::{Backend, BackendColumn, BackendTask, RowId};
use crate::constants::{VALIDATION_NOTHING_TO_SAVE, VALIDATION_TASK_COLUMN};
use crate::error::{BoardError, Notification};
use crate::repositories::{ColumnRepository, TaskRepository};

/// Fields of the "rename column" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRename {
    pub column_id: RowId,
    pub name: String,
}

/// Fields of the "add task" form, bound to the column it was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub column_id: RowId,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Fields of the "edit task" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub task_id: RowId,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Controller for one board's columns and tasks.
pub struct ColumnsScreen {
    backend: Arc<dyn Backend>,
    board_id: RowId,
    columns: Vec<BackendColumn>,
    status: Status,
    new_column_name: String,
    rename: Option<ColumnRename>,
    task_draft: Option<TaskDraft>,
    task_edit: Option<TaskEdit>,
}

impl ColumnsScreen {
    pub fn new(backend: Arc<dyn Backend>, board_id: impl Into<RowId>) -> Self {
        Self {
            backend,
            board_id: board_id.into(),
            columns: Vec::new(),
            status: Status::default(),
            new_column_name: String::new(),
            rename: None,
            task_draft: None,
            task_edit: None,
        }
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Columns ordered by position, as last fetched.
    pub fn columns(&self) -> &[BackendColumn] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&BackendColumn> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn state(&self) -> &ScreenState {
        &self.status.state
    }

    pub fn notice(&self) -> Option<&Notification> {
        self.status.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notification> {
        self.status.notice.take()
    }

    pub fn new_column_name(&self) -> &str {
        &self.new_column_name
    }

    pub fn new_column_name_mut(&mut self) -> &mut String {
        &mut self.new_column_name
    }

    pub fn rename(&self) -> Option<&ColumnRename> {
        self.rename.as_ref()
    }

    pub fn rename_mut(&mut self) -> Option<&mut ColumnRename> {
        self.rename.as_mut()
    }

    pub fn task_draft(&self) -> Option<&TaskDraft> {
        self.task_draft.as_ref()
    }

    pub fn task_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.task_draft.as_mut()
    }

    pub fn task_edit(&self) -> Option<&TaskEdit> {
        self.task_edit.as_ref()
    }

    pub fn task_edit_mut(&mut self) -> Option<&mut TaskEdit> {
        self.task_edit.as_mut()
    }

    /// Fetch the board's columns with their tasks. On failure the previous list stays.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        let previous = self.status.start();
        match ColumnRepository::list(self.backend.as_ref(), &self.board_id).await {
            Ok(columns) => {
                self.columns = columns;
                self.status.loaded();
                Ok(())
            }
            Err(err) => {
                self.status.fail(previous, &err);
                Err(err)
            }
        }
    }

    /// Append a column named after the draft field. Its position is the current column count.
    pub async fn add_column(&mut self) -> Result<(), BoardError> {
        let previous = self.status.start();
        let sibling_count = self.columns.len();
        if let Err(err) =
            ColumnRepository::create(self.backend.as_ref(), &self.board_id, &self.new_column_name, sibling_count).await
        {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.new_column_name.clear();
        self.load().await
    }

    /// Open the rename form for a loaded column.
    pub fn begin_rename(&mut self, column_id: &str) -> bool {
        match self.column(column_id) {
            Some(column) => {
                self.rename = Some(ColumnRename {
                    column_id: column.id.clone(),
                    name: column.name.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    pub async fn save_rename(&mut self) -> Result<(), BoardError> {
        let Some(rename) = self.rename.clone() else {
            return Err(self.reject(VALIDATION_NOTHING_TO_SAVE));
        };

        let previous = self.status.start();
        if let Err(err) = ColumnRepository::update(self.backend.as_ref(), &rename.column_id, &rename.name).await {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.rename = None;
        self.load().await
    }

    /// Delete a column, then reload. Remaining columns keep their positions.
    pub async fn delete_column(&mut self, column_id: &str) -> Result<(), BoardError> {
        let previous = self.status.start();
        if let Err(err) = ColumnRepository::delete(self.backend.as_ref(), column_id).await {
            self.status.fail(previous, &err);
            return Err(err);
        }
        if self.rename.as_ref().is_some_and(|r| r.column_id == column_id) {
            self.rename = None;
        }
        self.load().await
    }

    /// Open an empty "add task" form on a column.
    pub fn open_task_draft(&mut self, column_id: &str) {
        self.task_draft = Some(TaskDraft {
            column_id: column_id.to_string(),
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
        });
    }

    pub fn cancel_task_draft(&mut self) {
        self.task_draft = None;
    }

    /// Create the drafted task. Its position is the column's current task count.
    ///
    /// The draft's column must be one of the loaded columns of this board.
    pub async fn add_task(&mut self) -> Result<(), BoardError> {
        let Some(draft) = self.task_draft.clone() else {
            return Err(self.reject(VALIDATION_TASK_COLUMN));
        };

        let Some(sibling_count) = self.column(&draft.column_id).map(|c| c.tasks.len()) else {
            return Err(self.reject(VALIDATION_TASK_COLUMN));
        };
        let previous = self.status.start();
        if let Err(err) = TaskRepository::create(
            self.backend.as_ref(),
            &draft.column_id,
            &draft.title,
            &draft.description,
            &draft.due_date,
            sibling_count,
        )
        .await
        {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.task_draft = None;
        self.load().await
    }

    /// Open the edit form for a loaded task.
    pub fn begin_task_edit(&mut self, task_id: &str) -> bool {
        match self.find_task(task_id) {
            Some(task) => {
                self.task_edit = Some(TaskEdit {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    description: task.description.clone().unwrap_or_default(),
                    due_date: task.due_date.clone().unwrap_or_default(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_task_edit(&mut self) {
        self.task_edit = None;
    }

    pub async fn save_task_edit(&mut self) -> Result<(), BoardError> {
        let Some(edit) = self.task_edit.clone() else {
            return Err(self.reject(VALIDATION_NOTHING_TO_SAVE));
        };

        // A stored due date the form left untouched is written back as stored
        let stored_due = self
            .find_task(&edit.task_id)
            .and_then(|task| task.due_date.clone())
            .filter(|due| *due == edit.due_date);

        let previous = self.status.start();
        let result = match stored_due {
            Some(due_date) => {
                TaskRepository::update_keeping_due_date(
                    self.backend.as_ref(),
                    &edit.task_id,
                    &edit.title,
                    &edit.description,
                    due_date,
                )
                .await
            }
            None => {
                TaskRepository::update(
                    self.backend.as_ref(),
                    &edit.task_id,
                    &edit.title,
                    &edit.description,
                    &edit.due_date,
                )
                .await
            }
        };
        if let Err(err) = result {
            self.status.fail(previous, &err);
            return Err(err);
        }
        self.task_edit = None;
        self.load().await
    }

    fn find_task(&self, task_id: &str) -> Option<&BackendTask> {
        self.columns.iter().flat_map(|c| c.tasks.iter()).find(|t| t.id == task_id)
    }

    // Validation failure raised by the screen itself, before any repository call.
    fn reject(&mut self, message: &str) -> BoardError {
        let err = BoardError::validation(message);
        let state = self.status.state.clone();
        self.status.fail(state, &err);
        err
    }
}
