//! Task repository.

use log::{debug, info};

use super::column::position_for;
use super::{is_blank, optional_text};
use crate::backend::{Backend, BackendTask, CreateTaskArgs, UpdateTaskArgs};
use crate::constants::{VALIDATION_DUE_DATE, VALIDATION_TASK_TITLE};
use crate::error::{BoardError, Operation};
use crate::utils::datetime::normalize_due_date;

/// Repository for task operations, scoped to the owning column.
///
/// Tasks cannot be deleted or moved to another column individually.
pub struct TaskRepository;

impl TaskRepository {
    /// Get the tasks of a column ordered by position.
    pub async fn list<B>(backend: &B, column_id: &str) -> Result<Vec<BackendTask>, BoardError>
    where
        B: Backend + ?Sized,
    {
        let tasks = backend
            .fetch_tasks(column_id)
            .await
            .map_err(|e| BoardError::query(Operation::LoadTasks, e))?;
        debug!("Fetched {} tasks for column {column_id}", tasks.len());
        Ok(tasks)
    }

    /// Create a task at the end of a column.
    ///
    /// Only the title is required. `due_date` may be blank; otherwise it is
    /// normalized to the canonical encoding. The position is `sibling_count`.
    pub async fn create<B>(
        backend: &B,
        column_id: &str,
        title: &str,
        description: &str,
        due_date: &str,
        sibling_count: usize,
    ) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        let (description, due_date) = Self::validate(title, description, due_date)?;

        let args = CreateTaskArgs {
            title: title.to_string(),
            description,
            due_date,
            column_id: column_id.to_string(),
            position: position_for(sibling_count),
        };
        let task = backend
            .create_task(args)
            .await
            .map_err(|e| BoardError::query(Operation::CreateTask, e))?;
        info!("Created task {} at position {}", task.title, task.position);
        Ok(())
    }

    /// Replace a task's title, description and due date.
    pub async fn update<B>(
        backend: &B,
        task_id: &str,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        let (description, due_date) = Self::validate(title, description, due_date)?;
        Self::send_update(backend, task_id, title, description, due_date).await
    }

    /// Replace a task's title and description, writing `due_date` back unchanged.
    ///
    /// Used when the due date was not edited, so values stored in an older free-text
    /// form survive edits to the other fields.
    pub async fn update_keeping_due_date<B>(
        backend: &B,
        task_id: &str,
        title: &str,
        description: &str,
        due_date: String,
    ) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        if is_blank(title) {
            return Err(BoardError::validation(VALIDATION_TASK_TITLE));
        }
        Self::send_update(backend, task_id, title, optional_text(description), Some(due_date)).await
    }

    async fn send_update<B>(
        backend: &B,
        task_id: &str,
        title: &str,
        description: Option<String>,
        due_date: Option<String>,
    ) -> Result<(), BoardError>
    where
        B: Backend + ?Sized,
    {
        let args = UpdateTaskArgs {
            title: title.to_string(),
            description,
            due_date,
        };
        backend
            .update_task(task_id, args)
            .await
            .map_err(|e| BoardError::query(Operation::UpdateTask, e))?;
        info!("Updated task {task_id}");
        Ok(())
    }

    fn validate(
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<(Option<String>, Option<String>), BoardError> {
        if is_blank(title) {
            return Err(BoardError::validation(VALIDATION_TASK_TITLE));
        }
        let due_date = normalize_due_date(due_date).map_err(|_| BoardError::validation(VALIDATION_DUE_DATE))?;
        Ok((optional_text(description), due_date))
    }
}
