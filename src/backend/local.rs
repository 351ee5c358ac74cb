//! Local backend implementation.
//!
//! Serves the same query surface as the hosted service from a SQLite database
//! owned by this process. Ids are UUID v4 strings. Child rows follow their
//! parent on delete through the schema's foreign keys.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::{
    Backend, BackendBoard, BackendColumn, BackendError, BackendTask, CreateBoardArgs, CreateColumnArgs,
    CreateTaskArgs, UpdateBoardArgs, UpdateColumnArgs, UpdateTaskArgs,
};
use crate::entities::{board, column, task, user};
use crate::session::{Session, SessionUser};
use crate::storage::LocalStorage;

/// Backend storing rows in a local SQLite database.
pub struct LocalBackend {
    storage: LocalStorage,
}

impl LocalBackend {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Backend over a fresh in-memory database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(LocalStorage::in_memory().await?))
    }

    fn board_to_backend(model: board::Model) -> BackendBoard {
        BackendBoard {
            id: model.id,
            name: model.name,
            description: model.description,
            user_id: model.user_id,
        }
    }

    fn column_to_backend(model: column::Model, tasks: Vec<task::Model>) -> BackendColumn {
        BackendColumn {
            id: model.id,
            name: model.name,
            board_id: model.board_id,
            position: model.position,
            tasks: tasks.into_iter().map(Self::task_to_backend).collect(),
        }
    }

    fn task_to_backend(model: task::Model) -> BackendTask {
        BackendTask {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            column_id: model.column_id,
            position: model.position,
        }
    }

    fn session_for(account: user::Model) -> Session {
        Session {
            access_token: format!("local-{}", Uuid::new_v4()),
            refresh_token: None,
            token_type: "bearer".to_string(),
            expires_in: None,
            user: SessionUser {
                id: account.id,
                email: Some(account.email),
            },
        }
    }

    async fn find_column(&self, id: &str) -> Result<column::Model, BackendError> {
        column::Entity::find_by_id(id.to_string())
            .one(&self.storage.conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| BackendError::NotFound(format!("column {id}")))
    }
}

fn db_error(err: DbErr) -> BackendError {
    match err {
        DbErr::RecordNotFound(message) => BackendError::NotFound(message),
        DbErr::RecordNotInserted | DbErr::RecordNotUpdated => BackendError::InvalidData(err.to_string()),
        other => BackendError::Other(other.to_string()),
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn backend_type(&self) -> &str {
        "local"
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, BackendError> {
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.storage.conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| BackendError::Auth("Invalid login credentials".to_string()))?;
        Ok(Self::session_for(account))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<Option<Session>, BackendError> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.storage.conn)
            .await
            .map_err(db_error)?;
        if existing.is_some() {
            return Err(BackendError::Auth("User already registered".to_string()));
        }

        let account = user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            email: ActiveValue::Set(email.to_string()),
        }
        .insert(&self.storage.conn)
        .await
        .map_err(db_error)?;

        Ok(Some(Self::session_for(account)))
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), BackendError> {
        Ok(())
    }

    async fn attach_session(&self, _session: &Session) {}

    async fn fetch_boards(&self, user_id: &str) -> Result<Vec<BackendBoard>, BackendError> {
        let boards = board::Entity::find()
            .filter(board::Column::UserId.eq(user_id))
            .all(&self.storage.conn)
            .await
            .map_err(db_error)?;
        Ok(boards.into_iter().map(Self::board_to_backend).collect())
    }

    async fn create_board(&self, args: CreateBoardArgs) -> Result<BackendBoard, BackendError> {
        let model = board::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            name: ActiveValue::Set(args.name),
            description: ActiveValue::Set(Some(args.description)),
            user_id: ActiveValue::Set(args.user_id),
        }
        .insert(&self.storage.conn)
        .await
        .map_err(db_error)?;
        Ok(Self::board_to_backend(model))
    }

    async fn update_board(&self, id: &str, args: UpdateBoardArgs) -> Result<BackendBoard, BackendError> {
        let existing = board::Entity::find_by_id(id.to_string())
            .one(&self.storage.conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| BackendError::NotFound(format!("board {id}")))?;

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(args.name);
        active.description = ActiveValue::Set(Some(args.description));
        let model = active.update(&self.storage.conn).await.map_err(db_error)?;
        Ok(Self::board_to_backend(model))
    }

    async fn delete_board(&self, id: &str) -> Result<(), BackendError> {
        board::Entity::delete_by_id(id.to_string())
            .exec(&self.storage.conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn fetch_columns(&self, board_id: &str) -> Result<Vec<BackendColumn>, BackendError> {
        let columns = column::Entity::find()
            .filter(column::Column::BoardId.eq(board_id))
            .order_by_asc(column::Column::Position)
            .all(&self.storage.conn)
            .await
            .map_err(db_error)?;

        let mut result = Vec::with_capacity(columns.len());
        for model in columns {
            let tasks = model
                .find_related(task::Entity)
                .order_by_asc(task::Column::Position)
                .all(&self.storage.conn)
                .await
                .map_err(db_error)?;
            result.push(Self::column_to_backend(model, tasks));
        }
        Ok(result)
    }

    async fn create_column(&self, args: CreateColumnArgs) -> Result<BackendColumn, BackendError> {
        let model = column::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            name: ActiveValue::Set(args.name),
            board_id: ActiveValue::Set(args.board_id),
            position: ActiveValue::Set(args.position),
        }
        .insert(&self.storage.conn)
        .await
        .map_err(db_error)?;
        Ok(Self::column_to_backend(model, Vec::new()))
    }

    async fn update_column(&self, id: &str, args: UpdateColumnArgs) -> Result<BackendColumn, BackendError> {
        let existing = self.find_column(id).await?;
        let tasks = existing
            .find_related(task::Entity)
            .order_by_asc(task::Column::Position)
            .all(&self.storage.conn)
            .await
            .map_err(db_error)?;

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(args.name);
        let model = active.update(&self.storage.conn).await.map_err(db_error)?;
        Ok(Self::column_to_backend(model, tasks))
    }

    async fn delete_column(&self, id: &str) -> Result<(), BackendError> {
        column::Entity::delete_by_id(id.to_string())
            .exec(&self.storage.conn)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn fetch_tasks(&self, column_id: &str) -> Result<Vec<BackendTask>, BackendError> {
        let tasks = task::Entity::find()
            .filter(task::Column::ColumnId.eq(column_id))
            .order_by_asc(task::Column::Position)
            .all(&self.storage.conn)
            .await
            .map_err(db_error)?;
        Ok(tasks.into_iter().map(Self::task_to_backend).collect())
    }

    async fn create_task(&self, args: CreateTaskArgs) -> Result<BackendTask, BackendError> {
        let model = task::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            title: ActiveValue::Set(args.title),
            description: ActiveValue::Set(args.description),
            due_date: ActiveValue::Set(args.due_date),
            column_id: ActiveValue::Set(args.column_id),
            position: ActiveValue::Set(args.position),
        }
        .insert(&self.storage.conn)
        .await
        .map_err(db_error)?;
        Ok(Self::task_to_backend(model))
    }

    async fn update_task(&self, id: &str, args: UpdateTaskArgs) -> Result<BackendTask, BackendError> {
        let existing = task::Entity::find_by_id(id.to_string())
            .one(&self.storage.conn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| BackendError::NotFound(format!("task {id}")))?;

        let mut active = existing.into_active_model();
        active.title = ActiveValue::Set(args.title);
        active.description = ActiveValue::Set(args.description);
        active.due_date = ActiveValue::Set(args.due_date);
        let model = active.update(&self.storage.conn).await.map_err(db_error)?;
        Ok(Self::task_to_backend(model))
    }
}
