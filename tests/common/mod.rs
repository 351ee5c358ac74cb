#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use taskboard::backend::{
    Backend, BackendBoard, BackendColumn, BackendError, BackendTask, CreateBoardArgs, CreateColumnArgs,
    CreateTaskArgs, LocalBackend, UpdateBoardArgs, UpdateColumnArgs, UpdateTaskArgs,
};
use taskboard::session::Session;

/// Wraps a backend, counting every row call and optionally failing them.
pub struct CountingBackend {
    inner: LocalBackend,
    calls: AtomicUsize,
    fail_fetches: AtomicBool,
    fail_mutations: AtomicBool,
}

impl CountingBackend {
    pub async fn new() -> Arc<Self> {
        let inner = LocalBackend::in_memory().await.expect("in-memory backend");
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_fetches: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn fetch(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(BackendError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn mutation(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(BackendError::Other("permission denied for table".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for CountingBackend {
    fn backend_type(&self) -> &str {
        "counting"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.inner.sign_in(email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, BackendError> {
        self.inner.sign_up(email, password).await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        self.inner.sign_out(session).await
    }

    async fn attach_session(&self, session: &Session) {
        self.inner.attach_session(session).await
    }

    async fn fetch_boards(&self, user_id: &str) -> Result<Vec<BackendBoard>, BackendError> {
        self.fetch()?;
        self.inner.fetch_boards(user_id).await
    }

    async fn create_board(&self, args: CreateBoardArgs) -> Result<BackendBoard, BackendError> {
        self.mutation()?;
        self.inner.create_board(args).await
    }

    async fn update_board(&self, id: &str, args: UpdateBoardArgs) -> Result<BackendBoard, BackendError> {
        self.mutation()?;
        self.inner.update_board(id, args).await
    }

    async fn delete_board(&self, id: &str) -> Result<(), BackendError> {
        self.mutation()?;
        self.inner.delete_board(id).await
    }

    async fn fetch_columns(&self, board_id: &str) -> Result<Vec<BackendColumn>, BackendError> {
        self.fetch()?;
        self.inner.fetch_columns(board_id).await
    }

    async fn create_column(&self, args: CreateColumnArgs) -> Result<BackendColumn, BackendError> {
        self.mutation()?;
        self.inner.create_column(args).await
    }

    async fn update_column(&self, id: &str, args: UpdateColumnArgs) -> Result<BackendColumn, BackendError> {
        self.mutation()?;
        self.inner.update_column(id, args).await
    }

    async fn delete_column(&self, id: &str) -> Result<(), BackendError> {
        self.mutation()?;
        self.inner.delete_column(id).await
    }

    async fn fetch_tasks(&self, column_id: &str) -> Result<Vec<BackendTask>, BackendError> {
        self.fetch()?;
        self.inner.fetch_tasks(column_id).await
    }

    async fn create_task(&self, args: CreateTaskArgs) -> Result<BackendTask, BackendError> {
        self.mutation()?;
        self.inner.create_task(args).await
    }

    async fn update_task(&self, id: &str, args: UpdateTaskArgs) -> Result<BackendTask, BackendError> {
        self.mutation()?;
        self.inner.update_task(id, args).await
    }
}

/// Register a user on `backend` and return its session.
pub async fn signed_up<B: Backend + ?Sized>(backend: &B, email: &str) -> Session {
    backend
        .sign_up(email, "secret")
        .await
        .expect("sign up")
        .expect("local sign up returns a session")
}

/// Create a board directly through the backend and return its id.
pub async fn board_for<B: Backend + ?Sized>(backend: &B, session: &Session, name: &str) -> String {
    backend
        .create_board(CreateBoardArgs {
            name: name.to_string(),
            description: format!("{name} description"),
            user_id: session.owner_id().to_string(),
        })
        .await
        .expect("create board")
        .id
}
