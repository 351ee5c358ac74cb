//! Supabase backend implementation.
//!
//! Rows go through PostgREST (`/rest/v1/<table>`), authentication through GoTrue
//! (`/auth/v1/...`). Requests are sent once: no timeout and no retry.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{
    Backend, BackendBoard, BackendColumn, BackendError, BackendTask, CreateBoardArgs, CreateColumnArgs,
    CreateTaskArgs, UpdateBoardArgs, UpdateColumnArgs, UpdateTaskArgs,
};
use crate::session::Session;

const BOARDS_TABLE: &str = "boards";
const COLUMNS_TABLE: &str = "columns";
const TASKS_TABLE: &str = "tasks";

const BOARD_SELECT: &str = "id,name,description,user_id";
const TASK_SELECT: &str = "id,title,description,due_date,column_id,position";
const COLUMN_SELECT: &str = "id,name,board_id,position,tasks(id,title,description,due_date,column_id,position)";

/// Supabase backend talking to a hosted project over HTTPS.
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl SupabaseBackend {
    /// Create a backend for the project at `url`, authenticating requests with `anon_key`.
    pub fn new(url: &str, anon_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            anon_key,
            access_token: RwLock::new(None),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    // Row calls run as the attached user so row-level security applies.
    async fn row_request(&self, method: Method, table: &str) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone());

        self.client
            .request(method, self.rest_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        filter: (&str, &str),
        order: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let mut query = vec![("select".to_string(), select.to_string())];
        query.push((filter.0.to_string(), format!("eq.{}", filter.1)));
        query.extend(order.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let request = self.row_request(Method::GET, table).await.query(&query);
        Self::read_json(request).await
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self
            .row_request(Method::POST, table)
            .await
            .query(&[("select", select)])
            .header("Prefer", "return=representation")
            .json(&[body]);

        let rows: Vec<T> = Self::read_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::InvalidData(format!("Insert into {table} returned no row")))
    }

    async fn update<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        id: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let id_filter = format!("eq.{id}");
        let request = self
            .row_request(Method::PATCH, table)
            .await
            .query(&[("id", id_filter.as_str()), ("select", select)])
            .header("Prefer", "return=representation")
            .json(body);

        let rows: Vec<T> = Self::read_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("{table} row {id}")))
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let id_filter = format!("eq.{id}");
        let request = self
            .row_request(Method::DELETE, table)
            .await
            .query(&[("id", id_filter.as_str())]);

        Self::check(Self::send(request).await?).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
        request.send().await.map_err(|e| BackendError::Network(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
        let response = Self::check(Self::send(request).await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!("Supabase request failed with {status}: {body}");
        Err(error_from_status(status, &body))
    }
}

/// Map a failed HTTP response onto a backend error, preferring the service's own message.
pub(crate) fn error_from_status(status: StatusCode, body: &str) -> BackendError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
        StatusCode::NOT_FOUND => BackendError::NotFound(message),
        s if s.is_client_error() => BackendError::InvalidData(message),
        _ => BackendError::Other(message),
    }
}

#[async_trait]
impl Backend for SupabaseBackend {
    fn backend_type(&self) -> &str {
        "supabase"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let request = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }));

        let session: Session = Self::read_json(request).await?;
        *self.access_token.write().await = Some(session.access_token.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, BackendError> {
        let request = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }));

        let value: Value = Self::read_json(request).await?;
        if value.get("access_token").is_none() {
            // Confirmation e-mail pending
            return Ok(None);
        }
        let session: Session =
            serde_json::from_value(value).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        *self.access_token.write().await = Some(session.access_token.clone());
        Ok(Some(session))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token);

        Self::check(Self::send(request).await?).await?;
        *self.access_token.write().await = None;
        Ok(())
    }

    async fn attach_session(&self, session: &Session) {
        *self.access_token.write().await = Some(session.access_token.clone());
    }

    async fn fetch_boards(&self, user_id: &str) -> Result<Vec<BackendBoard>, BackendError> {
        self.select(BOARDS_TABLE, BOARD_SELECT, ("user_id", user_id), &[]).await
    }

    async fn create_board(&self, args: CreateBoardArgs) -> Result<BackendBoard, BackendError> {
        self.insert(BOARDS_TABLE, BOARD_SELECT, &args).await
    }

    async fn update_board(&self, id: &str, args: UpdateBoardArgs) -> Result<BackendBoard, BackendError> {
        self.update(BOARDS_TABLE, BOARD_SELECT, id, &args).await
    }

    async fn delete_board(&self, id: &str) -> Result<(), BackendError> {
        self.delete(BOARDS_TABLE, id).await
    }

    async fn fetch_columns(&self, board_id: &str) -> Result<Vec<BackendColumn>, BackendError> {
        self.select(
            COLUMNS_TABLE,
            COLUMN_SELECT,
            ("board_id", board_id),
            &[("order", "position.asc"), ("tasks.order", "position.asc")],
        )
        .await
    }

    async fn create_column(&self, args: CreateColumnArgs) -> Result<BackendColumn, BackendError> {
        self.insert(COLUMNS_TABLE, COLUMN_SELECT, &args).await
    }

    async fn update_column(&self, id: &str, args: UpdateColumnArgs) -> Result<BackendColumn, BackendError> {
        self.update(COLUMNS_TABLE, COLUMN_SELECT, id, &args).await
    }

    async fn delete_column(&self, id: &str) -> Result<(), BackendError> {
        self.delete(COLUMNS_TABLE, id).await
    }

    async fn fetch_tasks(&self, column_id: &str) -> Result<Vec<BackendTask>, BackendError> {
        self.select(TASKS_TABLE, TASK_SELECT, ("column_id", column_id), &[("order", "position.asc")])
            .await
    }

    async fn create_task(&self, args: CreateTaskArgs) -> Result<BackendTask, BackendError> {
        self.insert(TASKS_TABLE, TASK_SELECT, &args).await
    }

    async fn update_task(&self, id: &str, args: UpdateTaskArgs) -> Result<BackendTask, BackendError> {
        self.update(TASKS_TABLE, TASK_SELECT, id, &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_postgrest_body() {
        let body = r#"{"code":"23502","message":"null value in column \"name\"","details":null}"#;
        let err = error_from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err, BackendError::InvalidData("null value in column \"name\"".to_string()));
    }

    #[test]
    fn test_error_from_gotrue_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        let err = error_from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(err, BackendError::InvalidData("Invalid login credentials".to_string()));
    }

    #[test]
    fn test_error_status_mapping() {
        assert!(matches!(error_from_status(StatusCode::UNAUTHORIZED, ""), BackendError::Auth(_)));
        assert!(matches!(error_from_status(StatusCode::NOT_FOUND, "gone"), BackendError::NotFound(_)));
        assert!(matches!(
            error_from_status(StatusCode::BAD_GATEWAY, "upstream"),
            BackendError::Other(ref m) if m == "upstream"
        ));
    }
}
