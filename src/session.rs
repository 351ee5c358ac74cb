//! Signed-in session carried between sign-in and the board screens.
//!
//! The hosted service hands back a session object on sign-in. The client keeps it
//! as an opaque serialized token and only ever reads the owner id out of it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The user the session belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated session as issued by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Parse a serialized session token.
    pub fn from_token(token: &str) -> Result<Self> {
        let session: Session = serde_json::from_str(token).context("Failed to parse session token")?;
        if session.user.id.trim().is_empty() {
            anyhow::bail!("Session token has no user id");
        }
        Ok(session)
    }

    /// Serialize the session back into a token.
    pub fn to_token(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize session")
    }

    /// Id of the signed-in user; boards are scoped to it.
    pub fn owner_id(&self) -> &str {
        &self.user.id
    }

    /// Load a session previously written with [`Session::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let token = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        Self::from_token(&token).map(Some)
    }

    /// Persist the session token, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_token()?)
            .with_context(|| format!("Failed to write session file: {}", path.display()))
    }
}
