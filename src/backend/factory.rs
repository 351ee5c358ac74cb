//! Backend factory for creating backend instances from configuration.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::sync::Arc;

use super::{local::LocalBackend, supabase::SupabaseBackend, Backend};
use crate::config::BackendConfig;
use crate::storage::LocalStorage;

/// Create the backend described by `config`.
///
/// # Errors
/// Returns error if:
/// - Backend type is unknown
/// - The anon key environment variable is not set (Supabase)
/// - The local database cannot be opened (local)
pub async fn create_backend(config: &BackendConfig) -> Result<Arc<dyn Backend>> {
    match config.backend_type.as_str() {
        "supabase" => {
            let anon_key = std::env::var(&config.anon_key_env)
                .with_context(|| format!("{} environment variable not set", config.anon_key_env))?;
            info!("Using Supabase backend at {}", config.url);
            Ok(Arc::new(SupabaseBackend::new(&config.url, anon_key)))
        }
        "local" => {
            let storage = LocalStorage::open(&config.local_database).await?;
            info!("Using local backend at {}", config.local_database);
            Ok(Arc::new(LocalBackend::new(storage)))
        }
        other => Err(anyhow!("Unknown backend type: {}", other)),
    }
}
