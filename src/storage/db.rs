use anyhow::{Context, Result};
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use uuid::Uuid;

use crate::entities::{board, column, task, user};

/// In-memory database location used when no file path is configured.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Local storage manager for board data
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open the database at `location` (a file path or [`MEMORY_DATABASE`]) and create the schema.
    pub async fn open(location: &str) -> Result<Self> {
        let database_url = if location == MEMORY_DATABASE {
            // Named shared-cache database so every pooled connection sees the same data
            format!("sqlite:file:taskboard-{}?mode=memory&cache=shared", Uuid::new_v4())
        } else {
            if let Some(parent) = std::path::Path::new(location).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
                }
            }
            format!("sqlite://{location}?mode=rwc")
        };

        let mut options = ConnectOptions::new(database_url);
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open local database: {location}"))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        info!("Local storage ready at {location}");

        Ok(storage)
    }

    /// Open a fresh in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::open(MEMORY_DATABASE).await
    }

    /// Initialize database schema from the entity definitions
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve
        self.create_table(&schema, user::Entity).await?;
        self.create_table(&schema, board::Entity).await?;
        self.create_table(&schema, column::Entity).await?;
        self.create_table(&schema, task::Entity).await?;

        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, schema: &Schema, entity: E) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();
        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", entity.table_name()))?;
        Ok(())
    }
}
