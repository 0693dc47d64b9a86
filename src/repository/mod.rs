use std::sync::Arc;

use thiserror::Error;

use crate::config::{Config, StoreConfig};
use crate::models::todo::{NewTodo, Todo};

pub mod database;
pub mod memory;
pub mod schema;

pub use database::Database;
pub use memory::MemoryRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("todo {0} not found")]
    NotFound(i32),
    #[error("failed to get a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("todo store lock poisoned")]
    Poisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage for todos. Implementations are shared by every worker and must be
/// safe to call concurrently. Calls may block.
pub trait TodoRepository: Send + Sync + 'static {
    /// All todos, newest first.
    fn list_todos(&self) -> RepositoryResult<Vec<Todo>>;

    fn create_todo(&self, todo: NewTodo) -> RepositoryResult<Todo>;

    /// Fails with [`RepositoryError::NotFound`] when no row has `todo_id`.
    fn set_completed(&self, todo_id: i32, value: bool) -> RepositoryResult<Todo>;

    /// Fails with [`RepositoryError::NotFound`] when no row has `todo_id`.
    fn delete_todo(&self, todo_id: i32) -> RepositoryResult<()>;
}

/// Builds the one repository instance the process serves from.
pub fn connect(config: &Config) -> RepositoryResult<Arc<dyn TodoRepository>> {
    match &config.store {
        StoreConfig::Postgres {
            database_url,
            pool_size,
        } => {
            let database = Database::connect(database_url, *pool_size)?;
            database.run_migrations()?;
            tracing::info!(pool_size = ?pool_size, "connected to postgres");
            Ok(Arc::new(database))
        }
        StoreConfig::Memory => {
            tracing::warn!("using in-memory todo store, data is lost on exit");
            Ok(Arc::new(MemoryRepository::default()))
        }
    }
}
