use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::dsl::sql;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_types::Timestamptz;

use crate::models::todo::{NewTodo, Todo};
use crate::repository::schema::todos::dsl::*;
use crate::repository::{RepositoryError, RepositoryResult, TodoRepository};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

const SCHEMA: &str = include_str!("../../migrations/2024-04-01-000000_create_todos/up.sql");

/// PostgreSQL-backed repository holding the process-wide connection pool.
#[derive(Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn connect(database_url: &str, pool_size: Option<u32>) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let mut builder = DBPool::builder();
        if let Some(size) = pool_size {
            builder = builder.max_size(size);
        }
        let pool = builder.build(manager)?;
        Ok(Database { pool })
    }

    /// Creates the `todos` table when it does not exist yet.
    pub fn run_migrations(&self) -> RepositoryResult<()> {
        self.connection()?.batch_execute(SCHEMA)?;
        Ok(())
    }

    fn connection(&self) -> RepositoryResult<DBConnection> {
        Ok(self.pool.get()?)
    }
}

impl TodoRepository for Database {
    fn list_todos(&self) -> RepositoryResult<Vec<Todo>> {
        let rows = todos
            .order((created_at.desc(), id.desc()))
            .select(Todo::as_select())
            .load(&mut self.connection()?)?;
        Ok(rows)
    }

    fn create_todo(&self, todo: NewTodo) -> RepositoryResult<Todo> {
        let created = diesel::insert_into(todos)
            .values(&todo)
            .returning(Todo::as_returning())
            .get_result(&mut self.connection()?)?;
        Ok(created)
    }

    fn set_completed(&self, todo_id: i32, value: bool) -> RepositoryResult<Todo> {
        diesel::update(todos.find(todo_id))
            // database clock, never earlier than the row's creation time
            .set((
                completed.eq(value),
                updated_at.eq(sql::<Timestamptz>("GREATEST(now(), created_at)")),
            ))
            .returning(Todo::as_returning())
            .get_result(&mut self.connection()?)
            .optional()?
            .ok_or(RepositoryError::NotFound(todo_id))
    }

    fn delete_todo(&self, todo_id: i32) -> RepositoryResult<()> {
        let count = diesel::delete(todos.find(todo_id)).execute(&mut self.connection()?)?;
        if count == 0 {
            return Err(RepositoryError::NotFound(todo_id));
        }
        Ok(())
    }
}
