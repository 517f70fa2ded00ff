//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Update and delete are single statements keyed by the public UUID; their
//! outcome is read from `RETURNING` and the affected-row count respectively,
//! so no read-then-write transaction is needed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, Todo, TodoId, TodoTitle};

use super::models::{NewTodoRow, TodoRow};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the [`TodoRepository`] port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TodoRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TodoRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TodoRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TodoRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TodoRepositoryError::query("todo identifier already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            TodoRepositoryError::query("todo row violates a table constraint")
        }
        DieselError::QueryBuilderError(_) => TodoRepositoryError::query("database query error"),
        other => TodoRepositoryError::query(other.to_string()),
    }
}

fn row_to_todo(row: TodoRow) -> Result<Todo, TodoRepositoryError> {
    let title = TodoTitle::new(row.title).map_err(|err| {
        warn!(uuid = %row.uuid, error = %err, "stored todo failed validation");
        TodoRepositoryError::query(format!("stored todo {} is invalid: {err}", row.uuid))
    })?;
    Ok(Todo::new(
        row.id,
        TodoId::from_uuid(row.uuid),
        title,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = todos::table
            .order(todos::id.asc())
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_todo).collect()
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TodoRow> = todos::table
            .filter(todos::uuid.eq(id.as_uuid()))
            .select(TodoRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_todo).transpose()
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTodoRow {
            uuid: *todo.id.as_uuid(),
            title: todo.title.as_ref(),
            created_at: todo.created_at,
            updated_at: todo.created_at,
        };

        let row: TodoRow = diesel::insert_into(todos::table)
            .values(&new_row)
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_todo(row)
    }

    async fn update_title(
        &self,
        id: &TodoId,
        title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // updated_at is advanced by the todos_advance_updated_at trigger.
        let row: Option<TodoRow> = diesel::update(todos::table.filter(todos::uuid.eq(id.as_uuid())))
            .set(todos::title.eq(title.as_ref()))
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_todo).transpose()
    }

    async fn delete(&self, id: &TodoId) -> Result<usize, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(todos::table.filter(todos::uuid.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, TodoRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, TodoRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn unique_violation_maps_to_query() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));
        assert_eq!(
            err,
            TodoRepositoryError::query("todo identifier already exists")
        );
    }

    #[rstest]
    fn row_with_blank_title_is_rejected() {
        let now = Utc::now();
        let row = TodoRow {
            id: 1,
            uuid: Uuid::new_v4(),
            title: "   ".to_owned(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(row_to_todo(row), Err(TodoRepositoryError::Query { .. })));
    }

    #[rstest]
    fn row_maps_to_domain_todo() {
        let now = Utc::now();
        let uuid = Uuid::new_v4();
        let row = TodoRow {
            id: 9,
            uuid,
            title: "ship it".to_owned(),
            created_at: now,
            updated_at: now,
        };

        let todo = row_to_todo(row).expect("valid row");
        assert_eq!(todo.internal_id(), 9);
        assert_eq!(todo.id(), TodoId::from_uuid(uuid));
        assert_eq!(todo.title().as_ref(), "ship it");
    }
}
