//! Driving port for todo mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Todo, TodoId, TodoTitle};

/// Domain use-case port for creating, updating and deleting todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Create a todo with a fresh identifier and timestamps.
    async fn create_todo(&self, title: TodoTitle) -> Result<Todo, Error>;

    /// Replace a todo's title; `NotFound` when no row matched.
    async fn update_todo(&self, id: &TodoId, title: TodoTitle) -> Result<Todo, Error>;

    /// Hard-delete a todo; `NotFound` when no row matched.
    async fn delete_todo(&self, id: &TodoId) -> Result<(), Error>;
}

/// Fixture command that accepts creates and misses every existing id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTodoCommand;

const FIXTURE_CREATED_AT: &str = "2025-06-01T00:00:00Z";

#[async_trait]
impl TodoCommand for FixtureTodoCommand {
    async fn create_todo(&self, title: TodoTitle) -> Result<Todo, Error> {
        let created_at = DateTime::parse_from_rfc3339(FIXTURE_CREATED_AT)
            .map(|value| value.with_timezone(&Utc))
            .map_err(|err| Error::internal(format!("invalid fixture timestamp: {err}")))?;
        Ok(Todo::new(1, TodoId::random(), title, created_at, created_at))
    }

    async fn update_todo(&self, id: &TodoId, _title: TodoTitle) -> Result<Todo, Error> {
        Err(crate::domain::todo_not_found(id))
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<(), Error> {
        Err(crate::domain::todo_not_found(id))
    }
}
