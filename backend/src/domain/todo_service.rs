//! Todo domain service.
//!
//! Implements the todo driving ports on top of a [`TodoRepository`]. This is
//! the only layer that classifies store outcomes: an absent row becomes
//! `NotFound`, any adapter failure becomes `InternalError`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    TodoCommand, TodoIdGenerator, TodoQuery, TodoRepository, TodoRepositoryError,
};
use crate::domain::{Error, NewTodo, Todo, TodoId, TodoTitle, todo_not_found};

/// Todo service implementing [`TodoQuery`] and [`TodoCommand`].
#[derive(Clone)]
pub struct TodoService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn TodoIdGenerator>,
}

impl<R> TodoService<R> {
    /// Create a new service with the given repository and collaborators.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, ids: Arc<dyn TodoIdGenerator>) -> Self {
        Self { repo, clock, ids }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    fn map_repository_error(operation: &'static str, err: TodoRepositoryError) -> Error {
        debug!(operation, error = %err, "todo repository failure");
        Error::internal(format!("failed to {operation}: {err}"))
    }
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_todos(&self) -> Result<Vec<Todo>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(|err| Self::map_repository_error("list todos", err))
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Todo, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_repository_error("get todo", err))?
            .ok_or_else(|| todo_not_found(id))
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn create_todo(&self, title: TodoTitle) -> Result<Todo, Error> {
        let new_todo = NewTodo {
            id: self.ids.next_id(),
            title,
            created_at: self.clock.utc(),
        };
        self.repo
            .insert(new_todo)
            .await
            .map_err(|err| Self::map_repository_error("create todo", err))
    }

    async fn update_todo(&self, id: &TodoId, title: TodoTitle) -> Result<Todo, Error> {
        self.repo
            .update_title(id, &title)
            .await
            .map_err(|err| Self::map_repository_error("update todo", err))?
            .ok_or_else(|| todo_not_found(id))
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<(), Error> {
        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(|err| Self::map_repository_error("delete todo", err))?;
        if affected == 0 {
            return Err(todo_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
