//! Port abstraction for todo persistence adapters and their errors.
//!
//! Adapters report failures without interpreting them. Deciding whether an
//! absent row is "not found" or an internal fault is left to the service.

use async_trait::async_trait;

use crate::domain::{NewTodo, Todo, TodoId, TodoTitle};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by todo repository adapters.
    pub enum TodoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Return every stored todo in store order.
    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError>;

    /// Fetch a todo by its public identifier.
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Insert a todo and return it with the store-assigned internal id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoRepositoryError>;

    /// Replace the title of an existing todo in a single statement.
    ///
    /// Returns `None` when no row matched `id`. A successful update advances
    /// `updated_at` strictly past its previous value.
    async fn update_title(
        &self,
        id: &TodoId,
        title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Hard-delete a todo, returning the number of rows removed.
    async fn delete(&self, id: &TodoId) -> Result<usize, TodoRepositoryError>;
}
