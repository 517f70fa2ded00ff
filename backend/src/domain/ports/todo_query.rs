//! Driving port for todo reads.
//!
//! Inbound adapters use this port to read todos without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Todo, TodoId};

/// Domain use-case port for listing and fetching todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// Return all todos; an empty store yields an empty vector.
    async fn list_todos(&self) -> Result<Vec<Todo>, Error>;

    /// Fetch exactly one todo, or `NotFound`.
    async fn get_todo(&self, id: &TodoId) -> Result<Todo, Error>;
}

/// Fixture query backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTodoQuery;

#[async_trait]
impl TodoQuery for FixtureTodoQuery {
    async fn list_todos(&self) -> Result<Vec<Todo>, Error> {
        Ok(Vec::new())
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Todo, Error> {
        Err(crate::domain::todo_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_reports_missing_todos() {
        let query = FixtureTodoQuery;

        assert!(query.list_todos().await.expect("list").is_empty());
        let err = query
            .get_todo(&TodoId::random())
            .await
            .expect_err("empty store");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
