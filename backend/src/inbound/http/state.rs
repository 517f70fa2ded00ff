//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TodoCommand, TodoQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub todos: Arc<dyn TodoCommand>,
    pub todos_query: Arc<dyn TodoQuery>,
}

impl HttpState {
    /// Construct state from the todo driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use todos::domain::ports::{FixtureTodoCommand, FixtureTodoQuery};
    /// use todos::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureTodoCommand), Arc::new(FixtureTodoQuery));
    /// let _query = state.todos_query.clone();
    /// ```
    pub fn new(todos: Arc<dyn TodoCommand>, todos_query: Arc<dyn TodoQuery>) -> Self {
        Self { todos, todos_query }
    }

    /// Build state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: TodoCommand + TodoQuery + 'static,
    {
        Self {
            todos: service.clone(),
            todos_query: service,
        }
    }
}
