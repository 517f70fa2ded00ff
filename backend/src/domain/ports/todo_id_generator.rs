//! Identifier source for newly created todos.

use crate::domain::TodoId;

/// Produces fresh public identifiers for new todos.
#[cfg_attr(test, mockall::automock)]
pub trait TodoIdGenerator: Send + Sync {
    fn next_id(&self) -> TodoId;
}

/// Random UUID v4 generator used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTodoIdGenerator;

impl TodoIdGenerator for RandomTodoIdGenerator {
    fn next_id(&self) -> TodoId {
        TodoId::random()
    }
}
