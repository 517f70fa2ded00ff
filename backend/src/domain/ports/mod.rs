//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`TodoRepository`, `TodoIdGenerator`) describe what the
//! domain needs from adapters. Driving ports (`TodoQuery`, `TodoCommand`)
//! describe what inbound adapters may ask of the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod todo_command;
mod todo_id_generator;
mod todo_query;
mod todo_repository;

#[cfg(test)]
pub use todo_command::MockTodoCommand;
pub use todo_command::{FixtureTodoCommand, TodoCommand};
#[cfg(test)]
pub use todo_id_generator::MockTodoIdGenerator;
pub use todo_id_generator::{RandomTodoIdGenerator, TodoIdGenerator};
#[cfg(test)]
pub use todo_query::MockTodoQuery;
pub use todo_query::{FixtureTodoQuery, TodoQuery};
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoRepository, TodoRepositoryError};
