//! Domain primitives, ports and services.
//!
//! Purpose: define the todo entity, its value types and the service that
//! classifies store outcomes into the domain error taxonomy. Nothing in this
//! module depends on HTTP or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Todo, TodoId, TodoTitle, NewTodo: the todo entity and its values.
//! - TodoService: implementation of the todo driving ports.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod todo;
pub mod todo_service;
pub mod trace_id;

use serde_json::json;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::todo::{NewTodo, Todo, TodoId, TodoTitle, TodoValidationError};
pub use self::todo_service::TodoService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Build the `NotFound` error reported for a missing todo.
///
/// # Examples
/// ```
/// use todos::domain::{ErrorCode, TodoId, todo_not_found};
///
/// let err = todo_not_found(&TodoId::random());
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
pub fn todo_not_found(id: &TodoId) -> Error {
    Error::not_found("todo not found").with_details(json!({ "id": id.to_string() }))
}
