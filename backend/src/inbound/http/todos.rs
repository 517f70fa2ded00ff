//! Todo HTTP handlers.
//!
//! ```text
//! GET    /todos
//! GET    /todos/{id}
//! POST   /todos
//! PUT    /todos/{id}
//! DELETE /todos/{id}
//! ```
//!
//! Path identifiers are validated before any port is called.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Todo;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_title, parse_todo_id};

/// Request payload for creating or renaming a todo.
///
/// `title` is optional at the serde layer so a missing field is reported as
/// a validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TodoRequestBody {
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
}

/// Wire representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct TodoResponse {
    #[schema(format = "uuid", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id().to_string(),
            title: todo.title().to_string(),
            created_at: todo.created_at().to_rfc3339(),
            updated_at: todo.updated_at().to_rfc3339(),
        }
    }
}

/// List every todo.
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos", body = [TodoResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TodoResponse>>> {
    let todos = state.todos_query.list_todos().await?;
    Ok(web::Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Fetch one todo by its public identifier.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = uuid::Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
#[get("/todos/{id}")]
pub async fn get_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path)?;
    let todo = state.todos_query.get_todo(&id).await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Create a todo.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use todos::inbound::http::ApiResult;
/// use todos::inbound::http::state::HttpState;
/// use todos::inbound::http::todos::{TodoRequestBody, create_todo};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<actix_web::HttpResponse> {
///     let payload = web::Json(TodoRequestBody {
///         title: Some("Buy milk".to_owned()),
///     });
///     create_todo(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/todos",
    request_body = TodoRequestBody,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todos")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: web::Json<TodoRequestBody>,
) -> ApiResult<HttpResponse> {
    let title = parse_title(payload.into_inner().title)?;
    let todo = state.todos.create_todo(title).await?;
    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

/// Replace a todo's title.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(("id" = uuid::Uuid, Path, description = "Todo identifier")),
    request_body = TodoRequestBody,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[put("/todos/{id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TodoRequestBody>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path)?;
    let title = parse_title(payload.into_inner().title)?;
    let todo = state.todos.update_todo(&id, title).await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = uuid::Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todos/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path)?;
    state.todos.delete_todo(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
