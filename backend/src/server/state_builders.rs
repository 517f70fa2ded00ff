//! Builders for the HTTP state handed to every handler.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use todos::domain::TodoService;
use todos::domain::ports::{FixtureTodoCommand, FixtureTodoQuery, RandomTodoIdGenerator};
use todos::inbound::http::state::HttpState;
use todos::outbound::persistence::{DbPool, DieselTodoRepository};

use super::ServerConfig;

/// Wire the todo service over Diesel when a pool is configured, otherwise
/// fall back to fixture ports.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_service(Arc::new(build_todo_service(pool))),
        None => HttpState::new(Arc::new(FixtureTodoCommand), Arc::new(FixtureTodoQuery)),
    };
    web::Data::new(state)
}

fn build_todo_service(pool: &DbPool) -> TodoService<DieselTodoRepository> {
    TodoService::new(
        Arc::new(DieselTodoRepository::new(pool.clone())),
        Arc::new(DefaultClock),
        Arc::new(RandomTodoIdGenerator),
    )
}
