//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by PostgreSQL
//! through `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Diesel row structs (`models.rs`) and table definitions (`schema.rs`)
//!   stay private to this module.
//! - Database errors are mapped to the port's typed errors.
//!
//! # Example
//!
//! ```no_run
//! use todos::outbound::persistence::{DbPool, DieselTodoRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todos")).await?;
//! let _repo = DieselTodoRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_todo_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_todo_repository::DieselTodoRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
