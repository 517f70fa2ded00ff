//! Test utilities for the todos crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, Todo, TodoId, TodoTitle};

/// Clock frozen at a single instant until advanced.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Default)]
struct Store {
    last_internal_id: i64,
    rows: Vec<Todo>,
}

/// Process-local [`TodoRepository`] with PostgreSQL-like semantics.
///
/// Internal ids are assigned sequentially from 1. Updates never rewrite
/// `created_at` and move `updated_at` at least one microsecond past its
/// previous value, even when the clock has not advanced.
pub struct InMemoryTodoRepository {
    clock: Arc<dyn Clock>,
    store: Mutex<Store>,
}

impl InMemoryTodoRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            store: Mutex::new(Store::default()),
        }
    }

    /// Number of stored todos.
    ///
    /// # Panics
    /// Panics if a previous holder of the store lock panicked.
    pub fn len(&self) -> usize {
        match self.store.lock() {
            Ok(store) => store.rows.len(),
            Err(_) => panic!("in-memory store lock poisoned"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, TodoRepositoryError> {
        self.store
            .lock()
            .map_err(|_| TodoRepositoryError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        Ok(self.lock()?.rows.clone())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let store = self.lock()?;
        Ok(store.rows.iter().find(|todo| todo.id() == *id).cloned())
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut store = self.lock()?;
        if store.rows.iter().any(|row| row.id() == todo.id) {
            return Err(TodoRepositoryError::query(format!(
                "duplicate todo id {}",
                todo.id
            )));
        }
        store.last_internal_id += 1;
        let stored = todo.into_todo(store.last_internal_id);
        store.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_title(
        &self,
        id: &TodoId,
        title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let now = self.clock.utc();
        let mut store = self.lock()?;
        let Some(row) = store.rows.iter_mut().find(|todo| todo.id() == *id) else {
            return Ok(None);
        };
        let updated_at = now.max(row.updated_at() + TimeDelta::microseconds(1));
        *row = Todo::new(
            row.internal_id(),
            row.id(),
            title.clone(),
            row.created_at(),
            updated_at,
        );
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &TodoId) -> Result<usize, TodoRepositoryError> {
        let mut store = self.lock()?;
        let before = store.rows.len();
        store.rows.retain(|todo| todo.id() != *id);
        Ok(before - store.rows.len())
    }
}

/// Repository whose every call fails with a connection error.
#[derive(Debug, Clone)]
pub struct UnavailableTodoRepository {
    message: String,
}

impl UnavailableTodoRepository {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, TodoRepositoryError> {
        Err(TodoRepositoryError::connection(self.message.clone()))
    }
}

#[async_trait]
impl TodoRepository for UnavailableTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        self.fail()
    }

    async fn find_by_id(&self, _id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        self.fail()
    }

    async fn insert(&self, _todo: NewTodo) -> Result<Todo, TodoRepositoryError> {
        self.fail()
    }

    async fn update_title(
        &self,
        _id: &TodoId,
        _title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        self.fail()
    }

    async fn delete(&self, _id: &TodoId) -> Result<usize, TodoRepositoryError> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn new_todo(clock: &MutableClock, title: &str) -> NewTodo {
        NewTodo {
            id: TodoId::random(),
            title: TodoTitle::new(title).expect("valid title"),
            created_at: clock.utc(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn internal_ids_are_sequential(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock.clone());

        let first = repo.insert(new_todo(&clock, "a")).await.expect("insert");
        let second = repo.insert(new_todo(&clock, "b")).await.expect("insert");

        assert_eq!(first.internal_id(), 1);
        assert_eq!(second.internal_id(), 2);
        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_public_ids_are_rejected(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock.clone());
        let todo = new_todo(&clock, "a");

        repo.insert(todo.clone()).await.expect("first insert");
        let err = repo.insert(todo).await.expect_err("duplicate");

        assert!(matches!(err, TodoRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn update_advances_updated_at_without_clock_movement(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock.clone());
        let created = repo.insert(new_todo(&clock, "a")).await.expect("insert");
        let title = TodoTitle::new("b").expect("valid title");

        let first = repo
            .update_title(&created.id(), &title)
            .await
            .expect("update")
            .expect("row exists");
        let second = repo
            .update_title(&created.id(), &title)
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(first.created_at(), created.created_at());
        assert!(first.updated_at() > created.updated_at());
        assert!(second.updated_at() > first.updated_at());
    }

    #[rstest]
    #[tokio::test]
    async fn update_uses_the_clock_when_it_has_advanced(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock.clone());
        let created = repo.insert(new_todo(&clock, "a")).await.expect("insert");
        clock.advance_seconds(60);

        let updated = repo
            .update_title(&created.id(), &TodoTitle::new("b").expect("valid title"))
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.updated_at(), clock.utc());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_rows_removed(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock.clone());
        let created = repo.insert(new_todo(&clock, "a")).await.expect("insert");

        assert_eq!(repo.delete(&created.id()).await.expect("delete"), 1);
        assert_eq!(repo.delete(&created.id()).await.expect("delete"), 0);
        assert!(repo.is_empty());
    }

    #[rstest]
    #[should_panic(expected = "in-memory store lock poisoned")]
    fn len_panics_on_a_poisoned_store(clock: Arc<MutableClock>) {
        let repo = InMemoryTodoRepository::new(clock);
        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = repo.store.lock();
            panic!("writer died holding the lock");
        }));
        assert!(poisoned.is_err());

        let _ = repo.len();
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_repository_reports_connection_errors() {
        let repo = UnavailableTodoRepository::new("down");

        let err = repo.list_all().await.expect_err("always fails");

        assert_eq!(err, TodoRepositoryError::connection("down"));
    }
}
