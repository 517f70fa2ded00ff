//! Todo data model.
//!
//! A todo has two identities: the store-assigned sequential `internal_id`
//! and the public UUID [`TodoId`] handed out to clients. Only the latter is
//! ever serialised to the wire.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors returned by [`TodoId`] and [`TodoTitle`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoValidationError {
    /// The identifier was not a canonical UUID.
    #[error("todo id must be a valid UUID")]
    InvalidId,
    /// The title was empty or whitespace only.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Public todo identifier stored as a UUID.
///
/// # Examples
/// ```
/// use todos::domain::TodoId;
///
/// let id = TodoId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(TodoId::new("123").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Validate and construct a [`TodoId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, TodoValidationError> {
        let raw = id.as_ref();
        let uuid = Uuid::parse_str(raw).map_err(|_| TodoValidationError::InvalidId)?;
        // Only the 36-character hyphenated form is accepted; simple, braced
        // and URN spellings parse too but are not canonical.
        let mut canonical = Uuid::encode_buffer();
        if !uuid
            .hyphenated()
            .encode_lower(&mut canonical)
            .eq_ignore_ascii_case(raw)
        {
            return Err(TodoValidationError::InvalidId);
        }
        Ok(Self(uuid))
    }

    /// Generate a new random [`TodoId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical lowercase hyphenated form.
        write!(f, "{}", self.0.hyphenated())
    }
}

impl TryFrom<String> for TodoId {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Todo title; never empty once trimmed, otherwise stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Validate and construct a [`TodoTitle`].
    ///
    /// # Examples
    /// ```
    /// use todos::domain::{TodoTitle, TodoValidationError};
    ///
    /// assert_eq!(TodoTitle::new("Buy milk").expect("title").as_ref(), "Buy milk");
    /// assert_eq!(TodoTitle::new("  "), Err(TodoValidationError::EmptyTitle));
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TodoTitle> for String {
    fn from(value: TodoTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for TodoTitle {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted todo.
///
/// ## Invariants
/// - `id` is assigned once at creation and never changes.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    internal_id: i64,
    id: TodoId,
    title: TodoTitle,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Assemble a todo from stored parts.
    pub fn new(
        internal_id: i64,
        id: TodoId,
        title: TodoTitle,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            internal_id,
            id,
            title,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned sequential identifier.
    pub fn internal_id(&self) -> i64 {
        self.internal_id
    }

    /// Public identifier.
    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Values required to insert a todo; the store assigns `internal_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// Promote to a [`Todo`] once the store has assigned an internal id.
    ///
    /// `updated_at` starts equal to `created_at`.
    pub fn into_todo(self, internal_id: i64) -> Todo {
        Todo::new(
            internal_id,
            self.id,
            self.title,
            self.created_at,
            self.created_at,
        )
    }
}
