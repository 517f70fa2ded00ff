//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Todo items.
    ///
    /// `id` is the sequential surrogate key; `uuid` is the public handle.
    todos (id) {
        /// Store-assigned sequential key.
        id -> Int8,
        /// Public identifier (UUID v4), unique.
        uuid -> Uuid,
        /// Non-empty title.
        title -> Text,
        /// Creation timestamp, immutable.
        created_at -> Timestamptz,
        /// Last modification timestamp, advanced by trigger on every update.
        updated_at -> Timestamptz,
    }
}
