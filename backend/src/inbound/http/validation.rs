//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure here becomes an `invalid_request` error whose details carry
//! the offending field and a machine-readable reason code.

use serde_json::json;

use crate::domain::{Error, TodoId, TodoTitle};

/// Validation reason codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    EmptyField,
    InvalidUuid,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ID_FIELD: FieldName = FieldName::new("id");
pub(crate) const TITLE_FIELD: FieldName = FieldName::new("title");

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must not be empty")).with_details(json!({
        "field": field,
        "code": ValidationCode::EmptyField.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidUuid.as_str(),
    }))
}

/// Parse a path-supplied todo identifier.
pub(crate) fn parse_todo_id(value: &str) -> Result<TodoId, Error> {
    TodoId::new(value).map_err(|_| invalid_uuid_error(ID_FIELD, value))
}

/// Validate a body-supplied title, treating absence and blankness distinctly.
pub(crate) fn parse_title(value: Option<String>) -> Result<TodoTitle, Error> {
    let raw = value.ok_or_else(|| missing_field_error(TITLE_FIELD))?;
    TodoTitle::new(raw).map_err(|_| empty_field_error(TITLE_FIELD))
}
