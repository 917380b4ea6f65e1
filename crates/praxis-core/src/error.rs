use serde::Serialize;
use thiserror::Error;

/// A request payload that does not satisfy its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, in its wire (camelCase) spelling.
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// An error about the payload as a whole rather than one field.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn from_serde(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let message = err.inner().to_string();
        let path = err.path().to_string();
        let field = if path.is_empty() || path == "." {
            backticked(&message)
        } else {
            Some(path)
        };
        Self { field, message }
    }
}

/// serde names the field in backticks for unknown/missing/duplicate field errors.
fn backticked(message: &str) -> Option<String> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(message[start..start + len].to_string())
}

/// Outcome of an ownership check that did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("resource not found")]
    NotFound,

    #[error("resource belongs to another account")]
    Forbidden,
}
