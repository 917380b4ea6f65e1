//! Parsing and validation of create/update payloads.
//!
//! Creation deserializes a draft with `deny_unknown_fields`. A partial update
//! is merged key by key onto the stored draft, then the merged value goes
//! through the same path, so both share one schema.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ValidationError;

/// A client-writable payload.
pub trait Draft: DeserializeOwned + Send + Sync + 'static {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Client this draft links to, if any. The caller checks it is owned by
    /// the same provider.
    fn client_ref(&self) -> Option<Uuid> {
        None
    }
}

/// Deserialize and validate a full draft.
pub fn parse<D: Draft>(body: Value) -> Result<D, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError::body("request body must be a JSON object"));
    }
    let draft: D = serde_path_to_error::deserialize(body).map_err(ValidationError::from_serde)?;
    draft.validate()?;
    Ok(draft)
}

/// Apply a partial update onto `current` and re-validate the result.
pub fn merge<D: Draft + Serialize>(current: &D, patch: Value) -> Result<D, ValidationError> {
    let Value::Object(patch) = patch else {
        return Err(ValidationError::body("request body must be a JSON object"));
    };

    let mut merged = serde_json::to_value(current)
        .map_err(|e| ValidationError::body(format!("stored record is unreadable: {e}")))?;
    let Some(target) = merged.as_object_mut() else {
        return Err(ValidationError::body("stored record is not an object"));
    };
    for (key, value) in patch {
        target.insert(key, value);
    }

    parse(merged)
}

/// Reject empty or whitespace-only text.
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} must not be blank")));
    }
    Ok(())
}

/// Reject blank entries in a list of free-text items.
pub fn require_entries(field: &str, values: &[String]) -> Result<(), ValidationError> {
    for (i, value) in values.iter().enumerate() {
        require_text(&format!("{field}[{i}]"), value)?;
    }
    Ok(())
}

pub fn require_email(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ValidationError::new(field, format!("{field} is not an email address")));
    }
    Ok(())
}
