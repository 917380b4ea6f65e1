//! Storage key conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Praxis bucket.

use uuid::Uuid;

pub fn record(collection: &str, id: Uuid) -> String {
    format!("{collection}/{id}.json")
}

pub fn collection_prefix(collection: &str) -> String {
    format!("{collection}/")
}

pub fn document_file(id: Uuid) -> String {
    format!("files/{id}")
}

/// Ownership index entry for one record. Listing a tenant's collection scans
/// only this prefix.
pub fn owner_index(owner: &str, collection: &str, id: Uuid) -> String {
    format!("{}{id}", owner_index_prefix(owner, collection))
}

pub fn owner_index_prefix(owner: &str, collection: &str) -> String {
    format!("owners/{owner}/{collection}/")
}

/// Email lookup entry for a portal login. Emails are case-insensitive.
pub fn portal_login(email: &str) -> String {
    format!("portal-logins/{}", email.trim().to_ascii_lowercase())
}
