//! praxis-core
//!
//! Pure domain types, draft validation, storage key conventions, and the
//! ownership guard. No AWS SDK dependency; this is the shared vocabulary of
//! the Praxis system.

pub mod access;
pub mod draft;
pub mod error;
pub mod keys;
pub mod models;
pub mod record;
