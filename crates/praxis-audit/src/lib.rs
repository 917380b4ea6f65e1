//! praxis-audit
//!
//! Append-only audit trail. Every write is logged as a structured `tracing`
//! event and stored as an `AuditLogEntry` record.

pub mod error;
pub mod events;
