//! praxis-storage
//!
//! Object storage for JSON records and file blobs. An S3 backend for
//! deployment, an in-memory backend for local runs and tests, and a typed
//! record repository on top of either.

pub mod error;
pub mod memory;
pub mod records;
pub mod s3;
pub mod store;
