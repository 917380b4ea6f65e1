//! praxis-bedrock
//!
//! Bedrock model invocation and the diagnosis/billing code suggestion
//! contract built on it.

pub mod error;
pub mod model;
pub mod suggest;
