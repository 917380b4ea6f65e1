//! praxis-auth
//!
//! Bearer token verification for providers and portal clients, portal
//! session token issuance, and portal secret hashing.

pub mod error;
pub mod jwt;
pub mod password;
pub mod portal;
