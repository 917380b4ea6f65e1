pub mod audit_log;
pub mod crud;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod instruments;
pub mod notes;
pub mod portal;
pub mod portal_accounts;
pub mod threads;
