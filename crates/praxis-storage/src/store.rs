use std::future::Future;
use std::pin::Pin;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stored blob and its content type.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Key/value blob storage. One impl per backend.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object. Missing keys are `StorageError::NotFound`.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<StoredObject, StorageError>>;

    /// Create or replace an object.
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Remove an object. Removing a missing key is not an error.
    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;

    /// All keys under a prefix.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;
}
