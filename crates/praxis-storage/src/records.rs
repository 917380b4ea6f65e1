//! Typed JSON record access on top of an [`ObjectStore`].

use std::sync::Arc;

use uuid::Uuid;

use praxis_core::keys;
use praxis_core::record::{Owned, Record};

use crate::error::StorageError;
use crate::store::{ObjectStore, StoredObject};

/// Repository of JSON records keyed `{collection}/{id}.json`, with a
/// per-owner index under `owners/{owner}/{collection}/`.
#[derive(Clone)]
pub struct Records {
    store: Arc<dyn ObjectStore>,
}

impl Records {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Load one record. A missing record is `Ok(None)`.
    pub async fn load<T: Record>(&self, id: Uuid) -> Result<Option<T>, StorageError> {
        let key = keys::record(T::COLLECTION, id);
        match self.store.get(&key).await {
            Ok(output) => decode(&key, &output.body).map(Some),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create or replace a record and its owner index entry.
    pub async fn save<T: Owned>(&self, record: &T) -> Result<(), StorageError> {
        let key = keys::record(T::COLLECTION, record.id());
        let body = serde_json::to_vec(record).map_err(|source| StorageError::Serialization {
            key: key.clone(),
            source,
        })?;
        self.store.put(&key, body, Some("application/json")).await?;

        let index = keys::owner_index(record.owner_id(), T::COLLECTION, record.id());
        self.store.put(&index, Vec::new(), None).await
    }

    pub async fn remove<T: Owned>(&self, record: &T) -> Result<(), StorageError> {
        self.store.delete(&keys::record(T::COLLECTION, record.id())).await?;
        self.store
            .delete(&keys::owner_index(record.owner_id(), T::COLLECTION, record.id()))
            .await
    }

    /// Every record of the collection owned by `owner`, newest first.
    ///
    /// Only the owner's index prefix is listed. Index entries whose record
    /// has gone, or now belongs to someone else, are skipped.
    pub async fn list_owned<T: Owned>(&self, owner: &str) -> Result<Vec<T>, StorageError> {
        let prefix = keys::owner_index_prefix(owner, T::COLLECTION);
        let entries = self.store.list(&prefix).await?;

        let mut records: Vec<T> = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Some(id) = entry
                .strip_prefix(&prefix)
                .and_then(|raw| Uuid::parse_str(raw).ok())
            else {
                tracing::debug!(key = %entry, "ignoring malformed index entry");
                continue;
            };
            match self.load::<T>(id).await? {
                Some(record) if record.owner_id() == owner => records.push(record),
                _ => {
                    tracing::debug!(key = %entry, "stale index entry");
                }
            }
        }

        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(records)
    }

    /// The owner's records that satisfy `keep`, newest first.
    pub async fn list_owned_where<T, F>(&self, owner: &str, keep: F) -> Result<Vec<T>, StorageError>
    where
        T: Owned,
        F: Fn(&T) -> bool,
    {
        let mut records = self.list_owned::<T>(owner).await?;
        records.retain(|r| keep(r));
        Ok(records)
    }

    pub async fn put_blob(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.store.put(key, body, content_type).await
    }

    /// Fetch a blob. A missing blob is `Ok(None)`.
    pub async fn get_blob(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        match self.store.get(key).await {
            Ok(output) => Ok(Some(output)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_blob(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(key).await
    }
}

fn decode<T: Record>(key: &str, body: &[u8]) -> Result<T, StorageError> {
    serde_json::from_slice(body).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}
