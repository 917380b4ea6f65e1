//! Traits shared by every persisted resource.

use jiff::Timestamp;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::draft::Draft;

/// A JSON document stored under `{COLLECTION}/{id}.json`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage collection, also the URL segment (e.g. "safety-plans").
    const COLLECTION: &'static str;

    /// Singular name used in logs and audit entries (e.g. "safety_plan").
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> Timestamp;
}

/// A record owned by exactly one provider.
pub trait Owned: Record {
    fn owner_id(&self) -> &str;
}

/// A record the linked client may reach through the portal.
pub trait PortalVisible: Owned {
    fn linked_client(&self) -> Option<Uuid>;

    /// Whether the record is exposed to the portal at all.
    fn visible_to_client(&self) -> bool {
        true
    }
}

/// A provider-owned record created and updated from a draft payload.
///
/// The draft holds every client-writable field. Server-assigned fields
/// (ids, owner, timestamps, derived scores) live outside it.
pub trait Editable: Owned {
    type Fields: Draft + Serialize + Clone;

    fn create(id: Uuid, user_id: String, fields: Self::Fields, now: Timestamp) -> Self;

    fn fields(&self) -> &Self::Fields;

    fn apply(&mut self, fields: Self::Fields, now: Timestamp);
}
