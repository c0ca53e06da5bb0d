use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use uuid::Uuid;

/// Raw input as received from a transport: field name to JSON value.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Amenity,
    Place,
    Review,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier and timestamps embedded in every entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the entity as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.to_string())),
            "created_at" => Some(Value::String(self.created_at.to_rfc3339())),
            "updated_at" => Some(Value::String(self.updated_at.to_rfc3339())),
            _ => None,
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

/// A domain object stored in a repository.
pub trait Entity: Send + Sync + 'static {
    const KIND: EntityKind;

    fn identity(&self) -> &Identity;

    fn id(&self) -> &EntityId {
        self.identity().id()
    }

    /// Current value of a named attribute, for secondary-key lookups.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Validates every supplied field before changing any of them, then
    /// refreshes `updated_at`. Unknown keys are ignored.
    fn apply_update(&mut self, fields: &Fields) -> Result<()>;
}

/// Shared handle to a stored entity. Every holder observes the same value.
pub struct EntityRef<T>(Arc<RwLock<T>>);

impl<T> EntityRef<T> {
    pub fn new(entity: T) -> Self {
        Self(Arc::new(RwLock::new(entity)))
    }

    // A panic while holding the lock cannot leave an entity half-updated,
    // since updates validate before mutating, so poisoning is ignored.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn downgrade(&self) -> WeakRef<T> {
        WeakRef(Arc::downgrade(&self.0))
    }
}

impl<T> Clone for EntityRef<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for EntityRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

/// Non-owning back-pointer, used where a strong handle would form a cycle.
pub struct WeakRef<T>(Weak<RwLock<T>>);

impl<T> WeakRef<T> {
    pub fn upgrade(&self) -> Option<EntityRef<T>> {
        self.0.upgrade().map(EntityRef)
    }
}

impl<T> Clone for WeakRef<T> {
    fn clone(&self) -> Self {
        Self(Weak::clone(&self.0))
    }
}

impl<T> fmt::Debug for WeakRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakRef")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_timestamps_start_equal() {
        let identity = Identity::new();
        assert_eq!(identity.created_at(), identity.updated_at());
        assert!(!identity.id().as_str().is_empty());
    }

    #[test]
    fn test_identity_touch_refreshes_updated_at() {
        let mut identity = Identity::new();
        let created = identity.created_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        identity.touch();
        assert_eq!(identity.created_at(), created);
        assert!(identity.updated_at() > created);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Identity::new();
        let b = Identity::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_entity_ref_shares_state() {
        let first = EntityRef::new(1_u32);
        let second = first.clone();
        *first.write() = 7;
        assert_eq!(*second.read(), 7);
        assert!(first.ptr_eq(&second));

        let weak = first.downgrade();
        assert!(weak.upgrade().is_some());
        drop(first);
        drop(second);
        assert!(weak.upgrade().is_none());
    }
}
