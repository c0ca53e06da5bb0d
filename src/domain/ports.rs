use crate::domain::model::{Entity, EntityRef, Fields};
use crate::utils::error::Result;
use serde_json::Value;

/// Keyed store for one entity type.
///
/// Implementations do no locking of their own; the facade serializes access.
/// A missing id is not an error for `get`, callers decide what absence means.
pub trait Repository<T: Entity>: Send + Sync {
    /// Fails with `DuplicateKey` when the id is already stored.
    fn add(&mut self, entity: EntityRef<T>) -> Result<()>;

    fn get(&self, id: &str) -> Option<EntityRef<T>>;

    /// Snapshot in insertion order.
    fn get_all(&self) -> Vec<EntityRef<T>>;

    /// Merges `fields` through the entity's own validated update path.
    fn update(&mut self, id: &str, fields: &Fields) -> Result<EntityRef<T>>;

    fn delete(&mut self, id: &str) -> Result<EntityRef<T>>;

    /// First entity whose attribute `name` equals `value`.
    fn get_by_attribute(&self, name: &str, value: &Value) -> Option<EntityRef<T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}
