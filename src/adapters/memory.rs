use crate::domain::model::{Entity, EntityId, EntityRef, Fields};
use crate::domain::ports::Repository;
use crate::utils::error::{HbnbError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Process-local repository. Keeps insertion order for `get_all`.
pub struct InMemoryRepository<T> {
    items: HashMap<EntityId, EntityRef<T>>,
    order: Vec<EntityId>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn add(&mut self, entity: EntityRef<T>) -> Result<()> {
        let id = entity.read().id().clone();
        if self.items.contains_key(&id) {
            return Err(HbnbError::DuplicateKey {
                entity: T::KIND,
                key: "id".to_string(),
                value: id.to_string(),
            });
        }
        self.order.push(id.clone());
        self.items.insert(id, entity);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<EntityRef<T>> {
        self.items.get(id).cloned()
    }

    fn get_all(&self) -> Vec<EntityRef<T>> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }

    fn update(&mut self, id: &str, fields: &Fields) -> Result<EntityRef<T>> {
        let entity = self
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| HbnbError::not_found(T::KIND, id))?;
        entity.write().apply_update(fields)?;
        Ok(entity)
    }

    fn delete(&mut self, id: &str) -> Result<EntityRef<T>> {
        let entity = self
            .items
            .remove(id)
            .ok_or_else(|| HbnbError::not_found(T::KIND, id))?;
        self.order.retain(|stored| stored.as_str() != id);
        Ok(entity)
    }

    fn get_by_attribute(&self, name: &str, value: &Value) -> Option<EntityRef<T>> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .find(|entity| entity.read().attribute(name).as_ref() == Some(value))
            .cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amenity::Amenity;
    use crate::domain::user::User;
    use crate::utils::error::ErrorKind;
    use serde_json::json;

    fn user(email: &str) -> EntityRef<User> {
        EntityRef::new(User::new("John", "Doe", email, false).unwrap())
    }

    #[test]
    fn test_add_and_get() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        let alice = user("alice@example.com");
        let id = alice.read().id().clone();
        repo.add(alice.clone()).unwrap();

        let found = repo.get(id.as_str()).unwrap();
        assert!(found.ptr_eq(&alice));
        assert!(repo.get("missing").is_none());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id_fails() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        let alice = user("alice@example.com");
        repo.add(alice.clone()).unwrap();
        let err = repo.add(alice).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_get_all_keeps_insertion_order() {
        let mut repo: InMemoryRepository<Amenity> = InMemoryRepository::new();
        let names = ["Wi-Fi", "Pool", "Parking"];
        for name in names {
            repo.add(EntityRef::new(Amenity::new(name).unwrap())).unwrap();
        }
        let listed: Vec<String> = repo
            .get_all()
            .iter()
            .map(|a| a.read().name().to_string())
            .collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn test_update_validates_through_entity() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        let alice = user("alice@example.com");
        let id = alice.read().id().clone();
        repo.add(alice).unwrap();

        let ok = json!({"first_name": "Alice"}).as_object().cloned().unwrap();
        let updated = repo.update(id.as_str(), &ok).unwrap();
        assert_eq!(updated.read().first_name(), "Alice");

        let bad = json!({"email": "nope"}).as_object().cloned().unwrap();
        assert_eq!(repo.update(id.as_str(), &bad).unwrap_err().kind(), ErrorKind::InvalidField);
        assert_eq!(repo.get(id.as_str()).unwrap().read().email(), "alice@example.com");

        assert_eq!(repo.update("missing", &ok).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        let alice = user("alice@example.com");
        let id = alice.read().id().clone();
        repo.add(alice).unwrap();

        repo.delete(id.as_str()).unwrap();
        assert!(repo.is_empty());
        assert!(repo.get_all().is_empty());
        assert_eq!(repo.delete(id.as_str()).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_get_by_attribute() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        repo.add(user("alice@example.com")).unwrap();
        repo.add(user("bob@example.com")).unwrap();

        let bob = repo
            .get_by_attribute("email", &json!("bob@example.com"))
            .unwrap();
        assert_eq!(bob.read().email(), "bob@example.com");
        assert!(repo.get_by_attribute("email", &json!("carol@example.com")).is_none());
        assert!(repo.get_by_attribute("nickname", &json!("bob")).is_none());
    }

    #[test]
    fn test_clear() {
        let mut repo: InMemoryRepository<User> = InMemoryRepository::new();
        repo.add(user("alice@example.com")).unwrap();
        repo.clear();
        assert_eq!(repo.len(), 0);
    }
}
