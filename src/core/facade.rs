//! Service boundary for the booking core.
//!
//! [`HbnbFacade`] owns one repository per entity type and is the only thing a
//! transport talks to. Each operation runs under a single store lock, so the
//! check-then-insert sequences (email uniqueness, reference resolution, the
//! place review back-reference) cannot interleave with another caller.

use crate::adapters::InMemoryRepository;
use crate::domain::amenity::Amenity;
use crate::domain::model::{Entity, EntityKind, EntityRef, Fields};
use crate::domain::place::Place;
use crate::domain::ports::Repository;
use crate::domain::review::{validate_rating, Review};
use crate::domain::user::User;
use crate::domain::views::{AmenityRecord, PlaceDetail, ReviewRecord, StoreSnapshot, UserRecord};
use crate::utils::error::{HbnbError, Result};
use crate::utils::validation::{
    optional_id_list, required_i64, required_str, update_str, validate_non_empty_string,
    validate_required_field,
};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

const PLACE_REQUIRED_FIELDS: [&str; 5] = ["owner_id", "title", "price", "latitude", "longitude"];
const PLACE_IMMUTABLE_FIELDS: [&str; 2] = ["owner_id", "amenities"];
const REVIEW_REQUIRED_FIELDS: [&str; 4] = ["text", "rating", "user_id", "place_id"];
const REVIEW_MUTABLE_FIELDS: [&str; 1] = ["text"];

pub struct Repositories {
    pub users: Box<dyn Repository<User>>,
    pub places: Box<dyn Repository<Place>>,
    pub reviews: Box<dyn Repository<Review>>,
    pub amenities: Box<dyn Repository<Amenity>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Box::new(InMemoryRepository::new()),
            places: Box::new(InMemoryRepository::new()),
            reviews: Box::new(InMemoryRepository::new()),
            amenities: Box::new(InMemoryRepository::new()),
        }
    }
}

impl Default for Repositories {
    fn default() -> Self {
        Self::in_memory()
    }
}

pub struct HbnbFacade {
    store: Mutex<Repositories>,
}

impl HbnbFacade {
    pub fn new() -> Self {
        Self::with_repositories(Repositories::in_memory())
    }

    pub fn with_repositories(repositories: Repositories) -> Self {
        Self {
            store: Mutex::new(repositories),
        }
    }

    // Repositories validate before mutating, so a poisoned lock still guards
    // consistent data.
    fn store(&self) -> MutexGuard<'_, Repositories> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Empties every repository. Meant for test harnesses.
    pub fn clear(&self) {
        let mut store = self.store();
        store.reviews.clear();
        store.places.clear();
        store.amenities.clear();
        store.users.clear();
        tracing::debug!("Store cleared");
    }

    pub fn create_user(&self, data: &Fields) -> Result<EntityRef<User>> {
        let user = User::from_fields(data)?;

        let mut store = self.store();
        let email = Value::from(user.email());
        if store.users.get_by_attribute("email", &email).is_some() {
            tracing::warn!("Rejected user creation: email {} already registered", user.email());
            return Err(HbnbError::DuplicateKey {
                entity: EntityKind::User,
                key: "email".to_string(),
                value: user.email().to_string(),
            });
        }

        let user = EntityRef::new(user);
        store.users.add(user.clone())?;
        tracing::debug!("Created user {}", user.read().id());
        Ok(user)
    }

    pub fn get_user(&self, user_id: &str) -> Option<EntityRef<User>> {
        self.store().users.get(user_id)
    }

    pub fn get_all_users(&self) -> Vec<EntityRef<User>> {
        self.store().users.get_all()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<EntityRef<User>> {
        self.store().users.get_by_attribute("email", &Value::from(email))
    }

    /// `Ok(None)` when no user has this id.
    pub fn update_user(&self, user_id: &str, data: &Fields) -> Result<Option<EntityRef<User>>> {
        let mut store = self.store();
        if store.users.get(user_id).is_none() {
            return Ok(None);
        }

        if let Some(email) = update_str(data, "email")? {
            if let Some(existing) = store.users.get_by_attribute("email", &Value::from(email)) {
                if existing.read().id().as_str() != user_id {
                    tracing::warn!("Rejected user update: email {} already registered", email);
                    return Err(HbnbError::DuplicateKey {
                        entity: EntityKind::User,
                        key: "email".to_string(),
                        value: email.to_string(),
                    });
                }
            }
        }

        let user = store.users.update(user_id, data)?;
        tracing::debug!("Updated user {}", user_id);
        Ok(Some(user))
    }

    pub fn create_amenity(&self, data: &Fields) -> Result<EntityRef<Amenity>> {
        let amenity = EntityRef::new(Amenity::from_fields(data)?);
        self.store().amenities.add(amenity.clone())?;
        tracing::debug!("Created amenity {}", amenity.read().id());
        Ok(amenity)
    }

    pub fn get_amenity(&self, amenity_id: &str) -> Option<EntityRef<Amenity>> {
        self.store().amenities.get(amenity_id)
    }

    pub fn get_all_amenities(&self) -> Vec<EntityRef<Amenity>> {
        self.store().amenities.get_all()
    }

    /// `Ok(None)` when no amenity has this id.
    pub fn update_amenity(
        &self,
        amenity_id: &str,
        data: &Fields,
    ) -> Result<Option<EntityRef<Amenity>>> {
        let mut store = self.store();
        if store.amenities.get(amenity_id).is_none() {
            return Ok(None);
        }
        let amenity = store.amenities.update(amenity_id, data)?;
        tracing::debug!("Updated amenity {}", amenity_id);
        Ok(Some(amenity))
    }

    /// Creates a place owned by `owner_id` with the listed `amenities`.
    ///
    /// Nothing is stored unless the owner and every amenity resolve and all
    /// fields validate.
    pub fn create_place(&self, data: &Fields) -> Result<EntityRef<Place>> {
        for field in PLACE_REQUIRED_FIELDS {
            validate_required_field(field, data)?;
        }
        let owner_id = required_str(data, "owner_id")?;
        let amenity_ids = optional_id_list(data, "amenities")?;

        let mut store = self.store();
        let owner = store.users.get(owner_id).ok_or_else(|| {
            tracing::warn!("Rejected place creation: owner {} not found", owner_id);
            HbnbError::reference_not_found(EntityKind::User, owner_id)
        })?;

        let mut place = Place::from_fields(data, owner)?;

        for amenity_id in &amenity_ids {
            let amenity = store.amenities.get(amenity_id).ok_or_else(|| {
                tracing::warn!("Rejected place creation: amenity {} not found", amenity_id);
                HbnbError::reference_not_found(EntityKind::Amenity, amenity_id)
            })?;
            place.add_amenity(amenity);
        }

        let place = EntityRef::new(place);
        store.places.add(place.clone())?;
        tracing::debug!(
            "Created place {} with {} amenities",
            place.read().id(),
            amenity_ids.len()
        );
        Ok(place)
    }

    pub fn get_place(&self, place_id: &str) -> Option<EntityRef<Place>> {
        self.store().places.get(place_id)
    }

    pub fn get_all_places(&self) -> Vec<EntityRef<Place>> {
        self.store().places.get_all()
    }

    /// `Ok(None)` when no place has this id. `owner_id` and `amenities` in
    /// `data` are dropped without error; every other field is validated
    /// before any of them is applied.
    pub fn update_place(&self, place_id: &str, data: &Fields) -> Result<Option<EntityRef<Place>>> {
        let mut store = self.store();
        if store.places.get(place_id).is_none() {
            return Ok(None);
        }

        let mut fields = data.clone();
        for key in PLACE_IMMUTABLE_FIELDS {
            if fields.remove(key).is_some() {
                tracing::debug!("Ignoring immutable field '{}' on place {}", key, place_id);
            }
        }

        let place = store.places.update(place_id, &fields)?;
        tracing::debug!("Updated place {}", place_id);
        Ok(Some(place))
    }

    /// Creates a review and appends it to its place's review list.
    pub fn create_review(&self, data: &Fields) -> Result<EntityRef<Review>> {
        for field in REVIEW_REQUIRED_FIELDS {
            validate_required_field(field, data)?;
        }
        validate_non_empty_string("text", required_str(data, "text")?)?;
        validate_rating(required_i64(data, "rating")?)?;
        let user_id = required_str(data, "user_id")?;
        let place_id = required_str(data, "place_id")?;

        let mut store = self.store();
        let user = store.users.get(user_id).ok_or_else(|| {
            tracing::warn!("Rejected review creation: user {} not found", user_id);
            HbnbError::reference_not_found(EntityKind::User, user_id)
        })?;
        let place = store.places.get(place_id).ok_or_else(|| {
            tracing::warn!("Rejected review creation: place {} not found", place_id);
            HbnbError::reference_not_found(EntityKind::Place, place_id)
        })?;

        let review = EntityRef::new(Review::from_fields(data, &place, user)?);
        let review_id = review.read().id().clone();
        store.reviews.add(review.clone())?;

        let attached = place.write().add_review(review.clone());
        if let Err(e) = attached {
            store.reviews.delete(review_id.as_str())?;
            return Err(e);
        }

        tracing::debug!("Created review {} for place {}", review_id, place_id);
        Ok(review)
    }

    pub fn get_review(&self, review_id: &str) -> Option<EntityRef<Review>> {
        self.store().reviews.get(review_id)
    }

    pub fn get_all_reviews(&self) -> Vec<EntityRef<Review>> {
        self.store().reviews.get_all()
    }

    /// Fails with `NotFound` when the place does not exist.
    pub fn get_reviews_by_place(&self, place_id: &str) -> Result<Vec<EntityRef<Review>>> {
        let store = self.store();
        if store.places.get(place_id).is_none() {
            return Err(HbnbError::not_found(EntityKind::Place, place_id));
        }

        Ok(store
            .reviews
            .get_all()
            .into_iter()
            .filter(|review| review.read().place_id().as_str() == place_id)
            .collect())
    }

    /// `Ok(None)` when no review has this id. Only `text` is applied; other
    /// supplied fields are ignored.
    pub fn update_review(&self, review_id: &str, data: &Fields) -> Result<Option<EntityRef<Review>>> {
        let mut store = self.store();
        if store.reviews.get(review_id).is_none() {
            return Ok(None);
        }

        let fields: Fields = data
            .iter()
            .filter(|(key, _)| REVIEW_MUTABLE_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let review = store.reviews.update(review_id, &fields)?;
        tracing::debug!("Updated review {}", review_id);
        Ok(Some(review))
    }

    /// Removes the review from its repository and from its place.
    pub fn delete_review(&self, review_id: &str) -> Result<()> {
        let mut store = self.store();
        let review = store.reviews.delete(review_id)?;

        let place = review.read().place();
        if let Some(place) = place {
            place.write().remove_review(review_id);
        }

        tracing::debug!("Deleted review {}", review_id);
        Ok(())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let store = self.store();
        StoreSnapshot {
            users: store
                .users
                .get_all()
                .iter()
                .map(|u| UserRecord::from(&*u.read()))
                .collect(),
            amenities: store
                .amenities
                .get_all()
                .iter()
                .map(|a| AmenityRecord::from(&*a.read()))
                .collect(),
            places: store
                .places
                .get_all()
                .iter()
                .map(|p| PlaceDetail::from(&*p.read()))
                .collect(),
            reviews: store
                .reviews
                .get_all()
                .iter()
                .map(|r| ReviewRecord::from(&*r.read()))
                .collect(),
        }
    }
}

impl Default for HbnbFacade {
    fn default() -> Self {
        Self::new()
    }
}
