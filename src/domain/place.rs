use crate::domain::amenity::Amenity;
use crate::domain::model::{Entity, EntityId, EntityKind, EntityRef, Fields, Identity};
use crate::domain::review::Review;
use crate::domain::user::User;
use crate::utils::error::{HbnbError, Result};
use crate::utils::validation::{
    optional_str, required_f64, required_str, update_f64, update_str, validate_length,
    validate_positive, validate_range,
};
use serde_json::Value;

pub const TITLE_MAX: usize = 100;

fn validate_price(price: f64) -> Result<()> {
    validate_positive("price", price)
}

fn validate_latitude(latitude: f64) -> Result<()> {
    validate_range("latitude", latitude, -90.0, 90.0)
}

fn validate_longitude(longitude: f64) -> Result<()> {
    validate_range("longitude", longitude, -180.0, 180.0)
}

/// A listing. The owner is fixed at construction; amenities and reviews only
/// ever grow, except that the facade detaches a review when deleting it.
#[derive(Debug)]
pub struct Place {
    identity: Identity,
    title: String,
    description: Option<String>,
    price: f64,
    latitude: f64,
    longitude: f64,
    owner: EntityRef<User>,
    amenities: Vec<EntityRef<Amenity>>,
    reviews: Vec<EntityRef<Review>>,
}

impl Place {
    pub fn new(
        title: &str,
        description: Option<&str>,
        price: f64,
        latitude: f64,
        longitude: f64,
        owner: EntityRef<User>,
    ) -> Result<Self> {
        validate_length("title", title, TITLE_MAX)?;
        validate_price(price)?;
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;

        Ok(Self {
            identity: Identity::new(),
            title: title.to_string(),
            description: description.map(str::to_string),
            price,
            latitude,
            longitude,
            owner,
            amenities: Vec::new(),
            reviews: Vec::new(),
        })
    }

    /// Reads the scalar fields; the caller has already resolved the owner.
    pub fn from_fields(fields: &Fields, owner: EntityRef<User>) -> Result<Self> {
        let title = required_str(fields, "title")?;
        let description = optional_str(fields, "description")?;
        let price = required_f64(fields, "price")?;
        let latitude = required_f64(fields, "latitude")?;
        let longitude = required_f64(fields, "longitude")?;
        Self::new(title, description, price, latitude, longitude, owner)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn owner(&self) -> &EntityRef<User> {
        &self.owner
    }

    pub fn owner_id(&self) -> EntityId {
        self.owner.read().id().clone()
    }

    pub fn amenities(&self) -> &[EntityRef<Amenity>] {
        &self.amenities
    }

    pub fn reviews(&self) -> &[EntityRef<Review>] {
        &self.reviews
    }

    /// Attaching an amenity that is already present is a no-op.
    pub fn add_amenity(&mut self, amenity: EntityRef<Amenity>) {
        let id = amenity.read().id().clone();
        if self.amenities.iter().any(|a| a.read().id() == &id) {
            return;
        }
        self.amenities.push(amenity);
    }

    pub fn add_review(&mut self, review: EntityRef<Review>) -> Result<()> {
        let (review_id, place_id) = {
            let guard = review.read();
            (guard.id().clone(), guard.place_id().clone())
        };

        if &place_id != self.identity.id() {
            return Err(HbnbError::invalid(
                "reviews",
                format!("review {} belongs to place {}", review_id, place_id),
            ));
        }
        if self.reviews.iter().any(|r| r.read().id() == &review_id) {
            return Err(HbnbError::invalid(
                "reviews",
                format!("review {} is already attached", review_id),
            ));
        }

        self.reviews.push(review);
        self.identity.touch();
        Ok(())
    }

    pub(crate) fn remove_review(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.read().id().as_str() != review_id);
        let removed = self.reviews.len() != before;
        if removed {
            self.identity.touch();
        }
        removed
    }
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::from(self.title.as_str())),
            "description" => Some(self.description.as_deref().map_or(Value::Null, Value::from)),
            "price" => Some(Value::from(self.price)),
            "latitude" => Some(Value::from(self.latitude)),
            "longitude" => Some(Value::from(self.longitude)),
            "owner_id" => Some(Value::from(self.owner_id().as_str())),
            _ => self.identity.attribute(name),
        }
    }

    /// `owner_id` and `amenities` are not updatable and are ignored here.
    fn apply_update(&mut self, fields: &Fields) -> Result<()> {
        let title = update_str(fields, "title")?;
        let description = optional_str(fields, "description")?;
        let price = update_f64(fields, "price")?;
        let latitude = update_f64(fields, "latitude")?;
        let longitude = update_f64(fields, "longitude")?;

        if let Some(value) = title {
            validate_length("title", value, TITLE_MAX)?;
        }
        if let Some(value) = price {
            validate_price(value)?;
        }
        if let Some(value) = latitude {
            validate_latitude(value)?;
        }
        if let Some(value) = longitude {
            validate_longitude(value)?;
        }

        if let Some(value) = title {
            self.title = value.to_string();
        }
        if let Some(value) = description {
            self.description = Some(value.to_string());
        }
        if let Some(value) = price {
            self.price = value;
        }
        if let Some(value) = latitude {
            self.latitude = value;
        }
        if let Some(value) = longitude {
            self.longitude = value;
        }
        self.identity.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use serde_json::json;

    fn owner() -> EntityRef<User> {
        EntityRef::new(User::new("John", "Doe", "john@example.com", false).unwrap())
    }

    fn place(price: f64, latitude: f64, longitude: f64) -> Result<Place> {
        Place::new("Loft", Some("Near the river"), price, latitude, longitude, owner())
    }

    #[test]
    fn test_coordinate_bounds_are_inclusive() {
        assert!(place(100.0, 90.0, 180.0).is_ok());
        assert!(place(100.0, -90.0, -180.0).is_ok());
        assert!(place(100.0, 90.0001, 0.0).is_err());
        assert!(place(100.0, -90.0001, 0.0).is_err());
        assert!(place(100.0, 0.0, 180.0001).is_err());
        assert!(place(100.0, 0.0, -180.0001).is_err());
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(place(0.01, 0.0, 0.0).is_ok());
        let err = place(0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, HbnbError::InvalidField { ref field, .. } if field == "price"));
        assert!(place(-1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_title_bounds() {
        let owner = owner();
        assert!(Place::new(&"t".repeat(100), None, 1.0, 0.0, 0.0, owner.clone()).is_ok());
        assert!(Place::new(&"t".repeat(101), None, 1.0, 0.0, 0.0, owner.clone()).is_err());
        assert!(Place::new("", None, 1.0, 0.0, 0.0, owner).is_err());
    }

    #[test]
    fn test_from_fields_requires_coordinates() {
        let fields = json!({"title": "Loft", "price": 10}).as_object().cloned().unwrap();
        let err = Place::from_fields(&fields, owner()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_owner_is_a_live_reference() {
        let owner = owner();
        let place = Place::new("Loft", None, 10.0, 0.0, 0.0, owner.clone()).unwrap();
        let update = json!({"first_name": "Jack"}).as_object().cloned().unwrap();
        owner.write().apply_update(&update).unwrap();
        assert_eq!(place.owner().read().first_name(), "Jack");
    }

    #[test]
    fn test_add_amenity_ignores_duplicates() {
        let mut place = place(10.0, 0.0, 0.0).unwrap();
        let wifi = EntityRef::new(Amenity::new("Wi-Fi").unwrap());
        place.add_amenity(wifi.clone());
        place.add_amenity(wifi);
        assert_eq!(place.amenities().len(), 1);
    }

    #[test]
    fn test_add_review_checks_target_place() {
        let author = owner();
        let first = EntityRef::new(place(10.0, 0.0, 0.0).unwrap());
        let second = EntityRef::new(place(20.0, 0.0, 0.0).unwrap());
        let review = EntityRef::new(Review::new("Great", 5, &first, author).unwrap());

        assert!(second.write().add_review(review.clone()).is_err());
        first.write().add_review(review.clone()).unwrap();
        assert!(first.write().add_review(review.clone()).is_err());
        assert_eq!(first.read().reviews().len(), 1);

        let review_id = review.read().id().clone();
        assert!(first.write().remove_review(review_id.as_str()));
        assert!(first.read().reviews().is_empty());
    }

    #[test]
    fn test_update_rejects_invalid_without_partial_apply() {
        let mut place = place(10.0, 0.0, 0.0).unwrap();
        let update = json!({"title": "Renamed", "latitude": 91})
            .as_object()
            .cloned()
            .unwrap();
        assert!(place.apply_update(&update).is_err());
        assert_eq!(place.title(), "Loft");
        assert_eq!(place.latitude(), 0.0);
    }

    #[test]
    fn test_update_ignores_owner_and_amenities() {
        let owner = owner();
        let mut place = Place::new("Loft", None, 10.0, 0.0, 0.0, owner.clone()).unwrap();
        let update = json!({"owner_id": "someone-else", "amenities": ["x"], "price": 55.5})
            .as_object()
            .cloned()
            .unwrap();
        place.apply_update(&update).unwrap();
        assert_eq!(place.price(), 55.5);
        assert!(place.owner().ptr_eq(&owner));
        assert!(place.amenities().is_empty());
    }

    #[test]
    fn test_update_rejects_null_for_required_fields() {
        let mut place = place(10.0, 0.0, 0.0).unwrap();
        for key in ["title", "price", "latitude", "longitude"] {
            let mut update = Fields::new();
            update.insert(key.to_string(), Value::Null);
            let err = place.apply_update(&update).unwrap_err();
            assert!(matches!(err, HbnbError::InvalidField { ref field, .. } if field == key));
        }
        assert_eq!(place.title(), "Loft");
        assert_eq!(place.price(), 10.0);
    }

    #[test]
    fn test_update_null_description_keeps_value() {
        let mut place = place(10.0, 0.0, 0.0).unwrap();
        let update = json!({"description": null}).as_object().cloned().unwrap();
        place.apply_update(&update).unwrap();
        assert_eq!(place.description(), Some("Near the river"));
    }

    #[test]
    fn test_review_changes_touch_place() {
        let place = EntityRef::new(place(10.0, 0.0, 0.0).unwrap());
        let created = place.read().identity().updated_at();
        let review = EntityRef::new(Review::new("Great", 5, &place, owner()).unwrap());

        std::thread::sleep(std::time::Duration::from_millis(2));
        place.write().add_review(review.clone()).unwrap();
        let after_add = place.read().identity().updated_at();
        assert!(after_add > created);

        std::thread::sleep(std::time::Duration::from_millis(2));
        let review_id = review.read().id().clone();
        assert!(place.write().remove_review(review_id.as_str()));
        assert!(place.read().identity().updated_at() > after_add);

        let unchanged = place.read().identity().updated_at();
        assert!(!place.write().remove_review(review_id.as_str()));
        assert_eq!(place.read().identity().updated_at(), unchanged);
    }
}
