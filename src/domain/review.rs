use crate::domain::model::{Entity, EntityId, EntityKind, EntityRef, Fields, Identity, WeakRef};
use crate::domain::place::Place;
use crate::domain::user::User;
use crate::utils::error::{HbnbError, Result};
use crate::utils::validation::{required_i64, required_str, update_str, validate_non_empty_string};
use serde_json::Value;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

pub fn validate_rating(rating: i64) -> Result<u8> {
    match u8::try_from(rating) {
        Ok(value) if (RATING_MIN..=RATING_MAX).contains(&value) => Ok(value),
        _ => Err(HbnbError::invalid(
            "rating",
            format!("Rating must be an integer between {} and {}", RATING_MIN, RATING_MAX),
        )),
    }
}

#[derive(Debug)]
pub struct Review {
    identity: Identity,
    text: String,
    rating: u8,
    place_id: EntityId,
    // The place owns its reviews; this side stays weak.
    place: WeakRef<Place>,
    user: EntityRef<User>,
}

impl Review {
    pub fn new(text: &str, rating: i64, place: &EntityRef<Place>, user: EntityRef<User>) -> Result<Self> {
        validate_non_empty_string("text", text)?;
        let rating = validate_rating(rating)?;
        let place_id = place.read().id().clone();

        Ok(Self {
            identity: Identity::new(),
            text: text.to_string(),
            rating,
            place_id,
            place: place.downgrade(),
            user,
        })
    }

    pub fn from_fields(fields: &Fields, place: &EntityRef<Place>, user: EntityRef<User>) -> Result<Self> {
        let text = required_str(fields, "text")?;
        let rating = required_i64(fields, "rating")?;
        Self::new(text, rating, place, user)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn place_id(&self) -> &EntityId {
        &self.place_id
    }

    /// `None` only once the place itself has been dropped.
    pub fn place(&self) -> Option<EntityRef<Place>> {
        self.place.upgrade()
    }

    pub fn user(&self) -> &EntityRef<User> {
        &self.user
    }

    pub fn user_id(&self) -> EntityId {
        self.user.read().id().clone()
    }
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::from(self.text.as_str())),
            "rating" => Some(Value::from(self.rating)),
            "place_id" => Some(Value::from(self.place_id.as_str())),
            "user_id" => Some(Value::from(self.user_id().as_str())),
            _ => self.identity.attribute(name),
        }
    }

    /// Only `text` is mutable; other keys are ignored.
    fn apply_update(&mut self, fields: &Fields) -> Result<()> {
        if let Some(text) = update_str(fields, "text")? {
            validate_non_empty_string("text", text)?;
            self.text = text.to_string();
        }
        self.identity.touch();
        Ok(())
    }
}
