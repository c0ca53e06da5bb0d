//! Serializable read models built from entities.
//!
//! Transports render these directly; shapes follow the REST resources
//! (flat records for create/update responses, a nested detail for places).

use crate::domain::amenity::Amenity;
use crate::domain::model::{Entity, EntityId};
use crate::domain::place::Place;
use crate::domain::review::Review;
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            is_admin: user.is_admin(),
            created_at: user.identity().created_at(),
            updated_at: user.identity().updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenityRecord {
    pub id: EntityId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Amenity> for AmenityRecord {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id().clone(),
            name: amenity.name().to_string(),
            created_at: amenity.identity().created_at(),
            updated_at: amenity.identity().updated_at(),
        }
    }
}

/// List-view entry for places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub id: EntityId,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Place> for PlaceSummary {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id().clone(),
            title: place.title().to_string(),
            latitude: place.latitude(),
            longitude: place.longitude(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenitySummary {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub id: EntityId,
    pub text: String,
    pub rating: u8,
    pub user_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetail {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: OwnerSummary,
    pub amenities: Vec<AmenitySummary>,
    pub reviews: Vec<ReviewSummary>,
}

impl From<&Place> for PlaceDetail {
    fn from(place: &Place) -> Self {
        let owner = {
            let owner = place.owner().read();
            OwnerSummary {
                id: owner.id().clone(),
                first_name: owner.first_name().to_string(),
                last_name: owner.last_name().to_string(),
                email: owner.email().to_string(),
            }
        };
        let amenities = place
            .amenities()
            .iter()
            .map(|amenity| {
                let amenity = amenity.read();
                AmenitySummary {
                    id: amenity.id().clone(),
                    name: amenity.name().to_string(),
                }
            })
            .collect();
        let reviews = place
            .reviews()
            .iter()
            .map(|review| {
                let review = review.read();
                ReviewSummary {
                    id: review.id().clone(),
                    text: review.text().to_string(),
                    rating: review.rating(),
                    user_id: review.user_id(),
                }
            })
            .collect();

        Self {
            id: place.id().clone(),
            title: place.title().to_string(),
            description: place.description().map(str::to_string),
            price: place.price(),
            latitude: place.latitude(),
            longitude: place.longitude(),
            owner,
            amenities,
            reviews,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub id: EntityId,
    pub text: String,
    pub rating: u8,
    pub user_id: EntityId,
    pub place_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Review> for ReviewRecord {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().clone(),
            text: review.text().to_string(),
            rating: review.rating(),
            user_id: review.user_id(),
            place_id: review.place_id().clone(),
            created_at: review.identity().created_at(),
            updated_at: review.identity().updated_at(),
        }
    }
}

/// Every collection in the store, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub users: Vec<UserRecord>,
    pub amenities: Vec<AmenityRecord>,
    pub places: Vec<PlaceDetail>,
    pub reviews: Vec<ReviewRecord>,
}
