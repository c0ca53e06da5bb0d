// Domain layer: entities, their validation, and the repository port.
// Nothing here knows about the facade or any transport.

pub mod amenity;
pub mod model;
pub mod place;
pub mod ports;
pub mod review;
pub mod user;
pub mod views;

pub use amenity::Amenity;
pub use model::{Entity, EntityId, EntityKind, EntityRef, Fields, Identity};
pub use place::Place;
pub use review::Review;
pub use user::User;
