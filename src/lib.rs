pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{AppConfig, SeedFixture, SeedReport};
pub use crate::core::{HbnbFacade, Repositories};
pub use domain::{Amenity, Entity, EntityId, EntityKind, EntityRef, Fields, Place, Review, User};
pub use utils::error::{ErrorKind, HbnbError, Result};
