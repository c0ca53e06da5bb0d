//! TOML seed fixtures.
//!
//! Entities reference each other by symbolic `key` rather than by id, since
//! ids are generated at creation:
//!
//! ```toml
//! [[users]]
//! key = "alice"
//! first_name = "Alice"
//! last_name = "Martin"
//! email = "alice@example.com"
//!
//! [[places]]
//! key = "loft"
//! owner = "alice"
//! title = "Loft"
//! price = 120.0
//! latitude = 48.85
//! longitude = 2.35
//! amenities = ["wifi"]
//!
//! [[reviews]]
//! user = "alice"
//! place = "loft"
//! text = "Great"
//! rating = 5
//! ```

use crate::core::HbnbFacade;
use crate::domain::model::{Entity, EntityId, Fields};
use crate::utils::error::{HbnbError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFixture {
    #[serde(default)]
    pub users: Vec<Fields>,
    #[serde(default)]
    pub amenities: Vec<Fields>,
    #[serde(default)]
    pub places: Vec<Fields>,
    #[serde(default)]
    pub reviews: Vec<Fields>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub amenities: usize,
    pub places: usize,
    pub reviews: usize,
    pub user_ids: BTreeMap<String, EntityId>,
    pub amenity_ids: BTreeMap<String, EntityId>,
    pub place_ids: BTreeMap<String, EntityId>,
}

fn take_key(entry: &mut Fields) -> Result<Option<String>> {
    match entry.remove("key") {
        None => Ok(None),
        Some(Value::String(key)) => Ok(Some(key)),
        Some(other) => Err(HbnbError::ConfigError {
            message: format!("seed key must be a string, got {}", other),
        }),
    }
}

// Unknown keys pass through unchanged so the facade reports the dangling
// reference itself.
fn resolve(keys: &BTreeMap<String, EntityId>, key: &str) -> Value {
    keys.get(key)
        .map_or_else(|| Value::from(key), |id| Value::from(id.as_str()))
}

fn rename_reference(
    entry: &mut Fields,
    from: &str,
    to: &str,
    keys: &BTreeMap<String, EntityId>,
) {
    if let Some(value) = entry.remove(from) {
        let resolved = match value.as_str() {
            Some(key) => resolve(keys, key),
            None => value,
        };
        entry.insert(to.to_string(), resolved);
    }
}

impl SeedFixture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HbnbError::ConfigError {
            message: format!("Seed parsing error: {}", e),
        })
    }

    /// Creates every entry through the facade, in dependency order. Stops at
    /// the first failure; entries created before it stay in the store.
    pub fn apply(&self, facade: &HbnbFacade) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for entry in &self.users {
            let mut fields = entry.clone();
            let key = take_key(&mut fields)?;
            let user = facade.create_user(&fields)?;
            if let Some(key) = key {
                report.user_ids.insert(key, user.read().id().clone());
            }
            report.users += 1;
        }

        for entry in &self.amenities {
            let mut fields = entry.clone();
            let key = take_key(&mut fields)?;
            let amenity = facade.create_amenity(&fields)?;
            if let Some(key) = key {
                report.amenity_ids.insert(key, amenity.read().id().clone());
            }
            report.amenities += 1;
        }

        for entry in &self.places {
            let mut fields = entry.clone();
            let key = take_key(&mut fields)?;
            rename_reference(&mut fields, "owner", "owner_id", &report.user_ids);
            if let Some(Value::Array(amenity_keys)) = fields.remove("amenities") {
                let ids = amenity_keys
                    .into_iter()
                    .map(|value| match value.as_str() {
                        Some(key) => resolve(&report.amenity_ids, key),
                        None => value,
                    })
                    .collect();
                fields.insert("amenities".to_string(), Value::Array(ids));
            }

            let place = facade.create_place(&fields)?;
            if let Some(key) = key {
                report.place_ids.insert(key, place.read().id().clone());
            }
            report.places += 1;
        }

        for entry in &self.reviews {
            let mut fields = entry.clone();
            rename_reference(&mut fields, "user", "user_id", &report.user_ids);
            rename_reference(&mut fields, "place", "place_id", &report.place_ids);
            facade.create_review(&fields)?;
            report.reviews += 1;
        }

        tracing::info!(
            "Seeded {} users, {} amenities, {} places, {} reviews",
            report.users,
            report.amenities,
            report.places,
            report.reviews
        );
        Ok(report)
    }
}
