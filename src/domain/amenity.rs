use crate::domain::model::{Entity, EntityKind, Fields, Identity};
use crate::utils::error::Result;
use crate::utils::validation::{required_str, update_str, validate_length};
use serde_json::Value;

pub const NAME_MAX: usize = 50;

#[derive(Debug, Clone)]
pub struct Amenity {
    identity: Identity,
    name: String,
}

impl Amenity {
    pub fn new(name: &str) -> Result<Self> {
        validate_length("name", name, NAME_MAX)?;
        Ok(Self {
            identity: Identity::new(),
            name: name.to_string(),
        })
    }

    pub fn from_fields(fields: &Fields) -> Result<Self> {
        Self::new(required_str(fields, "name")?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            _ => self.identity.attribute(name),
        }
    }

    fn apply_update(&mut self, fields: &Fields) -> Result<()> {
        if let Some(name) = update_str(fields, "name")? {
            validate_length("name", name, NAME_MAX)?;
            self.name = name.to_string();
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

    #[test]
    fn test_amenity_name_bounds() {
        assert!(Amenity::new("Wi-Fi").is_ok());
        assert!(Amenity::new(&"x".repeat(50)).is_ok());
        assert!(Amenity::new(&"x".repeat(51)).is_err());
        assert!(Amenity::new("").is_err());
    }

    #[test]
    fn test_amenity_update() {
        let mut amenity = Amenity::new("Wi-Fi").unwrap();
        let update = json!({"name": "Fibre"}).as_object().cloned().unwrap();
        amenity.apply_update(&update).unwrap();
        assert_eq!(amenity.name(), "Fibre");

        let update = json!({"name": ""}).as_object().cloned().unwrap();
        let err = amenity.apply_update(&update).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert_eq!(amenity.name(), "Fibre");

        let update = json!({"name": null}).as_object().cloned().unwrap();
        let err = amenity.apply_update(&update).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert_eq!(amenity.name(), "Fibre");
    }

    #[test]
    fn test_missing_name() {
        let err = Amenity::from_fields(&Fields::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }
}
