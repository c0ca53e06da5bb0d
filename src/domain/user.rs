use crate::domain::model::{Entity, EntityKind, Fields, Identity};
use crate::utils::error::Result;
use crate::utils::validation::{
    optional_bool, required_str, update_bool, update_str, validate_email, validate_length,
};
use serde_json::Value;

pub const NAME_MAX: usize = 50;

#[derive(Debug, Clone)]
pub struct User {
    identity: Identity,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
}

impl User {
    pub fn new(first_name: &str, last_name: &str, email: &str, is_admin: bool) -> Result<Self> {
        validate_length("first_name", first_name, NAME_MAX)?;
        validate_length("last_name", last_name, NAME_MAX)?;
        validate_email("email", email)?;

        Ok(Self {
            identity: Identity::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            is_admin,
        })
    }

    pub fn from_fields(fields: &Fields) -> Result<Self> {
        let first_name = required_str(fields, "first_name")?;
        let last_name = required_str(fields, "last_name")?;
        let email = required_str(fields, "email")?;
        let is_admin = optional_bool(fields, "is_admin")?.unwrap_or(false);
        Self::new(first_name, last_name, email, is_admin)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "first_name" => Some(Value::from(self.first_name.as_str())),
            "last_name" => Some(Value::from(self.last_name.as_str())),
            "email" => Some(Value::from(self.email.as_str())),
            "is_admin" => Some(Value::Bool(self.is_admin)),
            _ => self.identity.attribute(name),
        }
    }

    fn apply_update(&mut self, fields: &Fields) -> Result<()> {
        let first_name = update_str(fields, "first_name")?;
        let last_name = update_str(fields, "last_name")?;
        let email = update_str(fields, "email")?;
        let is_admin = update_bool(fields, "is_admin")?;

        if let Some(value) = first_name {
            validate_length("first_name", value, NAME_MAX)?;
        }
        if let Some(value) = last_name {
            validate_length("last_name", value, NAME_MAX)?;
        }
        if let Some(value) = email {
            validate_email("email", value)?;
        }

        if let Some(value) = first_name {
            self.first_name = value.to_string();
        }
        if let Some(value) = last_name {
            self.last_name = value.to_string();
        }
        if let Some(value) = email {
            self.email = value.to_string();
        }
        if let Some(value) = is_admin {
            self.is_admin = value;
        }
        self.identity.touch();
        Ok(())
    }
}
