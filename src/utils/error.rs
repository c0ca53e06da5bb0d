use crate::domain::model::EntityKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("{entity} with {key} '{value}' already exists")]
    DuplicateKey {
        entity: EntityKind,
        key: String,
        value: String,
    },

    #[error("Referenced {entity} not found: {id}")]
    ReferenceNotFound { entity: EntityKind, id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Flat classification of [`HbnbError`] for callers that map failures to
/// their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidField,
    MissingField,
    NotFound,
    DuplicateKey,
    ReferenceNotFound,
    Config,
    Io,
    Serialization,
}

impl ErrorKind {
    /// True when the failure is caused by the caller's input rather than the
    /// environment.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidField
                | ErrorKind::MissingField
                | ErrorKind::NotFound
                | ErrorKind::DuplicateKey
                | ErrorKind::ReferenceNotFound
        )
    }
}

impl HbnbError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        HbnbError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        HbnbError::MissingField {
            field: field.to_string(),
        }
    }

    pub fn not_found(entity: EntityKind, id: &str) -> Self {
        HbnbError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn reference_not_found(entity: EntityKind, id: &str) -> Self {
        HbnbError::ReferenceNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HbnbError::InvalidField { .. } => ErrorKind::InvalidField,
            HbnbError::MissingField { .. } => ErrorKind::MissingField,
            HbnbError::NotFound { .. } => ErrorKind::NotFound,
            HbnbError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            HbnbError::ReferenceNotFound { .. } => ErrorKind::ReferenceNotFound,
            HbnbError::ConfigError { .. } => ErrorKind::Config,
            HbnbError::IoError(_) => ErrorKind::Io,
            HbnbError::SerializationError(_) => ErrorKind::Serialization,
        }
    }
}

pub type Result<T> = std::result::Result<T, HbnbError>;
