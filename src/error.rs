use thiserror::Error;

use crate::models::ValidationErrors;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors raised by the record store and surfaced by the API.
#[derive(Error, Debug)]
pub enum PropertyError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Property not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PropertyError>;
