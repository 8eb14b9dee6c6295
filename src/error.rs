use std::path::PathBuf;

use thiserror::Error;

/// A single front-matter field that failed coercion
///
/// `field` is the path to the offending value, e.g. `servings` or
/// `ingredients[2].grams`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field \"{field}\" {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading the recipe archive
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Content directory or recipe file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recipe file is structurally malformed
    #[error("Failed to parse recipe '{slug}': {message}")]
    Parse { slug: String, message: String },

    /// A front-matter field has the wrong type or shape
    #[error("Invalid recipe '{slug}': {error}")]
    Validation {
        slug: String,
        #[source]
        error: FieldError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    /// The offending field path, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            RecipeError::Validation { error, .. } => Some(&error.field),
            _ => None,
        }
    }
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
