//! Domain-specific error types for composition-recommender
//!
//! The ranking pipeline itself never fails. Errors only come from the edges:
//! reading configuration and loading catalogs.

use thiserror::Error;

/// Main error type for the recommender
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl From<std::io::Error> for RecommenderError {
    fn from(err: std::io::Error) -> Self {
        RecommenderError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RecommenderError {
    fn from(err: serde_json::Error) -> Self {
        RecommenderError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RecommenderError {
    fn from(err: toml::de::Error) -> Self {
        RecommenderError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

/// Result type alias for recommender operations
pub type Result<T> = std::result::Result<T, RecommenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_label() {
        let err = RecommenderError::Validation {
            message: "max_items must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Validation error: max_items must be at least 1"
        );
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: RecommenderError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RecommenderError::Serialization { .. }));
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: RecommenderError = toml::from_str::<toml::Value>("= nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, RecommenderError::Config { .. }));
    }
}
