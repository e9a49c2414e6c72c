//! # Geometry Errors
//!
//! Error types for shape validation, solving and mesh generation.
//!
//! Malformed profiles are programmer errors and panic at construction
//! (see [`crate::profile::Profile::new`]); everything a caller can trigger
//! with bad input is reported here instead.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while validating or rebuilding a shape.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Invalid tolerance configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A shape dimension is negative, non-finite or out of range
    #[error("Invalid dimension: {message}")]
    InvalidDimension {
        /// Error description
        message: String,
    },

    /// Geometry collapsed to something that cannot be meshed
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Error description
        message: String,
    },

    /// Operation not defined for this shape family
    #[error("Unsupported: {message}")]
    Unsupported {
        /// Error description
        message: String,
    },
}

impl GeometryError {
    /// Creates an invalid dimension error.
    pub fn invalid_dimension(message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Rejects negative or non-finite dimensions.
pub(crate) fn require_non_negative(name: &str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_dimension(format!(
            "{name} must be a non-negative finite number: {value}"
        )))
    }
}

/// Rejects zero, negative or non-finite dimensions.
pub(crate) fn require_positive(name: &str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_dimension(format!(
            "{name} must be a positive finite number: {value}"
        )))
    }
}
