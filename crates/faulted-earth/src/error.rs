//! Error types for Faulted Earth
//!
//! ## Table of Contents
//! - **FaultError**: Construction failures raised by the model (fail-fast)
//! - **ImportError**: Failures raised while reading manifests and GeoJSON layers
//! - **Result**: Type alias for `Result<T, FaultError>`

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model construction
pub type Result<T> = std::result::Result<T, FaultError>;

/// Errors raised while building uncertain values, observations, sections and faults
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaultError {
    /// An uncertainty tuple does not have the arity the field expects
    #[error("shape error: `{field}` expects a tuple of {expected} values, got {found}")]
    Shape {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Minimum bound exceeds (or cannot be ordered against) the maximum bound
    #[error("range error: `{field}` minimum {minimum} {relation} maximum {maximum}")]
    Range {
        field: String,
        minimum: String,
        maximum: String,
        /// "is greater than" or "cannot be ordered against"
        relation: &'static str,
    },

    /// A field received a value of the wrong shape (e.g. a plain value where
    /// an uncertainty envelope is required)
    #[error("type constraint: `{field}` requires {expected}, got {found}")]
    TypeConstraint {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A schema key is absent from the attribute mapping
    #[error("missing field: `{0}` is absent from the attribute mapping")]
    MissingField(String),

    /// A location has the wrong geometry kind for the record
    #[error("geometry error: `{id}` requires a {expected} location, got {found}")]
    Geometry {
        id: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An observation points at a different section than the one holding it
    #[error(
        "cross-reference error: observation `{observation}` references section `{referenced}`, \
         but is attached to `{section}`"
    )]
    CrossReference {
        section: String,
        observation: String,
        referenced: String,
    },

    /// A fault must be assembled from at least one section
    #[error("fault `{0}` has no sections")]
    EmptyFault(String),
}

impl FaultError {
    /// Create a missing-field error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField(key.into())
    }

    /// Create a type-constraint error for a field that requires an envelope
    pub fn type_constraint(field: impl Into<String>, found: impl std::fmt::Display) -> Self {
        Self::expected(field, "an uncertain value", found)
    }

    /// Create a type-constraint error naming what the field accepts
    pub fn expected(
        field: impl Into<String>,
        expected: &'static str,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::TypeConstraint {
            field: field.into(),
            expected,
            found: found.to_string(),
        }
    }
}

/// Errors from loading fault manifests and GeoJSON observation layers
#[derive(Error, Debug)]
pub enum ImportError {
    /// File I/O error
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    /// GeoJSON / JSON parse error
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, String),

    /// Manifest TOML parse error
    #[error("failed to parse manifest {}: {}", .0.display(), .1)]
    Config(PathBuf, #[source] toml::de::Error),

    /// A single feature could not be turned into a record
    #[error("feature {} in {}: {}", .index, .path.display(), .source)]
    Feature {
        path: PathBuf,
        index: usize,
        #[source]
        source: FaultError,
    },

    /// Section or fault assembly failed
    #[error(transparent)]
    Fault(#[from] FaultError),
}
