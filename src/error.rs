//! Error handling for FQID humanization
//!
//! One umbrella error wraps the per-concern errors so callers can use `?`
//! across metadata lookups, configuration loading and boundary-data access.
//!
//! Provider declines and empty nodes are not errors; they never show up here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate
pub type HumanizeResult<T> = Result<T, HumanizeError>;

/// Main error type for humanization
#[derive(Error, Debug)]
pub enum HumanizeError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Boundary data error: {0}")]
    Topo(#[from] TopoError),
}

/// Errors raised by the metadata lookup collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// An exact relationship key matched more than one entity.
    ///
    /// The upstream metadata is corrupt; the request must stop here.
    #[error(
        "Data integrity violation: {found} '{related_type}:{related_code}' entities \
         hold relationships to '{entity_type}' (expected at most one)"
    )]
    DataIntegrity {
        entity_type: String,
        code: Option<String>,
        related_type: String,
        related_code: String,
        found: usize,
    },

    #[error("Metadata backend failure: {0}")]
    Backend(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Boundary-data (TopoJSON) errors
///
/// All of these are invalid-argument failures from the caller's point of view.
#[derive(Error, Debug)]
pub enum TopoError {
    #[error("Invalid database '{0}'")]
    InvalidDatabase(String),

    #[error("Invalid table '{table}' for database '{database}'")]
    InvalidTable { database: String, table: String },

    #[error("No boundary data configured for entity type '{0}'")]
    UnknownEntityType(String),

    #[error("Could not load TopoJson ({})", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Failed to read TopoJson {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TopoJson: {0}")]
    Parse(#[from] serde_json::Error),
}
