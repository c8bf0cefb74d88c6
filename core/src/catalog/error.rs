//! Error types for boss catalog operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or validating a boss catalog.
///
/// Any of these at tier-selection time abandons the current fight cycle.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read boss catalog {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse boss catalog TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no boss catalog for game {game:?} in {dir}")]
    NotFound { dir: PathBuf, game: Option<String> },

    #[error("boss catalog has no tiers")]
    Empty,

    #[error("boss tier '{name}' is listed twice")]
    DuplicateTier { name: String },

    #[error("boss tier '{name}' must allow more fighters than the tier before it ({previous})")]
    Unsorted { name: String, previous: usize },

    #[error("invalid boss tier '{name}': {reason}")]
    InvalidTier { name: String, reason: String },
}
