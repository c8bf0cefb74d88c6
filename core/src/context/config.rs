//! Application configuration
//!
//! This module re-exports shared types from bossfight-types and provides
//! persistence plus the catalog source the configuration selects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

// Re-export all shared types
pub use bossfight_types::{
    AppConfig, ChatterRole, ClassStats, FightMessages, FightSettings, FighterClasses,
};

use super::ConfigError;
use crate::catalog::{CatalogSource, DirectoryCatalog, StaticCatalog, builtin_catalog};

const APP_NAME: &str = "bossfight";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load from the platform config directory, falling back to defaults
    fn load() -> Self;
    fn load_path(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_path(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn validate(&self) -> Result<(), ConfigError>;
    /// Boss catalog source for `catalog_directory` (built-in table when empty)
    fn catalog_source(&self) -> Arc<dyn CatalogSource>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Self::default()
        })
    }

    fn load_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn save_path(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fight.entry_window_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "fight.entry_window_secs",
                reason: "must be at least 1",
            });
        }
        if self.currency_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "currency_name",
                reason: "cannot be empty",
            });
        }

        let classes = &self.classes;
        for (field, stats) in [
            ("classes.viewer", classes.viewer),
            ("classes.follower", classes.follower),
            ("classes.regular_follower", classes.regular_follower),
            ("classes.subscriber", classes.subscriber),
            ("classes.moderator", classes.moderator),
        ] {
            validate_class(field, stats)?;
        }
        Ok(())
    }

    fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        if self.catalog_directory.trim().is_empty() {
            Arc::new(StaticCatalog::new(builtin_catalog()))
        } else {
            Arc::new(DirectoryCatalog::new(self.catalog_directory.trim()))
        }
    }
}

fn validate_class(field: &'static str, stats: ClassStats) -> Result<(), ConfigError> {
    let reason = if !(0..=100).contains(&stats.evasion) {
        "evasion must be within 0..=100"
    } else if stats.health <= 0 {
        "health must be positive"
    } else if stats.attack < 0 || stats.defense < 0 {
        "attack and defense cannot be negative"
    } else {
        return Ok(());
    };
    Err(ConfigError::Invalid { field, reason })
}
