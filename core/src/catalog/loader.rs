//! Boss catalog loading
//!
//! Catalogs are TOML files holding repeated `[[tier]]` tables:
//! ```toml
//! [[tier]]
//! name = "Bandit Chieftain"
//! attack = 35
//! defense = 5
//! evasion = 15
//! health = 400
//! turn_limit = 20
//! loot = 500
//! last_attack_bonus = 50
//! max_fighters = 5
//! ```
//!
//! A catalog directory holds one file per stream game (`<game-slug>.toml`)
//! and a `default.toml` used for any game without its own file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BossCatalog, BossTier, CatalogError};

/// Root structure of a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "tier")]
    pub tiers: Vec<BossTier>,
}

/// Load and validate a catalog from a single TOML file
pub fn load_catalog_from_file(path: &Path) -> Result<BossCatalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file: CatalogFile = toml::from_str(&content).map_err(|source| CatalogError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    BossCatalog::new(file.tiers)
}

/// File stem for a game title: lowercase alphanumerics joined by `_`
/// (e.g. "Dark Souls III" -> "dark_souls_iii").
pub fn game_slug(game: &str) -> String {
    game.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog Sources
// ─────────────────────────────────────────────────────────────────────────────

/// Supplies the boss tier table for the current stream game.
///
/// Called by the scheduler once per fight, at the moment the recruitment
/// window closes. An error abandons that fight only.
pub trait CatalogSource: Send + Sync {
    fn boss_catalog(&self, game: Option<&str>) -> Result<Arc<BossCatalog>, CatalogError>;
}

/// The same catalog for every game
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Arc<BossCatalog>,
}

impl StaticCatalog {
    pub fn new(catalog: BossCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn boss_catalog(&self, _game: Option<&str>) -> Result<Arc<BossCatalog>, CatalogError> {
        Ok(Arc::clone(&self.catalog))
    }
}

/// Per-game catalogs read from a directory.
///
/// Files are re-read on every lookup so edits apply from the next fight.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub const DEFAULT_FILE: &'static str = "default.toml";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that would be used for `game`, if any exists
    pub fn resolve_path(&self, game: Option<&str>) -> Option<PathBuf> {
        let game_file = game
            .map(game_slug)
            .filter(|slug| !slug.is_empty())
            .map(|slug| self.dir.join(format!("{slug}.toml")));

        game_file
            .into_iter()
            .chain(std::iter::once(self.dir.join(Self::DEFAULT_FILE)))
            .find(|path| path.is_file())
    }
}

impl CatalogSource for DirectoryCatalog {
    fn boss_catalog(&self, game: Option<&str>) -> Result<Arc<BossCatalog>, CatalogError> {
        let path = self
            .resolve_path(game)
            .ok_or_else(|| CatalogError::NotFound {
                dir: self.dir.clone(),
                game: game.map(String::from),
            })?;

        tracing::debug!(path = %path.display(), ?game, "Loading boss catalog");
        load_catalog_from_file(&path).map(Arc::new)
    }
}
