//! Boss catalog
//!
//! This module provides:
//! - **BossTier**: Immutable stat block of one boss, selected by party size
//! - **BossCatalog**: Validated, ordered tier table with tier selection
//! - **Loading**: Per-game catalogs read from TOML, plus a built-in table
//! - **CatalogSource**: Lookup seam used by the scheduler at resolution time

mod builtin;
mod definition;
mod error;
mod loader;

pub use builtin::builtin_catalog;
pub use definition::{BossCatalog, BossTier};
pub use error::CatalogError;
pub use loader::{
    CatalogFile, CatalogSource, DirectoryCatalog, StaticCatalog, game_slug, load_catalog_from_file,
};
