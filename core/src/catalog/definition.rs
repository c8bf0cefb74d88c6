//! Boss tier definition types
//!
//! Tiers are loaded once (from TOML or the built-in table) and shared
//! read-only by every fight cycle.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::CatalogError;

/// Upper bound for tier attack, defense and health
const MAX_TIER_STAT: i32 = 1_000_000;

/// Upper bound for tier loot and last-hit bonus
const MAX_TIER_LOOT: i64 = 1_000_000_000;

/// One boss configuration, chosen when the party size fits under `max_fighters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTier {
    /// Display name (e.g., "Cave Troll")
    pub name: String,

    pub attack: i32,
    pub defense: i32,
    /// Chance (0-100) to dodge a fighter's attack
    pub evasion: i32,
    pub health: i32,

    /// Number of full rounds before the raid party runs out of time
    pub turn_limit: u32,

    /// Currency split between survivors when the boss falls
    pub loot: i64,

    /// Extra currency for the fighter who lands the killing blow
    #[serde(default)]
    pub last_attack_bonus: i64,

    /// Largest party this tier is selected for
    pub max_fighters: usize,
}

impl BossTier {
    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidTier {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.turn_limit == 0 {
            return Err(invalid("turn_limit must be at least 1"));
        }
        if !(0..=100).contains(&self.evasion) {
            return Err(invalid("evasion must be within 0..=100"));
        }
        if !(1..=MAX_TIER_STAT).contains(&self.health) {
            return Err(invalid("health must be within 1..=1000000"));
        }
        if !(0..=MAX_TIER_STAT).contains(&self.attack)
            || !(0..=MAX_TIER_STAT).contains(&self.defense)
        {
            return Err(invalid("attack and defense must be within 0..=1000000"));
        }
        if !(0..=MAX_TIER_LOOT).contains(&self.loot)
            || !(0..=MAX_TIER_LOOT).contains(&self.last_attack_bonus)
        {
            return Err(invalid(
                "loot and last_attack_bonus must be within 0..=1000000000",
            ));
        }
        if self.max_fighters == 0 {
            return Err(invalid("max_fighters must be at least 1"));
        }
        Ok(())
    }
}

/// Ordered boss tier table.
///
/// Tiers are sorted by strictly ascending `max_fighters`. Construction
/// validates the table so lookups never fail afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossCatalog {
    tiers: Vec<BossTier>,
}

impl BossCatalog {
    pub fn new(tiers: Vec<BossTier>) -> Result<Self, CatalogError> {
        if tiers.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::with_capacity(tiers.len());
        let mut previous: Option<usize> = None;
        for tier in &tiers {
            tier.validate()?;

            if !names.insert(tier.name.to_lowercase()) {
                return Err(CatalogError::DuplicateTier {
                    name: tier.name.clone(),
                });
            }

            if let Some(previous) = previous
                && tier.max_fighters <= previous
            {
                return Err(CatalogError::Unsorted {
                    name: tier.name.clone(),
                    previous,
                });
            }
            previous = Some(tier.max_fighters);
        }

        Ok(Self { tiers })
    }

    /// Wrap a table already known to pass [`BossCatalog::new`] validation
    pub(super) fn from_validated(tiers: Vec<BossTier>) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &[BossTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Index of the tier for a party of `fighter_count`: the smallest tier
    /// whose threshold covers the party, else the largest tier.
    pub fn tier_index_for(&self, fighter_count: usize) -> usize {
        self.tiers
            .iter()
            .position(|tier| fighter_count <= tier.max_fighters)
            .unwrap_or(self.tiers.len() - 1)
    }

    /// Boss selected for a party of `fighter_count`
    pub fn select(&self, fighter_count: usize) -> &BossTier {
        &self.tiers[self.tier_index_for(fighter_count)]
    }

    /// When `fighter_count` is exactly one past a tier's threshold the party
    /// has just been promoted to the next boss. Returns that boss and the
    /// one after it, if any.
    pub fn promotion_at(&self, fighter_count: usize) -> Option<(&BossTier, Option<&BossTier>)> {
        let index = self
            .tiers
            .iter()
            .position(|tier| tier.max_fighters + 1 == fighter_count)?;
        let promoted = self.tiers.get(index + 1)?;
        Some((promoted, self.tiers.get(index + 2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(name: &str, max_fighters: usize) -> BossTier {
        BossTier {
            name: name.to_string(),
            attack: 20,
            defense: 5,
            evasion: 10,
            health: 100,
            turn_limit: 10,
            loot: 100,
            last_attack_bonus: 10,
            max_fighters,
        }
    }

    fn three_tiers() -> BossCatalog {
        BossCatalog::new(vec![tier("Imp", 3), tier("Ogre", 6), tier("Dragon", 10)]).unwrap()
    }

    #[test]
    fn test_select_smallest_covering_tier() {
        let catalog = three_tiers();
        assert_eq!(catalog.select(1).name, "Imp");
        assert_eq!(catalog.select(3).name, "Imp");
        assert_eq!(catalog.select(4).name, "Ogre");
        assert_eq!(catalog.select(10).name, "Dragon");
    }

    #[test]
    fn test_select_overflow_uses_largest_tier() {
        let catalog = three_tiers();
        assert_eq!(catalog.select(11).name, "Dragon");
        assert_eq!(catalog.select(500).name, "Dragon");
    }

    #[test]
    fn test_promotion_at_threshold_plus_one() {
        let catalog = three_tiers();

        let (boss, next) = catalog.promotion_at(4).unwrap();
        assert_eq!(boss.name, "Ogre");
        assert_eq!(next.map(|t| t.name.as_str()), Some("Dragon"));

        let (boss, next) = catalog.promotion_at(7).unwrap();
        assert_eq!(boss.name, "Dragon");
        assert!(next.is_none());

        assert!(catalog.promotion_at(5).is_none());
        // Past the last tier there is nothing to be promoted to
        assert!(catalog.promotion_at(11).is_none());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(BossCatalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_unsorted_catalog_rejected() {
        let result = BossCatalog::new(vec![tier("Ogre", 6), tier("Imp", 3)]);
        assert!(matches!(result, Err(CatalogError::Unsorted { previous: 6, .. })));

        let result = BossCatalog::new(vec![tier("Imp", 3), tier("Ogre", 3)]);
        assert!(matches!(result, Err(CatalogError::Unsorted { .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = BossCatalog::new(vec![tier("Imp", 3), tier("imp", 6)]);
        assert!(matches!(result, Err(CatalogError::DuplicateTier { .. })));
    }

    #[test]
    fn test_invalid_tier_rejected() {
        let mut bad = tier("Imp", 3);
        bad.turn_limit = 0;
        assert!(matches!(
            BossCatalog::new(vec![bad]),
            Err(CatalogError::InvalidTier { .. })
        ));

        let mut bad = tier("Imp", 3);
        bad.evasion = 101;
        assert!(matches!(
            BossCatalog::new(vec![bad]),
            Err(CatalogError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_out_of_range_stats_rejected() {
        let mut bad = tier("Imp", 3);
        bad.defense = i32::MIN;
        assert!(matches!(
            BossCatalog::new(vec![bad]),
            Err(CatalogError::InvalidTier { .. })
        ));

        let mut bad = tier("Imp", 3);
        bad.attack = -1;
        assert!(matches!(
            BossCatalog::new(vec![bad]),
            Err(CatalogError::InvalidTier { .. })
        ));

        let mut bad = tier("Imp", 3);
        bad.loot = i64::MAX;
        assert!(matches!(
            BossCatalog::new(vec![bad]),
            Err(CatalogError::InvalidTier { .. })
        ));

        let mut edge = tier("Imp", 3);
        edge.defense = 0;
        edge.loot = MAX_TIER_LOOT;
        assert!(BossCatalog::new(vec![edge]).is_ok());
    }
}
