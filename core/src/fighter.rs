//! Fighter types shared by the registry, combat and rewards

use bossfight_types::{ChatterRole, ClassStats};

/// Combat stats of one entrant. `health` is the only field that changes
/// during a fight, and only on the combat engine's private copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FighterStats {
    pub attack: i32,
    pub defense: i32,
    /// Chance (0-100) to dodge the boss's counter-attack
    pub evasion: i32,
    pub health: i32,
}

impl FighterStats {
    pub const fn new(attack: i32, defense: i32, evasion: i32, health: i32) -> Self {
        Self {
            attack,
            defense,
            evasion,
            health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl From<ClassStats> for FighterStats {
    fn from(stats: ClassStats) -> Self {
        Self::new(stats.attack, stats.defense, stats.evasion, stats.health)
    }
}

/// A chatter entered into the current fight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    /// Chat name as typed by the chatter
    pub name: String,
    pub stats: FighterStats,
    /// Class the stats were taken from. Not used by combat math.
    pub role: ChatterRole,
}

impl Fighter {
    pub fn new(name: impl Into<String>, stats: FighterStats, role: ChatterRole) -> Self {
        Self {
            name: name.into(),
            stats,
            role,
        }
    }

    /// Case-insensitive identity used for duplicate checks and ledger calls
    pub fn account(&self) -> String {
        account_key(&self.name)
    }
}

/// Normalized account name for a chatter
pub fn account_key(name: &str) -> String {
    name.trim().to_lowercase()
}
