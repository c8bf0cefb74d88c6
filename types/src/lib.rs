//! Shared configuration types for the boss fight mini-game
//!
//! This crate contains serializable configuration types that are shared between
//! the fight engine (bossfight-core) and whatever hosts it (the CLI, a chat bot).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Chatter Roles & Fighter Classes
// ─────────────────────────────────────────────────────────────────────────────

/// Standing of a chatter in the channel. Each role maps to a fighter class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatterRole {
    #[default]
    Viewer,
    Follower,
    RegularFollower,
    Subscriber,
    Moderator,
}

impl ChatterRole {
    pub fn all() -> &'static [ChatterRole] {
        &[
            ChatterRole::Viewer,
            ChatterRole::Follower,
            ChatterRole::RegularFollower,
            ChatterRole::Subscriber,
            ChatterRole::Moderator,
        ]
    }

    /// Config/command name of the role (e.g. "regular_follower")
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatterRole::Viewer => "viewer",
            ChatterRole::Follower => "follower",
            ChatterRole::RegularFollower => "regular_follower",
            ChatterRole::Subscriber => "subscriber",
            ChatterRole::Moderator => "moderator",
        }
    }

    /// Parse a role name. Accepts `-` or `_` separators and any case.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == normalized)
    }
}

impl std::fmt::Display for ChatterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stat block of a fighter class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    pub attack: i32,
    pub defense: i32,
    /// Chance (0-100) to dodge the boss's counter-attack
    pub evasion: i32,
    pub health: i32,
}

impl ClassStats {
    pub const fn new(attack: i32, defense: i32, evasion: i32, health: i32) -> Self {
        Self {
            attack,
            defense,
            evasion,
            health,
        }
    }
}

/// Stat blocks for every chatter role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterClasses {
    #[serde(default = "default_viewer")]
    pub viewer: ClassStats,
    #[serde(default = "default_follower")]
    pub follower: ClassStats,
    #[serde(default = "default_regular_follower")]
    pub regular_follower: ClassStats,
    #[serde(default = "default_subscriber")]
    pub subscriber: ClassStats,
    #[serde(default = "default_moderator")]
    pub moderator: ClassStats,
}

fn default_viewer() -> ClassStats {
    ClassStats::new(25, 6, 35, 125)
}

fn default_follower() -> ClassStats {
    ClassStats::new(30, 9, 22, 180)
}

fn default_regular_follower() -> ClassStats {
    ClassStats::new(35, 13, 27, 250)
}

fn default_subscriber() -> ClassStats {
    ClassStats::new(20, 17, 25, 400)
}

fn default_moderator() -> ClassStats {
    ClassStats::new(50, 12, 40, 270)
}

impl Default for FighterClasses {
    fn default() -> Self {
        Self {
            viewer: default_viewer(),
            follower: default_follower(),
            regular_follower: default_regular_follower(),
            subscriber: default_subscriber(),
            moderator: default_moderator(),
        }
    }
}

impl FighterClasses {
    pub fn stats_for(&self, role: ChatterRole) -> ClassStats {
        match role {
            ChatterRole::Viewer => self.viewer,
            ChatterRole::Follower => self.follower,
            ChatterRole::RegularFollower => self.regular_follower,
            ChatterRole::Subscriber => self.subscriber,
            ChatterRole::Moderator => self.moderator,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fight Timing
// ─────────────────────────────────────────────────────────────────────────────

/// Timing and randomness settings for the fight cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightSettings {
    /// Time between the end of one fight and the next recruitment window
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Length of the recruitment window. An empty window re-arms.
    #[serde(default = "default_entry_window_secs")]
    pub entry_window_secs: u64,

    /// Pause between the fight start announcement and combat
    #[serde(default = "default_anticipation_secs")]
    pub anticipation_secs: u64,

    /// Fixed seed for combat rolls. Each cycle uses `seed + cycle number`.
    /// None draws a fresh seed from the OS for every fight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

fn default_cooldown_secs() -> u64 {
    600
}

fn default_entry_window_secs() -> u64 {
    60
}

fn default_anticipation_secs() -> u64 {
    5
}

impl Default for FightSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            entry_window_secs: default_entry_window_secs(),
            anticipation_secs: default_anticipation_secs(),
            rng_seed: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Announcement Templates
// ─────────────────────────────────────────────────────────────────────────────

/// Chat announcement templates. Placeholders are written as `{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightMessages {
    #[serde(default = "default_cooldown_over")]
    pub cooldown_over: String,
    /// `{boss}`
    #[serde(default = "default_game_start")]
    pub game_start: String,
    /// `{boss}`, `{next_boss}`
    #[serde(default = "default_next_level")]
    pub next_level: String,
    /// `{boss}`
    #[serde(default = "default_time_expired")]
    pub time_expired: String,
    /// `{user}`, `{boss}`
    #[serde(default = "default_solo_failure")]
    pub solo_failure: String,
    /// `{boss}`
    #[serde(default = "default_group_failure")]
    pub group_failure: String,
    /// `{user}`, `{boss}`, `{amount}`, `{currency}`
    #[serde(default = "default_solo_success")]
    pub solo_success: String,
    /// `{boss}`
    #[serde(default = "default_full_clear")]
    pub full_clear: String,
    /// `{boss}`
    #[serde(default = "default_majority_clear")]
    pub majority_clear: String,
    /// `{boss}`
    #[serde(default = "default_narrow_clear")]
    pub narrow_clear: String,
    #[serde(default = "default_results_prefix")]
    pub results_prefix: String,
    #[serde(default = "default_catalog_unavailable")]
    pub catalog_unavailable: String,
}

fn default_cooldown_over() -> String {
    "The lair stirs again. Type !raid to join the next boss fight!".to_string()
}

fn default_game_start() -> String {
    "The raid party storms the lair of {boss}. Steel yourselves...".to_string()
}

fn default_next_level() -> String {
    "The party has grown too large to go unnoticed. {boss} now awaits you, and {next_boss} watches from the shadows."
        .to_string()
}

fn default_time_expired() -> String {
    "It took too long to kill {boss}. Gas floods the room, killing the entire raid party.".to_string()
}

fn default_solo_failure() -> String {
    "{user} tried to take on {boss} alone and was never heard from again.".to_string()
}

fn default_group_failure() -> String {
    "{boss} crushed the entire raid party. Nobody made it out.".to_string()
}

fn default_solo_success() -> String {
    "{user} single-handedly slew {boss} and walks away with {amount} {currency}!".to_string()
}

fn default_full_clear() -> String {
    "{boss} has fallen and the whole raid party survived!".to_string()
}

fn default_majority_clear() -> String {
    "{boss} has fallen, but not without losses.".to_string()
}

fn default_narrow_clear() -> String {
    "{boss} has fallen. Only a handful of fighters crawled out of the lair.".to_string()
}

fn default_results_prefix() -> String {
    "Survivors:".to_string()
}

fn default_catalog_unavailable() -> String {
    "No boss answered the call this time. The raid party disbands.".to_string()
}

impl Default for FightMessages {
    fn default() -> Self {
        Self {
            cooldown_over: default_cooldown_over(),
            game_start: default_game_start(),
            next_level: default_next_level(),
            time_expired: default_time_expired(),
            solo_failure: default_solo_failure(),
            group_failure: default_group_failure(),
            solo_success: default_solo_success(),
            full_clear: default_full_clear(),
            majority_clear: default_majority_clear(),
            narrow_clear: default_narrow_clear(),
            results_prefix: default_results_prefix(),
            catalog_unavailable: default_catalog_unavailable(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration persisted by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fight: FightSettings,
    #[serde(default)]
    pub messages: FightMessages,
    #[serde(default)]
    pub classes: FighterClasses,

    /// Display name of the channel currency (e.g. "coins")
    #[serde(default = "default_currency_name")]
    pub currency_name: String,

    /// Directory holding per-game boss catalogs (`<game>.toml`, `default.toml`).
    /// Empty uses the built-in tier table.
    #[serde(default)]
    pub catalog_directory: String,

    /// Game the stream starts on, used to pick a boss catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
}

fn default_currency_name() -> String {
    "coins".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fight: FightSettings::default(),
            messages: FightMessages::default(),
            classes: FighterClasses::default(),
            currency_name: default_currency_name(),
            catalog_directory: String::new(),
            game: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name() {
        assert_eq!(ChatterRole::from_name("viewer"), Some(ChatterRole::Viewer));
        assert_eq!(
            ChatterRole::from_name("Regular-Follower"),
            Some(ChatterRole::RegularFollower)
        );
        assert_eq!(ChatterRole::from_name(" MODERATOR "), Some(ChatterRole::Moderator));
        assert_eq!(ChatterRole::from_name("broadcaster"), None);
    }

    #[test]
    fn test_stats_for_role() {
        let classes = FighterClasses::default();
        assert_eq!(classes.stats_for(ChatterRole::Subscriber).health, 400);
        assert_eq!(classes.stats_for(ChatterRole::Moderator).attack, 50);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            currency_name = "gems"

            [fight]
            cooldown_secs = 30

            [classes.viewer]
            attack = 1
            defense = 2
            evasion = 3
            health = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.currency_name, "gems");
        assert_eq!(config.fight.cooldown_secs, 30);
        assert_eq!(config.fight.entry_window_secs, 60);
        assert_eq!(config.fight.rng_seed, None);
        assert_eq!(config.classes.viewer, ClassStats::new(1, 2, 3, 4));
        assert_eq!(config.classes.moderator, ClassStats::new(50, 12, 40, 270));
        assert_eq!(config.messages, FightMessages::default());
    }
}
