//! Built-in boss tier table, used when no catalog directory is configured.

use super::{BossCatalog, BossTier};

struct TierData {
    name: &'static str,
    attack: i32,
    defense: i32,
    evasion: i32,
    health: i32,
    turn_limit: u32,
    loot: i64,
    last_attack_bonus: i64,
    max_fighters: usize,
}

static BUILTIN_TIERS: &[TierData] = &[
    TierData {
        name: "Bandit Chieftain",
        attack: 35,
        defense: 5,
        evasion: 15,
        health: 400,
        turn_limit: 20,
        loot: 500,
        last_attack_bonus: 50,
        max_fighters: 5,
    },
    TierData {
        name: "Cave Troll",
        attack: 45,
        defense: 8,
        evasion: 10,
        health: 1500,
        turn_limit: 20,
        loot: 1500,
        last_attack_bonus: 100,
        max_fighters: 10,
    },
    TierData {
        name: "Lich Queen",
        attack: 55,
        defense: 10,
        evasion: 25,
        health: 3500,
        turn_limit: 20,
        loot: 3500,
        last_attack_bonus: 250,
        max_fighters: 20,
    },
    TierData {
        name: "Ancient Hydra",
        attack: 65,
        defense: 12,
        evasion: 20,
        health: 8000,
        turn_limit: 25,
        loot: 7500,
        last_attack_bonus: 500,
        max_fighters: 40,
    },
    TierData {
        name: "Void Dragon",
        attack: 80,
        defense: 14,
        evasion: 30,
        health: 20000,
        turn_limit: 30,
        loot: 20000,
        last_attack_bonus: 1000,
        max_fighters: 100,
    },
];

/// The built-in five-tier catalog
pub fn builtin_catalog() -> BossCatalog {
    let tiers = BUILTIN_TIERS
        .iter()
        .map(|data| BossTier {
            name: data.name.to_string(),
            attack: data.attack,
            defense: data.defense,
            evasion: data.evasion,
            health: data.health,
            turn_limit: data.turn_limit,
            loot: data.loot,
            last_attack_bonus: data.last_attack_bonus,
            max_fighters: data.max_fighters,
        })
        .collect();

    BossCatalog::from_validated(tiers)
}
