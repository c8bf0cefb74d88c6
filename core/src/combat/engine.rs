//! Turn-based boss combat
//!
//! Each turn every living fighter, in entry order, attacks the boss and then
//! takes the boss's counter-attack. The fight ends the moment the boss drops
//! to zero health or when the tier's turn limit runs out.

use crate::catalog::BossTier;
use crate::fighter::Fighter;

use super::FightRng;

/// One step of a fight. `fighter` indexes the entrant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    /// A fighter's attack. `damage` is 0 when dodged or too weak to hurt.
    FighterAttack { turn: u32, fighter: usize, damage: i32 },
    /// The boss's counter-attack. `damage` is 0 when dodged or blocked.
    BossAttack { turn: u32, fighter: usize, damage: i32 },
    FighterFell { turn: u32, fighter: usize },
    BossFell { turn: u32, fighter: usize },
}

impl CombatEvent {
    /// Entrant index the event concerns
    pub fn fighter(&self) -> usize {
        match *self {
            CombatEvent::FighterAttack { fighter, .. }
            | CombatEvent::BossAttack { fighter, .. }
            | CombatEvent::FighterFell { fighter, .. }
            | CombatEvent::BossFell { fighter, .. } => fighter,
        }
    }
}

/// Result of one resolved fight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatOutcome {
    pub boss_defeated: bool,
    /// Turns started, counting the one in which the boss fell
    pub turns_elapsed: u32,
    /// Boss health when the fight ended (zero or below when defeated)
    pub boss_health: i32,
    /// Every entrant with final health, in entry order
    pub fighters: Vec<Fighter>,
    /// Entrants still standing, in entry order
    pub survivors: Vec<Fighter>,
    /// Name of the fighter whose attack dropped the boss
    pub last_hit: Option<String>,
    pub log: Vec<CombatEvent>,
}

impl CombatOutcome {
    pub fn total_fighters(&self) -> usize {
        self.fighters.len()
    }

    pub fn survivor_count(&self) -> usize {
        self.survivors.len()
    }

    /// The boss outlasted the turn limit
    pub fn time_expired(&self) -> bool {
        !self.boss_defeated
    }
}

/// Resolve a fight between `boss` and `fighters` (in turn order).
///
/// Fighter health is mutated on a local copy only. With the same boss,
/// fighters and roll sequence the outcome is always identical.
pub fn resolve<R: FightRng + ?Sized>(
    boss: &BossTier,
    fighters: &[Fighter],
    rng: &mut R,
) -> CombatOutcome {
    let mut party = fighters.to_vec();
    let mut boss_health = boss.health;
    let mut last_hit: Option<usize> = None;
    let mut turns_elapsed = 0;
    let mut log = Vec::new();

    'turns: for turn in 0..boss.turn_limit {
        turns_elapsed = turn + 1;

        for (index, fighter) in party.iter_mut().enumerate() {
            if !fighter.stats.is_alive() {
                continue;
            }

            let roll = rng.roll_percent();
            let damage = fighter.stats.attack.saturating_sub(boss.defense);
            let damage = if roll >= boss.evasion && damage > 0 { damage } else { 0 };
            boss_health = boss_health.saturating_sub(damage);
            log.push(CombatEvent::FighterAttack {
                turn,
                fighter: index,
                damage,
            });

            if boss_health <= 0 {
                last_hit = Some(index);
                log.push(CombatEvent::BossFell {
                    turn,
                    fighter: index,
                });
                break 'turns;
            }

            let roll = rng.roll_percent();
            let damage = boss.attack.saturating_sub(fighter.stats.defense);
            let damage = if roll >= fighter.stats.evasion && damage > 0 { damage } else { 0 };
            fighter.stats.health = fighter.stats.health.saturating_sub(damage);
            log.push(CombatEvent::BossAttack {
                turn,
                fighter: index,
                damage,
            });

            if !fighter.stats.is_alive() {
                log.push(CombatEvent::FighterFell {
                    turn,
                    fighter: index,
                });
            }
        }
    }

    let boss_defeated = boss_health <= 0;
    let survivors: Vec<Fighter> = party
        .iter()
        .filter(|f| f.stats.is_alive())
        .cloned()
        .collect();

    tracing::debug!(
        boss = %boss.name,
        boss_defeated,
        turns_elapsed,
        survivors = survivors.len(),
        entrants = party.len(),
        "Combat resolved"
    );

    CombatOutcome {
        boss_defeated,
        turns_elapsed,
        boss_health,
        last_hit: last_hit.map(|i| party[i].name.clone()),
        survivors,
        fighters: party,
        log,
    }
}
