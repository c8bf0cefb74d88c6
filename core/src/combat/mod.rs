//! Combat resolution
//!
//! A fight is a pure function of the boss tier, the frozen entrant order and
//! a stream of percentile rolls. Nothing here touches shared state.

mod dice;
mod engine;

pub use dice::{FightRng, ScriptedRolls, SeededRoller};
pub use engine::{CombatEvent, CombatOutcome, resolve};
