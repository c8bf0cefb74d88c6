use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bossfight_types::FightMessages;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::catalog::BossCatalog;
use crate::chat::ChatOutput;
use crate::messages::Narrator;
use crate::registry::FighterRegistry;

// ─────────────────────────────────────────────────────────────────────────────
// Phase
// ─────────────────────────────────────────────────────────────────────────────

/// Where the fight cycle is. Only the scheduler task writes this.
pub(crate) enum Phase {
    Cooldown {
        until: Instant,
    },
    Recruiting {
        registry: Arc<FighterRegistry>,
        closes_at: Instant,
        /// Catalog loaded when the window opened, used for tier-up notices
        preview: Option<Arc<BossCatalog>>,
    },
    Resolving {
        entrants: usize,
    },
    Stopped,
}

/// Phase name reported by [`CycleStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Cooldown,
    Recruiting,
    Resolving,
    Stopped,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseKind::Cooldown => "cooldown",
            PhaseKind::Recruiting => "recruiting",
            PhaseKind::Resolving => "resolving",
            PhaseKind::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Snapshot of the fight cycle for status commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStatus {
    pub phase: PhaseKind,
    /// Number of recruitment windows opened so far
    pub cycle: u64,
    pub entrants: usize,
    /// Time until the cooldown ends or the window closes
    pub remaining: Option<Duration>,
    pub game: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared State
// ─────────────────────────────────────────────────────────────────────────────

/// State shared between the scheduler task and its handles
pub(crate) struct SharedState {
    pub phase: RwLock<Phase>,
    pub game: RwLock<Option<String>>,
    pub cycle: AtomicU64,
    pub chat: Arc<dyn ChatOutput>,
    pub messages: FightMessages,
    pub currency_name: String,
}

impl SharedState {
    pub fn new(
        chat: Arc<dyn ChatOutput>,
        messages: FightMessages,
        currency_name: String,
        game: Option<String>,
    ) -> Self {
        Self {
            // Cooldown that is already over, so the first window opens at once
            phase: RwLock::new(Phase::Cooldown {
                until: Instant::now(),
            }),
            game: RwLock::new(game),
            cycle: AtomicU64::new(0),
            chat,
            messages,
            currency_name,
        }
    }

    pub fn narrator(&self) -> Narrator<'_> {
        Narrator::new(&self.messages, &self.currency_name)
    }

    pub fn announce(&self, text: &str) {
        self.chat.announce(text);
    }

    pub fn cycle(&self) -> u64 {
        self.cycle.load(Ordering::Relaxed)
    }

    pub async fn status(&self) -> CycleStatus {
        let now = Instant::now();
        let (phase, entrants, remaining) = match &*self.phase.read().await {
            Phase::Cooldown { until } => (
                PhaseKind::Cooldown,
                0,
                Some(until.saturating_duration_since(now)),
            ),
            Phase::Recruiting {
                registry,
                closes_at,
                ..
            } => (
                PhaseKind::Recruiting,
                registry.count(),
                Some(closes_at.saturating_duration_since(now)),
            ),
            Phase::Resolving { entrants } => (PhaseKind::Resolving, *entrants, None),
            Phase::Stopped => (PhaseKind::Stopped, 0, None),
        };

        CycleStatus {
            phase,
            cycle: self.cycle(),
            entrants,
            remaining,
            game: self.game.read().await.clone(),
        }
    }
}
