//! Fight cycle scheduler
//!
//! One background task owns the cycle `Cooldown -> Recruiting -> Resolving
//! -> Cooldown`. It sleeps until the next deadline or until a command
//! arrives; chat handlers reach it only through a [`FightHandle`].

mod handle;
mod state;


use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use bossfight_types::AppConfig;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, sleep_until};

use crate::catalog::{BossCatalog, CatalogSource};
use crate::chat::ChatOutput;
use crate::combat::{SeededRoller, resolve};
use crate::ledger::Ledger;
use crate::registry::FighterRegistry;
use crate::rewards::settle;

pub use handle::{Admission, FightHandle};
pub use state::{CycleStatus, PhaseKind};
use state::{Phase, SharedState};

/// Messages sent to the scheduler from handles
#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    SetGame(Option<String>),
    Shutdown,
}

/// Drives fight cycles for the lifetime of the host
pub struct FightScheduler<L> {
    config: AppConfig,
    shared: Arc<SharedState>,
    ledger: L,
    catalog: Arc<dyn CatalogSource>,
    cmd_rx: mpsc::Receiver<SchedulerCommand>,
}

impl<L: Ledger> FightScheduler<L> {
    /// Create a scheduler and a handle to communicate with it.
    ///
    /// Nothing happens until [`FightScheduler::run`] is spawned.
    pub fn new(
        config: AppConfig,
        chat: Arc<dyn ChatOutput>,
        ledger: L,
        catalog: Arc<dyn CatalogSource>,
    ) -> (Self, FightHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let shared = Arc::new(SharedState::new(
            chat,
            config.messages.clone(),
            config.currency_name.clone(),
            config.game.clone(),
        ));

        let scheduler = Self {
            config,
            shared: Arc::clone(&shared),
            ledger,
            catalog,
            cmd_rx,
        };

        (scheduler, FightHandle { cmd_tx, shared })
    }

    fn cooldown(&self) -> Duration {
        Duration::from_secs(self.config.fight.cooldown_secs)
    }

    fn entry_window(&self) -> Duration {
        Duration::from_secs(self.config.fight.entry_window_secs)
    }

    fn anticipation(&self) -> Duration {
        Duration::from_secs(self.config.fight.anticipation_secs)
    }

    /// Run the cycle until shutdown or until every handle is dropped
    pub async fn run(mut self) {
        tracing::info!(
            cooldown_secs = self.config.fight.cooldown_secs,
            entry_window_secs = self.config.fight.entry_window_secs,
            game = ?self.config.game,
            "Boss fight scheduler started"
        );

        loop {
            let Some(wake_at) = self.next_deadline().await else {
                break;
            };

            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(SchedulerCommand::SetGame(game)) => self.set_game(game).await,
                    Some(SchedulerCommand::Shutdown) | None => break,
                },
                _ = sleep_until(wake_at) => self.advance(Instant::now()).await,
            }
        }

        *self.shared.phase.write().await = Phase::Stopped;
        tracing::info!(cycle = self.shared.cycle(), "Boss fight scheduler stopped");
    }

    async fn next_deadline(&self) -> Option<Instant> {
        match &*self.shared.phase.read().await {
            Phase::Cooldown { until } => Some(*until),
            Phase::Recruiting { closes_at, .. } => Some(*closes_at),
            Phase::Resolving { .. } | Phase::Stopped => None,
        }
    }

    async fn set_game(&mut self, game: Option<String>) {
        tracing::info!(?game, "Stream game changed");
        let fresh = self.load_preview(game.as_deref());
        *self.shared.game.write().await = game;

        // Tier-up notices follow the new game
        if let Phase::Recruiting { preview, .. } = &mut *self.shared.phase.write().await {
            *preview = fresh;
        }
    }

    fn load_preview(&self, game: Option<&str>) -> Option<Arc<BossCatalog>> {
        match self.catalog.boss_catalog(game) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                tracing::warn!(
                    cycle = self.shared.cycle(),
                    error = %e,
                    "Boss catalog unavailable, tier-up notices disabled"
                );
                None
            }
        }
    }

    /// Apply whatever transition is due at `now`
    async fn advance(&mut self, now: Instant) {
        let registry = {
            let mut phase = self.shared.phase.write().await;
            let registry = match &mut *phase {
                Phase::Cooldown { until } if now >= *until => None,
                Phase::Recruiting {
                    registry,
                    closes_at,
                    ..
                } if now >= *closes_at => {
                    if registry.count() == 0 {
                        *closes_at = now + self.entry_window();
                        tracing::debug!(cycle = self.shared.cycle(), "Nobody joined, window re-armed");
                        return;
                    }
                    Some(Arc::clone(registry))
                }
                _ => return,
            };

            // Joins hold the read lock, so none is mid-add while this is set
            if let Some(registry) = &registry {
                *phase = Phase::Resolving {
                    entrants: registry.count(),
                };
            }
            registry
        };

        match registry {
            Some(registry) => self.run_fight(registry).await,
            None => self.open_recruitment(now).await,
        }
    }

    async fn open_recruitment(&mut self, now: Instant) {
        let cycle = self.shared.cycle.fetch_add(1, Ordering::Relaxed) + 1;
        let game = self.shared.game.read().await.clone();

        let preview = self.load_preview(game.as_deref());

        *self.shared.phase.write().await = Phase::Recruiting {
            registry: Arc::new(FighterRegistry::new()),
            closes_at: now + self.entry_window(),
            preview,
        };

        self.shared.announce(&self.shared.narrator().cooldown_over());
        tracing::info!(cycle, ?game, "Recruitment window open");
    }

    async fn enter_cooldown(&mut self) {
        let until = Instant::now() + self.cooldown();
        *self.shared.phase.write().await = Phase::Cooldown { until };
        tracing::debug!(
            cycle = self.shared.cycle(),
            cooldown_secs = self.config.fight.cooldown_secs,
            "Cooldown started"
        );
    }

    fn roller(&self, cycle: u64) -> SeededRoller {
        match self.config.fight.rng_seed {
            Some(seed) => SeededRoller::new(seed.wrapping_add(cycle)),
            None => SeededRoller::from_entropy(),
        }
    }

    /// Close the window, fight, pay out and announce. Always ends in cooldown.
    async fn run_fight(&mut self, registry: Arc<FighterRegistry>) {
        let cycle = self.shared.cycle();
        let fighters = registry.close();
        let game = self.shared.game.read().await.clone();

        let catalog = match self.catalog.boss_catalog(game.as_deref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(
                    cycle,
                    error = %e,
                    ?game,
                    entrants = fighters.len(),
                    "Boss catalog unavailable, abandoning fight"
                );
                self.shared
                    .announce(&self.shared.narrator().catalog_unavailable());
                self.enter_cooldown().await;
                return;
            }
        };

        let boss = catalog.select(fighters.len());
        tracing::info!(
            cycle,
            boss = %boss.name,
            entrants = fighters.len(),
            "Boss fight starting"
        );
        self.shared.announce(&self.shared.narrator().game_start(boss));
        sleep(self.anticipation()).await;

        let mut rng = self.roller(cycle);
        let outcome = resolve(boss, &fighters, &mut rng);
        let report = settle(&self.ledger, boss, &outcome).await;

        let results = self.shared.narrator().outcome(boss, &outcome, &report);
        self.shared.announce(&results);
        tracing::info!(
            cycle,
            boss = %boss.name,
            verdict = ?report.verdict,
            defeated = report.verdict.boss_defeated(),
            turns = outcome.turns_elapsed,
            survivors = outcome.survivor_count(),
            paid = report.payouts.len(),
            failed = report.failures.len(),
            seed = rng.seed(),
            %results,
            "Boss fight resolved"
        );

        self.enter_cooldown().await;
    }
}
