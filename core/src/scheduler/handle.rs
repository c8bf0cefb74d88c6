use std::sync::Arc;

use bossfight_types::ChatterRole;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::state::{CycleStatus, Phase, SharedState};
use super::SchedulerCommand;
use crate::fighter::{Fighter, FighterStats};
use crate::registry::JoinRejection;

/// Accepted join request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// 1-based turn order of the new fighter
    pub position: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Fight Handle (for chat command handlers)
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to enter fighters and query the fight cycle
#[derive(Clone)]
pub struct FightHandle {
    pub(super) cmd_tx: mpsc::Sender<SchedulerCommand>,
    pub(super) shared: Arc<SharedState>,
}

impl FightHandle {
    /// Enter `name` into the open recruitment window.
    ///
    /// Safe to call from many tasks at once. Announces a tier-up when this
    /// entrant pushes the party past a boss tier's threshold.
    pub async fn try_join(
        &self,
        name: &str,
        stats: FighterStats,
        role: ChatterRole,
    ) -> Result<Admission, JoinRejection> {
        // Held across the add so the scheduler cannot switch phase mid-join
        let phase = self.shared.phase.read().await;

        match &*phase {
            Phase::Cooldown { until } => Err(JoinRejection::OnCooldown {
                remaining: until.saturating_duration_since(Instant::now()),
            }),
            Phase::Resolving { .. } => Err(JoinRejection::WindowClosed),
            Phase::Stopped => Err(JoinRejection::Stopped),
            Phase::Recruiting {
                registry, preview, ..
            } => {
                let position = registry.add(Fighter::new(name.trim(), stats, role))?;
                tracing::debug!(
                    cycle = self.shared.cycle(),
                    fighter = name.trim(),
                    %role,
                    position,
                    "Fighter joined"
                );

                if let Some(catalog) = preview
                    && let Some((boss, next)) = catalog.promotion_at(position)
                {
                    tracing::info!(
                        cycle = self.shared.cycle(),
                        boss = %boss.name,
                        entrants = position,
                        "Party outgrew its boss tier"
                    );
                    self.shared
                        .announce(&self.shared.narrator().next_level(boss, next));
                }

                Ok(Admission { position })
            }
        }
    }

    pub async fn status(&self) -> CycleStatus {
        self.shared.status().await
    }

    /// Switch the stream game. Applies from the next catalog lookup.
    pub async fn set_game(&self, game: Option<String>) -> Result<(), String> {
        self.cmd_tx
            .send(SchedulerCommand::SetGame(game))
            .await
            .map_err(|e| e.to_string())
    }

    /// Stop the scheduler once any fight in progress has been settled
    pub async fn shutdown(&self) -> Result<(), String> {
        self.cmd_tx
            .send(SchedulerCommand::Shutdown)
            .await
            .map_err(|e| e.to_string())
    }
}
