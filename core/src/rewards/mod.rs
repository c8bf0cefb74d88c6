//! Reward settlement
//!
//! Turns a combat outcome into a verdict and per-survivor credits, then
//! applies the credits through the ledger one survivor at a time.

use crate::catalog::BossTier;
use crate::combat::CombatOutcome;
use crate::fighter::account_key;
use crate::ledger::{Ledger, LedgerError};

#[cfg(test)]
mod tests;

/// How the fight went, in the order the rules are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Boss alive when the turn limit ran out
    TimeExpired,
    /// Boss alive, a lone fighter entered
    SoloFailure,
    /// Boss alive, the whole party fell
    GroupFailure,
    /// A lone fighter entered and won
    SoloSuccess,
    /// Boss down, every entrant survived
    FullClear,
    /// Boss down, at least 34% survived
    MajorityClear,
    /// Boss down, under 34% survived
    NarrowClear,
}

impl Verdict {
    pub fn boss_defeated(&self) -> bool {
        matches!(
            self,
            Verdict::SoloSuccess | Verdict::FullClear | Verdict::MajorityClear | Verdict::NarrowClear
        )
    }
}

/// Survivors needed per 100 entrants for a majority clear
const MAJORITY_PERCENT: usize = 34;

/// Classify an outcome. Uses integer ratios so 34% is exact.
pub fn classify(boss: &BossTier, outcome: &CombatOutcome) -> Verdict {
    let total = outcome.total_fighters();
    let survivors = outcome.survivor_count();

    if !outcome.boss_defeated {
        return if outcome.turns_elapsed >= boss.turn_limit {
            Verdict::TimeExpired
        } else if total == 1 {
            Verdict::SoloFailure
        } else {
            Verdict::GroupFailure
        };
    }

    if survivors == 1 && total == 1 {
        Verdict::SoloSuccess
    } else if survivors == total {
        Verdict::FullClear
    } else if survivors * 100 >= total * MAJORITY_PERCENT {
        Verdict::MajorityClear
    } else if survivors > 0 {
        Verdict::NarrowClear
    } else {
        Verdict::GroupFailure
    }
}

/// Even share of `loot` per survivor, rounded up.
///
/// Rounding up means the party as a whole may receive slightly more than
/// `loot`, never less.
pub fn base_share(loot: i64, survivors: usize) -> i64 {
    if survivors == 0 {
        return 0;
    }
    let survivors = i64::try_from(survivors).unwrap_or(i64::MAX);
    loot / survivors + i64::from(loot % survivors > 0)
}

/// A single credit owed to a survivor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub name: String,
    pub amount: i64,
    pub last_hit: bool,
}

/// Verdict plus the credits it earns, before touching the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardPlan {
    pub verdict: Verdict,
    pub payouts: Vec<Payout>,
}

/// Work out who is owed what. Pure; see [`settle`] to apply it.
pub fn plan_rewards(boss: &BossTier, outcome: &CombatOutcome) -> RewardPlan {
    let verdict = classify(boss, outcome);

    let payouts = match verdict {
        Verdict::SoloSuccess => outcome
            .survivors
            .iter()
            .map(|fighter| Payout {
                name: fighter.name.clone(),
                amount: boss.loot,
                last_hit: outcome.last_hit.as_deref() == Some(fighter.name.as_str()),
            })
            .collect(),
        Verdict::FullClear | Verdict::MajorityClear | Verdict::NarrowClear => {
            let share = base_share(boss.loot, outcome.survivor_count());
            outcome
                .survivors
                .iter()
                .map(|fighter| {
                    let last_hit = outcome.last_hit.as_deref() == Some(fighter.name.as_str());
                    let bonus = if last_hit { boss.last_attack_bonus } else { 0 };
                    Payout {
                        name: fighter.name.clone(),
                        amount: share.saturating_add(bonus),
                        last_hit,
                    }
                })
                .collect()
        }
        Verdict::TimeExpired | Verdict::SoloFailure | Verdict::GroupFailure => Vec::new(),
    };

    RewardPlan { verdict, payouts }
}

/// What settlement actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    pub verdict: Verdict,
    /// Credits written to the ledger, in survivor order
    pub payouts: Vec<Payout>,
    /// Survivors whose credit was skipped
    pub failures: Vec<(String, LedgerError)>,
}

/// Plan rewards and apply them through `ledger`.
///
/// Each survivor is credited independently: a ledger failure is logged and
/// skipped, and never stops the remaining credits. Credits already applied
/// stay applied.
pub async fn settle<L: Ledger + ?Sized>(
    ledger: &L,
    boss: &BossTier,
    outcome: &CombatOutcome,
) -> SettlementReport {
    let plan = plan_rewards(boss, outcome);
    let mut payouts = Vec::with_capacity(plan.payouts.len());
    let mut failures = Vec::new();

    for payout in plan.payouts {
        match credit(ledger, &payout).await {
            Ok(new_balance) => {
                tracing::debug!(
                    fighter = %payout.name,
                    amount = payout.amount,
                    new_balance,
                    "Reward credited"
                );
                payouts.push(payout);
            }
            Err(e) => {
                tracing::warn!(
                    fighter = %payout.name,
                    amount = payout.amount,
                    error = %e,
                    "Skipping reward, ledger update failed"
                );
                failures.push((payout.name, e));
            }
        }
    }

    SettlementReport {
        verdict: plan.verdict,
        payouts,
        failures,
    }
}

async fn credit<L: Ledger + ?Sized>(ledger: &L, payout: &Payout) -> Result<i64, LedgerError> {
    let account = account_key(&payout.name);
    let balance = ledger
        .check_balance(&account)
        .await?
        .ok_or_else(|| LedgerError::NoAccount {
            user: account.clone(),
        })?;

    let new_balance = balance.saturating_add(payout.amount);
    ledger.update_funds(&account, new_balance).await?;
    Ok(new_balance)
}
