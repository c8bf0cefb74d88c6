use bossfight_types::ChatterRole;
use proptest::prelude::*;

use super::*;
use crate::combat::{ScriptedRolls, resolve};
use crate::fighter::{Fighter, FighterStats};
use crate::ledger::MemoryLedger;

fn boss(loot: i64, last_attack_bonus: i64, turn_limit: u32) -> BossTier {
    BossTier {
        name: "Test Boss".to_string(),
        attack: 20,
        defense: 5,
        evasion: 0,
        health: 100,
        turn_limit,
        loot,
        last_attack_bonus,
        max_fighters: 10,
    }
}

fn fighter(name: &str, health: i32) -> Fighter {
    Fighter::new(name, FighterStats::new(30, 5, 0, health), ChatterRole::Viewer)
}

/// Defeated outcome with `survivors` of `total` fighters standing
fn cleared(total: usize, survivors: usize, last_hit: Option<&str>) -> CombatOutcome {
    let fighters: Vec<Fighter> = (0..total)
        .map(|i| fighter(&format!("f{i}"), if i < survivors { 50 } else { 0 }))
        .collect();
    CombatOutcome {
        boss_defeated: true,
        turns_elapsed: 3,
        boss_health: 0,
        survivors: fighters[..survivors].to_vec(),
        fighters,
        last_hit: last_hit.map(String::from),
        log: Vec::new(),
    }
}

fn failed(total: usize, turns_elapsed: u32) -> CombatOutcome {
    let fighters: Vec<Fighter> = (0..total).map(|i| fighter(&format!("f{i}"), 0)).collect();
    CombatOutcome {
        boss_defeated: false,
        turns_elapsed,
        boss_health: 40,
        survivors: Vec::new(),
        fighters,
        last_hit: None,
        log: Vec::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_classify_failures() {
    let boss = boss(100, 0, 10);
    assert_eq!(classify(&boss, &failed(3, 10)), Verdict::TimeExpired);
    assert_eq!(classify(&boss, &failed(1, 4)), Verdict::SoloFailure);
    assert_eq!(classify(&boss, &failed(3, 4)), Verdict::GroupFailure);
    // Time expiry wins over the solo rule
    assert_eq!(classify(&boss, &failed(1, 10)), Verdict::TimeExpired);
}

#[test]
fn test_classify_clears() {
    let boss = boss(100, 0, 10);
    assert_eq!(classify(&boss, &cleared(1, 1, Some("f0"))), Verdict::SoloSuccess);
    assert_eq!(classify(&boss, &cleared(4, 4, Some("f0"))), Verdict::FullClear);
    assert_eq!(classify(&boss, &cleared(3, 2, Some("f0"))), Verdict::MajorityClear);
    assert_eq!(classify(&boss, &cleared(3, 1, Some("f0"))), Verdict::NarrowClear);
}

#[test]
fn test_boss_defeated_matches_clear_verdicts() {
    let boss = boss(100, 0, 10);
    assert!(classify(&boss, &cleared(1, 1, Some("f0"))).boss_defeated());
    assert!(classify(&boss, &cleared(3, 1, Some("f0"))).boss_defeated());
    assert!(!classify(&boss, &failed(3, 10)).boss_defeated());
    assert!(!classify(&boss, &failed(1, 4)).boss_defeated());
}

#[test]
fn test_ratio_boundaries() {
    let boss = boss(100, 0, 10);
    assert_eq!(classify(&boss, &cleared(100, 34, Some("f0"))), Verdict::MajorityClear);
    assert_eq!(classify(&boss, &cleared(100, 33, Some("f0"))), Verdict::NarrowClear);
    assert_eq!(classify(&boss, &cleared(50, 17, Some("f0"))), Verdict::MajorityClear);
}

// ─────────────────────────────────────────────────────────────────────────────
// Planning
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_base_share_rounds_up() {
    assert_eq!(base_share(100, 3), 34);
    assert_eq!(base_share(100, 4), 25);
    assert_eq!(base_share(1, 7), 1);
    assert_eq!(base_share(0, 3), 0);
    assert_eq!(base_share(100, 0), 0);
    assert_eq!(base_share(i64::MAX, 2), i64::MAX / 2 + 1);
}

#[test]
fn test_last_hit_bonus_goes_to_killer_only() {
    let boss = boss(100, 40, 10);
    let plan = plan_rewards(&boss, &cleared(3, 3, Some("f1")));

    assert_eq!(plan.verdict, Verdict::FullClear);
    let amounts: Vec<_> = plan.payouts.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, [34, 74, 34]);
    assert!(plan.payouts[1].last_hit);
    assert!(!plan.payouts[0].last_hit);
}

#[test]
fn test_solo_success_takes_undivided_loot() {
    let boss = boss(100, 40, 10);
    let plan = plan_rewards(&boss, &cleared(1, 1, Some("f0")));

    assert_eq!(plan.verdict, Verdict::SoloSuccess);
    assert_eq!(
        plan.payouts,
        [Payout {
            name: "f0".to_string(),
            amount: 100,
            last_hit: true,
        }]
    );
}

#[test]
fn test_failures_pay_nothing() {
    let boss = boss(100, 40, 10);
    assert!(plan_rewards(&boss, &failed(3, 10)).payouts.is_empty());
    assert!(plan_rewards(&boss, &failed(1, 2)).payouts.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Settlement
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_solo_fighter_scenario_pays_full_loot() {
    let boss = boss(100, 0, 10);
    let ledger = MemoryLedger::new();
    ledger.open_account("alice", 5);

    let party = [Fighter::new(
        "Alice",
        FighterStats::new(30, 5, 100, 200),
        ChatterRole::Viewer,
    )];
    let outcome = resolve(&boss, &party, &mut ScriptedRolls::always(50));
    let report = settle(&ledger, &boss, &outcome).await;

    assert_eq!(report.verdict, Verdict::SoloSuccess);
    assert_eq!(report.payouts.len(), 1);
    assert!(report.failures.is_empty());
    assert_eq!(ledger.balance("alice"), Some(105));
}

#[tokio::test]
async fn test_time_expired_issues_no_deltas() {
    let boss = boss(100, 0, 1);
    let ledger = MemoryLedger::new();
    ledger.open_account("alice", 5);

    let party = [fighter("alice", 200)];
    let outcome = resolve(&boss, &party, &mut ScriptedRolls::always(100));
    let report = settle(&ledger, &boss, &outcome).await;

    assert_eq!(report.verdict, Verdict::TimeExpired);
    assert!(report.payouts.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(ledger.balance("alice"), Some(5));
}

#[tokio::test]
async fn test_ledger_failure_does_not_stop_others() {
    let boss = boss(90, 0, 10);
    let ledger = MemoryLedger::new();
    for name in ["f0", "f1", "f2"] {
        ledger.open_account(name, 10);
    }
    ledger.set_unavailable("f1", true);

    let report = settle(&ledger, &boss, &cleared(3, 3, Some("f2"))).await;

    assert_eq!(report.verdict, Verdict::FullClear);
    let paid: Vec<_> = report.payouts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(paid, ["f0", "f2"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "f1");
    assert!(matches!(report.failures[0].1, LedgerError::Unavailable { .. }));

    assert_eq!(ledger.balance("f0"), Some(40));
    assert_eq!(ledger.balance("f1"), Some(10));
    assert_eq!(ledger.balance("f2"), Some(40));
}

#[tokio::test]
async fn test_missing_account_is_skipped() {
    let boss = boss(100, 0, 10);
    let ledger = MemoryLedger::new();
    ledger.open_account("f0", 0);

    let report = settle(&ledger, &boss, &cleared(2, 2, Some("f0"))).await;

    assert_eq!(report.payouts.len(), 1);
    assert_eq!(
        report.failures,
        [(
            "f1".to_string(),
            LedgerError::NoAccount {
                user: "f1".to_string()
            }
        )]
    );
    assert_eq!(ledger.balance("f0"), Some(50));
}

#[tokio::test]
async fn test_ledger_calls_use_lowercase_account() {
    let boss = boss(100, 0, 10);
    let ledger = MemoryLedger::new();
    ledger.open_account("streamfan", 1);

    let mut outcome = cleared(1, 1, Some("StreamFan"));
    outcome.fighters[0].name = "StreamFan".to_string();
    outcome.survivors[0].name = "StreamFan".to_string();

    let report = settle(&ledger, &boss, &outcome).await;

    assert_eq!(report.payouts[0].name, "StreamFan");
    assert_eq!(ledger.balance("streamfan"), Some(101));
}

proptest! {
    #[test]
    fn prop_ceiling_share_never_under_allocates(loot in 0..1_000_000i64, survivors in 1..500usize) {
        let total = base_share(loot, survivors) * survivors as i64;
        prop_assert!(total >= loot);
        prop_assert!(total < loot + survivors as i64);
    }
}
