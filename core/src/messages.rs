//! Announcement text
//!
//! Templates come from [`FightMessages`] and use `{name}` placeholders.
//! Unknown placeholders are left in place.

use bossfight_types::FightMessages;

use crate::catalog::BossTier;
use crate::combat::CombatOutcome;
use crate::rewards::{Payout, SettlementReport, Verdict};

/// Substitute each `{key}` in `template` with its value
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

/// Results list appended to clear announcements,
/// e.g. `Survivors: alice (34 coins), bob (74 coins)`
pub fn results_list(prefix: &str, payouts: &[Payout], currency: &str) -> String {
    let entries: Vec<String> = payouts
        .iter()
        .map(|p| format!(" {} ({} {})", p.name, p.amount, currency))
        .collect();
    format!("{prefix}{}", entries.join(","))
}

/// Builds every announcement the scheduler sends
#[derive(Debug, Clone)]
pub struct Narrator<'a> {
    messages: &'a FightMessages,
    currency: &'a str,
}

impl<'a> Narrator<'a> {
    pub fn new(messages: &'a FightMessages, currency: &'a str) -> Self {
        Self { messages, currency }
    }

    pub fn cooldown_over(&self) -> String {
        self.messages.cooldown_over.clone()
    }

    pub fn game_start(&self, boss: &BossTier) -> String {
        render(&self.messages.game_start, &[("boss", boss.name.as_str())])
    }

    pub fn next_level(&self, boss: &BossTier, next: Option<&BossTier>) -> String {
        let next_boss = next.map(|t| t.name.as_str()).unwrap_or_default();
        render(
            &self.messages.next_level,
            &[("boss", boss.name.as_str()), ("next_boss", next_boss)],
        )
    }

    pub fn catalog_unavailable(&self) -> String {
        self.messages.catalog_unavailable.clone()
    }

    /// Closing announcement for a resolved fight
    pub fn outcome(
        &self,
        boss: &BossTier,
        outcome: &CombatOutcome,
        report: &SettlementReport,
    ) -> String {
        let m = self.messages;
        let boss_name = boss.name.as_str();
        let first_fighter = outcome
            .fighters
            .first()
            .map(|f| f.name.as_str())
            .unwrap_or_default();

        let with_results = |template: &str| {
            format!(
                "{} {}",
                render(template, &[("boss", boss_name)]),
                results_list(&m.results_prefix, &report.payouts, self.currency)
            )
        };

        match report.verdict {
            Verdict::TimeExpired => render(&m.time_expired, &[("boss", boss_name)]),
            Verdict::SoloFailure => render(
                &m.solo_failure,
                &[("user", first_fighter), ("boss", boss_name)],
            ),
            Verdict::GroupFailure => render(&m.group_failure, &[("boss", boss_name)]),
            Verdict::SoloSuccess => {
                let amount = boss.loot.to_string();
                render(
                    &m.solo_success,
                    &[
                        ("user", first_fighter),
                        ("boss", boss_name),
                        ("amount", amount.as_str()),
                        ("currency", self.currency),
                    ],
                )
            }
            Verdict::FullClear => with_results(&m.full_clear),
            Verdict::MajorityClear => with_results(&m.majority_clear),
            Verdict::NarrowClear => with_results(&m.narrow_clear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fighter::{Fighter, FighterStats};
    use bossfight_types::ChatterRole;

    fn boss() -> BossTier {
        BossTier {
            name: "Cave Troll".to_string(),
            attack: 20,
            defense: 5,
            evasion: 0,
            health: 100,
            turn_limit: 10,
            loot: 300,
            last_attack_bonus: 25,
            max_fighters: 10,
        }
    }

    fn outcome(names: &[&str], defeated: bool) -> CombatOutcome {
        let fighters: Vec<Fighter> = names
            .iter()
            .map(|n| Fighter::new(*n, FighterStats::new(1, 1, 1, 10), ChatterRole::Viewer))
            .collect();
        CombatOutcome {
            boss_defeated: defeated,
            turns_elapsed: 2,
            boss_health: if defeated { 0 } else { 50 },
            survivors: fighters.clone(),
            fighters,
            last_hit: None,
            log: Vec::new(),
        }
    }

    fn report(verdict: Verdict, payouts: &[(&str, i64)]) -> SettlementReport {
        SettlementReport {
            verdict,
            payouts: payouts
                .iter()
                .map(|(name, amount)| Payout {
                    name: name.to_string(),
                    amount: *amount,
                    last_hit: false,
                })
                .collect(),
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        assert_eq!(
            render("{boss} vs {user}, {boss} wins {missing}", &[("boss", "Hydra"), ("user", "amy")]),
            "Hydra vs amy, Hydra wins {missing}"
        );
    }

    #[test]
    fn test_results_list_format() {
        let payouts = report(Verdict::FullClear, &[("alice", 34), ("bob", 74)]).payouts;
        assert_eq!(
            results_list("Survivors:", &payouts, "coins"),
            "Survivors: alice (34 coins), bob (74 coins)"
        );
    }

    #[test]
    fn test_clear_appends_results() {
        let messages = FightMessages {
            majority_clear: "{boss} is down.".to_string(),
            ..FightMessages::default()
        };
        let narrator = Narrator::new(&messages, "gems");
        let text = narrator.outcome(
            &boss(),
            &outcome(&["alice", "bob", "carol"], true),
            &report(Verdict::MajorityClear, &[("alice", 150), ("carol", 175)]),
        );
        assert_eq!(text, "Cave Troll is down. Survivors: alice (150 gems), carol (175 gems)");
    }

    #[test]
    fn test_solo_messages_name_the_fighter() {
        let messages = FightMessages::default();
        let narrator = Narrator::new(&messages, "coins");

        let text = narrator.outcome(
            &boss(),
            &outcome(&["Zed"], true),
            &report(Verdict::SoloSuccess, &[("Zed", 300)]),
        );
        assert!(text.contains("Zed"));
        assert!(text.contains("300 coins"));

        let text = narrator.outcome(
            &boss(),
            &outcome(&["Zed"], false),
            &report(Verdict::SoloFailure, &[]),
        );
        assert!(text.starts_with("Zed tried to take on Cave Troll"));
    }

    #[test]
    fn test_next_level_without_next_tier() {
        let messages = FightMessages {
            next_level: "Now: {boss}. Next: {next_boss}.".to_string(),
            ..FightMessages::default()
        };
        let narrator = Narrator::new(&messages, "coins");
        assert_eq!(narrator.next_level(&boss(), None), "Now: Cave Troll. Next: .");
    }
}
