use std::io::Write;

use bossfight_core::account_key;
use bossfight_core::context::{AppConfigExt, ChatterRole};
use bossfight_core::scheduler::PhaseKind;

use crate::CliContext;

/// Enter a chatter into the fight, as if they typed the join command in chat
pub async fn join(name: &str, role: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    let role = match role {
        Some(role) => ChatterRole::from_name(role).ok_or_else(|| {
            let known: Vec<_> = ChatterRole::all().iter().map(|r| r.as_str()).collect();
            format!("unknown role '{role}' (expected one of: {})", known.join(", "))
        })?,
        None => ChatterRole::default(),
    };

    let stats = ctx.config.read().await.classes.stats_for(role);
    ctx.ledger.open_account(&account_key(name), 0);

    match ctx.fight.try_join(name, stats.into(), role).await {
        Ok(admission) => println!("{name} joined as {role} (#{})", admission.position),
        Err(rejection) => println!("{name} was turned away: {rejection}"),
    }
    Ok(())
}

pub async fn show_status(ctx: &CliContext) {
    let status = ctx.fight.status().await;

    println!("Phase:    {}", status.phase);
    println!("Cycle:    {}", status.cycle);
    println!("Game:     {}", status.game.as_deref().unwrap_or("(none)"));
    if status.phase != PhaseKind::Cooldown {
        println!("Entrants: {}", status.entrants);
    }
    if let Some(remaining) = status.remaining {
        let label = match status.phase {
            PhaseKind::Cooldown => "Cooldown ends in",
            _ => "Window closes in",
        };
        println!("{label} {}s", remaining.as_secs());
    }
}

pub async fn show_balance(name: &str, ctx: &CliContext) {
    let currency = ctx.config.read().await.currency_name.clone();
    match ctx.ledger.balance(&account_key(name)) {
        Some(balance) => println!("{name}: {balance} {currency}"),
        None => println!("{name} has no account yet"),
    }
}

/// Switch the stream game and remember it for the next start
pub async fn set_game(title: Option<String>, ctx: &CliContext) -> Result<(), String> {
    ctx.fight.set_game(title.clone()).await?;

    let mut config = ctx.config.write().await;
    config.game = title;
    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "Failed to persist stream game");
    }

    match &config.game {
        Some(game) => println!("Stream game set to {game}"),
        None => println!("Stream game cleared"),
    }
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;

    match bossfight_core::context::AppConfig::config_path() {
        Ok(path) => println!("Config file:  {}", path.display()),
        Err(e) => println!("Config file:  unavailable ({e})"),
    }
    println!("Cooldown:     {}s", config.fight.cooldown_secs);
    println!("Entry window: {}s", config.fight.entry_window_secs);
    println!("Anticipation: {}s", config.fight.anticipation_secs);
    println!("Currency:     {}", config.currency_name);
    if config.catalog_directory.is_empty() {
        println!("Catalog:      built-in");
    } else {
        println!("Catalog:      {}", config.catalog_directory);
    }
}

pub fn exit() {
    let _ = write!(std::io::stdout(), "quitting...");
    let _ = std::io::stdout().flush();
}
