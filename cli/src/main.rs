use std::io::Write;

use bossfight_cli::{CliContext, Repl, commands, logging};
use bossfight_core::context::{AppConfig, AppConfigExt};
use clap::{Parser, Subcommand};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let ctx = CliContext::start(AppConfig::load())?;
    let mut repl = Repl::new();

    while let Some(line) = repl.readline().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.shutdown().await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "boss fight mini-game")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter a chatter into the open recruitment window
    Join {
        #[arg(short, long)]
        name: String,
        /// viewer, follower, regular_follower, subscriber or moderator
        #[arg(short, long)]
        role: Option<String>,
    },
    Status,
    Balance {
        #[arg(short, long)]
        name: String,
    },
    /// Set the stream game; omit the title to clear it
    Game {
        #[arg(short, long)]
        title: Option<String>,
    },
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "bossfight".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Join { name, role }) => commands::join(&name, role.as_deref(), ctx).await?,
        Some(Commands::Status) => commands::show_status(ctx).await,
        Some(Commands::Balance { name }) => commands::show_balance(&name, ctx).await,
        Some(Commands::Game { title }) => commands::set_game(title, ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
