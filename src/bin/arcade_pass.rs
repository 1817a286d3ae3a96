//! arcade-pass: operator console for code issuance and redemption
//!
//! Talks directly to the configured ledger, catalog and counter stores.
//!
//! ## Configuration
//! - ARCADE_CONFIG: Path to a YAML config file (optional)
//! - ARCADE__*: Overrides, e.g. ARCADE__STORAGE__SQLITE__PATH
//! - ARCADE_LOG: Tracing filter (default: info)

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use arcade_pass::config::Config;
use arcade_pass::services::{Redemption, SessionOrchestrator};
use arcade_pass::storage::{init_counter, init_storage};
use arcade_pass::utils::bootstrap::{connect_with_retry, init_tracing, ConnectRetry};

#[derive(Parser, Debug)]
#[command(author, version, about = "Issue, check and redeem arcade play codes")]
struct Args {
    /// Config file (overrides ARCADE_CONFIG)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a code without registering a session
    Generate,
    /// Show what a code entitles the holder to
    Check { code: String },
    /// Consume a code
    Redeem { code: String },
    /// List displayable games with their prices
    Games,
    /// Show the latest issued code, or reset it
    Counter {
        /// Overwrite the counter; the next code issued follows this one
        #[arg(long)]
        set: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let retry = ConnectRetry::default();

    let stores = connect_with_retry("ledger", retry, || init_storage(&config.storage))
        .await
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    let counter = connect_with_retry("counter", retry, || init_counter(&config.counter))
        .await
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    let orchestrator = SessionOrchestrator::new(
        Arc::clone(&stores.catalog),
        Arc::clone(&stores.sessions),
        counter,
        &config.issuance,
    );

    match args.command {
        Command::Generate => {
            let code = orchestrator.generate_code().await?;
            println!("{code}");
        }
        Command::Check { code } => {
            let status = orchestrator.check_code(&code).await?;
            println!("{} usable for game {} ({})", status.code, status.game_id, status.name);
            if let Some(minutes) = status.play_time {
                println!("  play time: {minutes} min");
            }
            if let Some(levels) = status.levels {
                println!("  levels: {levels}");
            }
        }
        Command::Redeem { code } => match orchestrator.redeem_code(&code).await? {
            Redemption::Redeemed(status) => {
                println!("{} redeemed for game {}", status.code, status.game_id)
            }
            Redemption::AlreadyRedeemed => println!("{code} was already redeemed"),
        },
        Command::Games => {
            for game in orchestrator.list_games_with_pricing().await? {
                println!("{:>4}  {}", game.game_id, game.name);
                for p in &game.pricing.by_time {
                    println!("        {:>3} min  {:>5}", p.time, p.price);
                }
                for p in &game.pricing.by_level {
                    println!("        {:>3} lvl  {:>5}", p.level, p.price);
                }
            }
        }
        Command::Counter { set: Some(code) } => {
            orchestrator.reset_counter(&code).await?;
            info!(code = %code, "Counter reset");
            println!("counter set to {code}");
        }
        Command::Counter { set: None } => match orchestrator.current_code().await? {
            Some(code) => println!("{code}"),
            None => println!("counter not seeded; next code is {}", config.issuance.seed_code),
        },
    }

    Ok(())
}
