//! Noughts - unified CLI
//!
//! Terminal game and HTTP leaderboard server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use noughts::{AppConfig, GreedyOpponent, LeaderboardStore, Menu, Session};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play {
        leaderboard: None,
        seed: None,
    });

    match command {
        Command::Play { leaderboard, seed } => {
            init_tracing("warn");
            let config = load_config(&cli.config, leaderboard)?;
            run_game(&config, seed)
        }
        Command::Serve {
            host,
            port,
            leaderboard,
            web_dir,
        } => {
            init_tracing("info,noughts=debug");
            let mut config = load_config(&cli.config, leaderboard)?;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(dir) = web_dir {
                config = config.with_web_dir(dir);
            }
            noughts::server::run(&config).await
        }
    }
}

/// Logs go to stderr so they never interleave with game prompts.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &std::path::Path, leaderboard: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(path)?.apply_env()?;
    if let Some(leaderboard) = leaderboard {
        debug!(path = %leaderboard.display(), "Leaderboard path from command line");
        config = config.with_leaderboard_path(leaderboard);
    }
    Ok(config)
}

/// Runs the terminal game on stdin/stdout.
#[instrument(skip(config))]
fn run_game(config: &AppConfig, seed: Option<u64>) -> Result<()> {
    // One random source for the whole process, seeded once here.
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let session = Session::new(GreedyOpponent::new(rng));
    let store = LeaderboardStore::new(config.leaderboard_path());
    info!(leaderboard = %store.path().display(), "Starting terminal game");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), session, store);
    menu.run()?;
    Ok(())
}
