use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_santorini::prelude::*;

/// A remote player process: builds a local player around the named
/// strategy, dials the administrator, and serves until the game ends.
#[derive(Clone, Debug, Parser)]
#[command(name = "player-driver")]
struct DriverOptions {
    /// Strategy to play: random, look-ahead, greedy, smart, interactive or
    /// cheating.
    strategy: String,

    /// Name to register under.
    #[arg(short, long, default_value = "remote-player")]
    name: String,

    /// Path to the tournament configuration file.
    #[arg(short, long, default_value = "santorini.config")]
    config: PathBuf,

    /// Path to the look-ahead configuration file.
    #[arg(short, long, default_value = "strategy.config")]
    strategy_config: PathBuf,

    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() {
    dotenvy::dotenv().ok();
    let options = match DriverOptions::try_parse() {
        Ok(options) => options,
        Err(_) => {
            eprintln!("usage: player-driver <strategy> [--name n] [--config path]");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(options: DriverOptions) -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str(
        options.log_level.clone().unwrap_or("info".into()).as_str(),
    )?
    .write_mode(WriteMode::BufferAndFlush)
    .log_to_stderr()
    .adaptive_format_for_stderr(match cfg!(debug_assertions) {
        true => AdaptiveFormat::WithThread,
        _ => AdaptiveFormat::Default,
    })
    .start()?;

    let kind = StrategyKind::from_str(&options.strategy)?;
    let look_ahead = if kind.wants_depth() {
        StrategyConfig::load(&options.strategy_config)?.look_ahead
    } else {
        1
    };

    let mut player = LocalPlayer::new(options.name.clone(), kind.build(look_ahead)?);
    if kind == StrategyKind::Smart {
        player = player.with_verification();
    }

    let config = SantoriniConfig::load(&options.config)?;
    let driver = PlayerDriver::connect(&config.ip, config.port, player)?;
    driver.run()
}
