/*
 *  Tournament administration: admit remote players, fill the roster with
 *  locals, run the bracket, rank everyone.
 */

mod cup;
mod league;
mod options;
mod roster;

pub use cup::SingleEliminationAdmin;
pub use league::RoundRobinAdmin;
pub use options::{AdminOptions, TournamentKind};
pub use roster::FallbackFactory;

use std::net::TcpListener;
use std::str::FromStr;

use anyhow::Context;

use crate::config::{SantoriniConfig, StrategyConfig};
use crate::strategy::StrategyKind;

/// Runs one whole tournament and returns the rendered standings. The
/// listening socket lives only inside this function, so it is released on
/// every exit path, error or not; accepted connections close when the
/// roster they belong to is dropped.
pub fn run_tournament(options: &AdminOptions, config: &SantoriniConfig) -> anyhow::Result<String> {
    let kind = options.tournament()?;
    let mut fallback = fallback_factory(config)?;

    let listener = TcpListener::bind((config.ip.as_str(), config.port))
        .with_context(|| format!("binding {}:{}", config.ip, config.port))?;
    log::info!("waiting for {} remote players on {}:{}", options.remote_players, config.ip, config.port);

    let mut players = roster::accept_players(&listener, options.remote_players, &mut fallback)?;
    drop(listener);

    match kind {
        TournamentKind::Cup => {
            roster::pad_to_power_of_two(&mut players, &mut fallback)?;
            let mut admin = SingleEliminationAdmin::new(players);
            admin.run();
            Ok(admin.render_standings())
        }
        TournamentKind::League => {
            let mut admin = RoundRobinAdmin::new(players, fallback);
            admin.run()?;
            Ok(admin.render_standings())
        }
    }
}

/// The factory for locally-instantiated players, built from the
/// `default-player` strategy named in the configuration.
fn fallback_factory(config: &SantoriniConfig) -> anyhow::Result<FallbackFactory> {
    let kind = StrategyKind::from_str(&config.default_player)
        .with_context(|| format!("default-player {:?}", config.default_player))?;
    let look_ahead = if kind.wants_depth() {
        StrategyConfig::load_default()?.look_ahead
    } else {
        1
    };
    Ok(FallbackFactory::new(kind, look_ahead))
}
