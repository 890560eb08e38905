use std::net::TcpListener;

use anyhow::Context;

use crate::player::{LocalPlayer, Player, ProxyPlayer};
use crate::referee::{MatchOutcome, Referee};
use crate::strategy::StrategyKind;

/// Mints the locally-instantiated players that fill out or repair a
/// roster. Every player it produces is already registered.
pub struct FallbackFactory {
    kind: StrategyKind,
    look_ahead: usize,
    minted: usize,
}

impl FallbackFactory {
    pub fn new(kind: StrategyKind, look_ahead: usize) -> FallbackFactory {
        FallbackFactory { kind, look_ahead, minted: 0 }
    }

    pub fn next(&mut self) -> anyhow::Result<Box<dyn Player>> {
        self.minted += 1;
        let name = format!("fallback-{}", self.minted);
        let strategy = self.kind.build(self.look_ahead)?;
        let mut player = LocalPlayer::new(name, strategy);
        if self.kind == StrategyKind::Smart {
            player = player.with_verification();
        }
        player.register().context("fallback player refused to register")?;
        Ok(Box::new(player))
    }
}

/// Accepts `count` remote connections, wrapping each in a registered
/// proxy. A connection whose registration round trip fails is dropped and
/// its slot is filled by a fallback local instead.
pub fn accept_players(
    listener: &TcpListener,
    count: usize,
    fallback: &mut FallbackFactory,
) -> anyhow::Result<Vec<Box<dyn Player>>> {
    let mut players: Vec<Box<dyn Player>> = vec![];
    while players.len() < count {
        let (stream, peer) = listener.accept().context("accepting a remote player")?;
        log::info!("remote connection from {peer}");

        let admitted = ProxyPlayer::new(stream).and_then(|mut proxy| {
            let name = proxy.register()?;
            Ok((proxy, name))
        });
        match admitted {
            Ok((proxy, name)) => {
                log::info!("registered remote player {name}");
                players.push(Box::new(proxy));
            }
            Err(fault) => {
                log::warn!("remote player dropped at admission: {fault}");
                players.push(fallback.next()?);
            }
        }
    }
    Ok(players)
}

/// Pads the roster with fallback locals up to the next power of two.
pub fn pad_to_power_of_two(
    players: &mut Vec<Box<dyn Player>>,
    fallback: &mut FallbackFactory,
) -> anyhow::Result<()> {
    let target = players.len().max(2).next_power_of_two();
    while players.len() < target {
        players.push(fallback.next()?);
    }
    Ok(())
}

/// Referees one match between two roster entries, mapping the seat-level
/// outcome back to roster indices: `(winner, loser, cheating)`.
pub fn run_match(
    players: &mut [Box<dyn Player>],
    first: usize,
    second: usize,
) -> (usize, usize, bool) {
    let (one, two) = pair_mut(players, first, second);
    let outcome: MatchOutcome = Referee::new(one, two).play_game();
    if outcome.winner == 0 {
        (first, second, outcome.cheating)
    } else {
        (second, first, outcome.cheating)
    }
}

/// Two disjoint mutable borrows out of the roster, in caller order.
fn pair_mut(
    players: &mut [Box<dyn Player>],
    first: usize,
    second: usize,
) -> (&mut dyn Player, &mut dyn Player) {
    assert_ne!(first, second, "a player cannot face itself");
    if first < second {
        let (low, high) = players.split_at_mut(second);
        (low[first].as_mut(), high[0].as_mut())
    } else {
        let (low, high) = players.split_at_mut(first);
        (high[0].as_mut(), low[second].as_mut())
    }
}
