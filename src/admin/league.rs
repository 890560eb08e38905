use itertools::Itertools;

use super::roster::{self, FallbackFactory};
use crate::player::Player;

/// Round robin over the roster. Every win credits the winner with the
/// loser; a cheating loser has its history wiped and redistributed, is
/// disqualified from the standings, and hands its remaining fixtures to a
/// fresh fallback player seated in its slot.
pub struct RoundRobinAdmin {
    players: Vec<Box<dyn Player>>,
    /// Roster slot -> player index; substitution rebinds the slot.
    seats: Vec<usize>,
    /// Per player index: the players it has beaten.
    wins: Vec<Vec<usize>>,
    disqualified: Vec<bool>,
    fallback: FallbackFactory,
}

impl RoundRobinAdmin {
    pub fn new(players: Vec<Box<dyn Player>>, fallback: FallbackFactory) -> RoundRobinAdmin {
        let count = players.len();
        RoundRobinAdmin {
            players,
            seats: (0..count).collect(),
            wins: vec![vec![]; count],
            disqualified: vec![false; count],
            fallback,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        for low in 0..self.seats.len() {
            for high in low + 1..self.seats.len() {
                let (first, second) = (self.seats[low], self.seats[high]);
                let (winner, loser, cheated) = roster::run_match(&mut self.players, first, second);
                self.wins[winner].push(loser);
                log::info!(
                    "{} beat {}{}",
                    self.players[winner].name(),
                    self.players[loser].name(),
                    if cheated { " (cheating)" } else { "" }
                );

                if cheated {
                    self.substitute(loser, if loser == first { low } else { high })?;
                }
            }
        }
        Ok(())
    }

    /// Wipes a cheater out of the books: every past victim gets the win
    /// back, the cheater leaves the standings, and a fresh fallback takes
    /// over its seat for the remaining fixtures.
    fn substitute(&mut self, cheater: usize, seat: usize) -> anyhow::Result<()> {
        let victims = std::mem::take(&mut self.wins[cheater]);
        for victim in victims {
            self.wins[victim].push(cheater);
        }
        self.disqualified[cheater] = true;

        let replacement = self.fallback.next()?;
        log::info!(
            "{} is disqualified; {} takes its remaining fixtures",
            self.players[cheater].name(),
            replacement.name()
        );
        self.players.push(replacement);
        self.wins.push(vec![]);
        self.disqualified.push(false);
        self.seats[seat] = self.players.len() - 1;
        Ok(())
    }

    /// Standings by descending win count over everyone never disqualified.
    pub fn standings(&self) -> Vec<(String, usize)> {
        self.players
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.disqualified[*index])
            .map(|(index, player)| (player.name().to_owned(), self.wins[index].len()))
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .collect()
    }

    pub fn render_standings(&self) -> String {
        let mut lines = vec!["Final Standings:".to_owned(), "----------------------".to_owned()];
        for (name, points) in self.standings() {
            lines.push(format!("{name} : {points}"));
        }
        lines.join("\n")
    }
}
