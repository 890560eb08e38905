use itertools::Itertools;

use super::roster;
use crate::player::Player;

/// Single elimination over a roster already padded to a power of two.
/// Each round pairs the outer entries inward; losers drop out carrying the
/// round number as their rank (zero if they cheated), and the survivor of
/// the final carries one more than the last round.
pub struct SingleEliminationAdmin {
    players: Vec<Box<dyn Player>>,
    ranks: Vec<u32>,
    stage: u32,
}

impl SingleEliminationAdmin {
    pub fn new(players: Vec<Box<dyn Player>>) -> SingleEliminationAdmin {
        let ranks = vec![0; players.len()];
        SingleEliminationAdmin { players, ranks, stage: 1 }
    }

    pub fn run(&mut self) {
        let mut active: Vec<usize> = (0..self.players.len()).collect();

        while active.len() > 1 {
            log::info!("cup round {} with {} players", self.stage, active.len());
            let mut eliminated = vec![false; active.len()];

            for low in 0..active.len() / 2 {
                let high = active.len() - 1 - low;
                let (winner, loser, cheated) =
                    roster::run_match(&mut self.players, active[low], active[high]);

                self.ranks[loser] = if cheated { 0 } else { self.stage };
                eliminated[if winner == active[low] { high } else { low }] = true;
                log::info!(
                    "{} beat {}{}",
                    self.players[winner].name(),
                    self.players[loser].name(),
                    if cheated { " (cheating)" } else { "" }
                );
            }

            active = active
                .iter()
                .enumerate()
                .filter_map(|(slot, index)| (!eliminated[slot]).then_some(*index))
                .collect();
            self.stage += 1;
        }

        if let Some(champion) = active.first() {
            self.ranks[*champion] = self.stage;
        }
    }

    /// Standings by descending rank, renumbered 1..N.
    pub fn standings(&self) -> Vec<(String, u32)> {
        self.players
            .iter()
            .zip(self.ranks.iter())
            .map(|(player, rank)| (player.name().to_owned(), *rank))
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .collect()
    }

    pub fn render_standings(&self) -> String {
        let mut lines = vec!["Final Standings:".to_owned(), "----------------------".to_owned()];
        for (position, (name, _)) in self.standings().iter().enumerate() {
            lines.push(format!("{} : {}", position + 1, name));
        }
        lines.join("\n")
    }
}
