use itertools::Itertools;

use super::{apply_play, legal_plays, undo_play, Strategy};
use crate::santorini::prelude::*;

/// Outcome weight that lets forced wins and losses dominate any heuristic
/// score a leaf can accumulate.
const OUTCOME_WEIGHT: f64 = 161.0;

/// Placement keeps its distance from the opponent; play runs a depth-limited
/// minimax over a two-sided heuristic, with forced outcomes weighted heavily
/// enough to override positional noise.
#[derive(Clone, Copy, Debug)]
pub struct SmartStrategy {
    depth: usize,
}

/// Win/loss mass and propagated heuristic value for one candidate play.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    score: f64,
    wins: f64,
    losses: f64,
}

impl SmartStrategy {
    pub fn new(depth: usize) -> SmartStrategy {
        SmartStrategy { depth: depth.max(1) }
    }

    /// Recursive scorer. `weight` is the probability mass this subtree
    /// carries; terminal subtrees bank it as a win or a loss, leaf subtrees
    /// bank the minimaxed heuristic.
    fn score_look_ahead(
        &self,
        board: &mut Board,
        tally: &mut Tally,
        color: Color,
        own_turn: bool,
        weight: f64,
        depth: usize,
    ) -> Result<()> {
        let turn_color = if own_turn { color } else { color.opponent() };
        let plays = legal_plays(board, turn_color)?;

        if plays.is_empty() {
            // no move for the side to act: forfeits in our favour iff it
            // was the opponent standing still
            if own_turn {
                tally.losses += weight;
            } else {
                tally.wins += weight;
            }
            return Ok(());
        }
        if plays.iter().any(|p| p.is_winning()) {
            if own_turn {
                tally.wins += weight;
            } else {
                tally.losses += weight;
            }
            return Ok(());
        }

        let share = weight / plays.len() as f64;
        let mut best: Option<f64> = None;
        for play in &plays {
            apply_play(board, play)?;
            if depth > 1 {
                self.score_look_ahead(board, tally, color, !own_turn, share, depth - 1)?;
            } else {
                let score = score_board(board, color)? as f64;
                best = Some(match best {
                    None => score,
                    Some(b) if own_turn => b.max(score),
                    Some(b) => b.min(score),
                });
            }
            undo_play(board, play)?;
        }
        if let Some(best) = best {
            tally.score += best * weight;
        }
        Ok(())
    }
}

impl Strategy for SmartStrategy {
    /// The first side to place takes the two column-0 cells at the grid's
    /// vertical midline; the second keeps its workers far from the
    /// opponent's, by summed Euclidean distance.
    fn placements(&mut self, board: &mut Board, color: Color) -> Result<[Placement; 2]> {
        let opponents = Worker::pair(color.opponent());
        if !opponents.iter().any(|w| board.worker_exists(*w)) {
            let mid = board.rows() / 2;
            return Ok([Placement::new(mid, 0), Placement::new(mid + 1, 0)]);
        }

        let repulsion = -((board.rows() + board.cols()) as f64);
        let scored = (0..board.rows())
            .cartesian_product(0..board.cols())
            .map(|(row, col)| {
                let cell = Placement::new(row, col);
                let distance: f64 = opponents
                    .iter()
                    .map(|w| match board.spot(*w) {
                        Ok(spot) if spot.position() == cell => repulsion,
                        Ok(spot) => cell.distance(&spot.position()),
                        Err(_) => 0.0,
                    })
                    .sum();
                (cell, distance)
            })
            .sorted_by(|a, b| b.1.total_cmp(&a.1))
            .collect::<Vec<_>>();

        let free: Vec<Placement> = scored
            .into_iter()
            .map(|(cell, _)| cell)
            .filter(|cell| !board.has_worker_at(cell.row, cell.col))
            .take(2)
            .collect();
        Ok([free[0], free[1]])
    }

    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>> {
        let plays = legal_plays(board, color)?;
        let mut best: Option<(Play, f64)> = None;
        for play in plays {
            if play.is_winning() {
                return Ok(Some(play));
            }
            apply_play(board, &play)?;
            let mut tally = Tally::default();
            self.score_look_ahead(board, &mut tally, color, false, 1.0, self.depth)?;
            undo_play(board, &play)?;

            let score = tally.score + (tally.wins - tally.losses) * OUTCOME_WEIGHT;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((play, score));
            }
        }
        Ok(best.map(|(play, _)| play))
    }
}

/// Two-sided positional score: our development minus theirs.
fn score_board(board: &Board, color: Color) -> Result<i32> {
    Ok(side_score(board, color)? - side_score(board, color.opponent())?)
}

/// One side's development: sixteen points per storey under each worker, a
/// climb-aware bonus for adjacent uncapped towers, minus one per crowding
/// neighbour.
fn side_score(board: &Board, color: Color) -> Result<i32> {
    let mut score = 0;
    for worker in Worker::pair(color) {
        let height = board.spot(worker)?.height as i32;
        score += height * 16;
        for dir in Direction::ALL {
            if let Some(adjacent) = board.neighbour_height(worker, dir)? {
                let adjacent = adjacent as i32;
                if adjacent > 0 && adjacent < MAX_HEIGHT as i32 {
                    score += adjacent * 2 + adjacent - height;
                }
            }
            if board.neighbour_occupied(worker, dir)? == Some(true) {
                score -= 1;
            }
        }
    }
    Ok(score)
}
