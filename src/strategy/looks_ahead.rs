use rand::seq::SliceRandom;

use super::{apply_play, legal_plays, random_placements, undo_play, Strategy};
use crate::santorini::prelude::*;

/// Keeps only the plays that cannot be punished within a fixed number of
/// plies, then picks uniformly among the survivors. An immediate win is
/// returned outright; no survivors at all is a forfeit.
#[derive(Clone, Copy, Debug)]
pub struct LooksAheadStrategy {
    depth: usize,
}

impl LooksAheadStrategy {
    pub fn new(depth: usize) -> LooksAheadStrategy {
        LooksAheadStrategy { depth: depth.max(1) }
    }

    /// Every legal play that does not hand the opponent a forced win within
    /// `depth` plies. A play after which the opponent has no legal play at
    /// all survives; the opponent will have to forfeit.
    fn surviving_plays(&self, board: &mut Board, color: Color) -> Result<Vec<Play>> {
        let mut survivors = vec![];
        for play in legal_plays(board, color)? {
            if play.is_winning() {
                survivors.push(play);
                continue;
            }
            apply_play(board, &play)?;
            let doomed = self.opponent_refutes(board, color, self.depth)?;
            undo_play(board, &play)?;
            if !doomed {
                survivors.push(play);
            }
        }
        Ok(survivors)
    }

    /// After one of our plays: can the opponent win, now or by forcing a
    /// loss deeper down?
    fn opponent_refutes(&self, board: &mut Board, color: Color, depth: usize) -> Result<bool> {
        let opponent_plays = legal_plays(board, color.opponent())?;
        if opponent_plays.iter().any(|p| p.is_winning()) {
            return Ok(true);
        }
        if depth <= 1 {
            return Ok(false);
        }
        for opponent_play in opponent_plays {
            apply_play(board, &opponent_play)?;
            let lost = self.loses_within(board, color, depth - 1)?;
            undo_play(board, &opponent_play)?;
            if lost {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `color`, to move, loses within `depth` plies against this
    /// board: every available play either does not exist, or gets refuted.
    fn loses_within(&self, board: &mut Board, color: Color, depth: usize) -> Result<bool> {
        if depth == 0 {
            return Ok(false);
        }
        let plays = legal_plays(board, color)?;
        if plays.is_empty() {
            return Ok(true);
        }
        if plays.iter().any(|p| p.is_winning()) {
            return Ok(false);
        }
        for play in plays {
            apply_play(board, &play)?;
            let refuted = self.opponent_refutes(board, color, depth)?;
            undo_play(board, &play)?;
            if !refuted {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Strategy for LooksAheadStrategy {
    fn placements(&mut self, board: &mut Board, _color: Color) -> Result<[Placement; 2]> {
        Ok(random_placements(board))
    }

    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>> {
        let survivors = self.surviving_plays(board, color)?;
        if let Some(win) = survivors.iter().find(|p| p.is_winning()) {
            return Ok(Some(*win));
        }
        Ok(survivors.choose(&mut rand::thread_rng()).copied())
    }
}
