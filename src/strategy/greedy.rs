use super::{apply_play, legal_plays, random_placements, undo_play, Strategy};
use crate::santorini::prelude::*;

/// Picks the play whose resulting board scores best under a one-board
/// heuristic: each own worker is worth five points per storey under it plus
/// one point per storey on every adjacent tower. Immediate wins short-circuit.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn placements(&mut self, board: &mut Board, _color: Color) -> Result<[Placement; 2]> {
        Ok(random_placements(board))
    }

    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>> {
        let mut best: Option<(Play, i32)> = None;
        for play in legal_plays(board, color)? {
            if play.is_winning() {
                return Ok(Some(play));
            }
            apply_play(board, &play)?;
            let score = score_board(board, color)?;
            undo_play(board, &play)?;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((play, score));
            }
        }
        Ok(best.map(|(play, _)| play))
    }
}

fn score_board(board: &Board, color: Color) -> Result<i32> {
    let mut score = 0;
    for worker in Worker::pair(color) {
        score += board.spot(worker)?.height as i32 * 5;
        for dir in Direction::ALL {
            if let Some(height) = board.neighbour_height(worker, dir)? {
                score += height as i32;
            }
        }
    }
    Ok(score)
}
