use rand::seq::SliceRandom;

use super::{legal_plays, random_placements, Strategy};
use crate::santorini::prelude::*;

/// Uniform-random legal placements and plays. A winning play in the set is
/// not preferred; it is just as likely as any other pick.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn placements(&mut self, board: &mut Board, _color: Color) -> Result<[Placement; 2]> {
        Ok(random_placements(board))
    }

    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>> {
        let plays = legal_plays(board, color)?;
        Ok(plays.choose(&mut rand::thread_rng()).copied())
    }
}
