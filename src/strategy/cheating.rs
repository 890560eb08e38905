use rand::seq::SliceRandom;
use rand::Rng;

use super::Strategy;
use crate::santorini::prelude::*;

/// Picks placements and plays with no regard for legality: placements may
/// collide with anything, plays move and build wherever the dice land.
/// Useful for driving the forfeit and substitution paths end to end.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheatingStrategy;

impl Strategy for CheatingStrategy {
    fn placements(&mut self, board: &mut Board, _color: Color) -> Result<[Placement; 2]> {
        let mut rng = rand::thread_rng();
        let mut pick = || {
            Placement::new(rng.gen_range(0..board.rows()), rng.gen_range(0..board.cols()))
        };
        Ok([pick(), pick()])
    }

    fn play(&mut self, _board: &mut Board, color: Color) -> Result<Option<Play>> {
        let mut rng = rand::thread_rng();
        let worker = *Worker::pair(color).choose(&mut rng).unwrap();
        let move_dir = *Direction::ALL.choose(&mut rng).unwrap();
        if rng.gen_bool(0.9) {
            let build_dir = *Direction::ALL.choose(&mut rng).unwrap();
            Ok(Some(Play::full(worker, move_dir, build_dir)))
        } else {
            Ok(Some(Play::win(worker, move_dir)))
        }
    }
}
