/*
 *  Play selection. Every variant works over the same in-place enumeration:
 *  simulate with move/build, score or recurse, undo. No board is ever
 *  deep-copied inside a search.
 */

mod cheating;
mod greedy;
mod interactive;
mod looks_ahead;
mod random;
mod smart;

pub use cheating::CheatingStrategy;
pub use greedy::GreedyStrategy;
pub use interactive::InteractiveStrategy;
pub use looks_ahead::LooksAheadStrategy;
pub use random::RandomStrategy;
pub use smart::SmartStrategy;

use rand::Rng;

use crate::santorini::prelude::*;

/// How a player decides where to put its workers and what to do each turn.
/// The board handed in is the player's own replica; implementations may
/// simulate on it freely as long as they undo what they apply.
pub trait Strategy {
    fn placements(&mut self, board: &mut Board, color: Color) -> Result<[Placement; 2]>;

    /// `None` means no acceptable play exists and the turn is forfeited.
    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>>;
}

/// Every legal play for a colour: for each worker and move direction, a
/// winning move is recorded on its own, and every other valid move is
/// paired with each valid build on the post-move board.
pub fn legal_plays(board: &mut Board, color: Color) -> Result<Vec<Play>> {
    let mut plays = vec![];
    for worker in Worker::pair(color) {
        for move_dir in Direction::ALL {
            if !rules::is_valid_move(board, worker, move_dir)? {
                continue;
            }
            if rules::is_winning_move(board, worker, move_dir)? {
                plays.push(Play::win(worker, move_dir));
                continue;
            }
            board.move_worker(worker, move_dir)?;
            for build_dir in Direction::ALL {
                if rules::is_valid_build(board, worker, build_dir)? {
                    plays.push(Play::full(worker, move_dir, build_dir));
                }
            }
            board.move_worker(worker, move_dir.opposite())?;
        }
    }
    Ok(plays)
}

/// Applies a non-winning play: the move, then the build.
pub fn apply_play(board: &mut Board, play: &Play) -> Result<()> {
    board.move_worker(play.worker, play.move_dir)?;
    if let Some(build_dir) = play.build_dir {
        board.build(play.worker, build_dir)?;
    }
    Ok(())
}

/// Exact inverse of [`apply_play`].
pub fn undo_play(board: &mut Board, play: &Play) -> Result<()> {
    if let Some(build_dir) = play.build_dir {
        board.undo_build(play.worker, build_dir)?;
    }
    board.move_worker(play.worker, play.move_dir.opposite())?;
    Ok(())
}

/// Two distinct uniform-random unoccupied cells. Shared by every variant
/// that does not care where its workers start.
pub(crate) fn random_placements(board: &Board) -> [Placement; 2] {
    let mut rng = rand::thread_rng();
    let mut picked: Vec<Placement> = vec![];
    while picked.len() != 2 {
        let placement = Placement::new(
            rng.gen_range(0..board.rows()),
            rng.gen_range(0..board.cols()),
        );
        if board.has_worker_at(placement.row, placement.col) || picked.contains(&placement) {
            continue;
        }
        picked.push(placement);
    }
    [picked[0], picked[1]]
}

/// The configured strategy kinds a player can be built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    LooksAhead,
    Greedy,
    Smart,
    Interactive,
    Cheating,
}

impl StrategyKind {
    /// Whether this kind reads its look-ahead depth from `strategy.config`.
    pub fn wants_depth(&self) -> bool {
        matches!(self, StrategyKind::LooksAhead | StrategyKind::Smart)
    }

    pub fn build(&self, look_ahead: usize) -> Result<Box<dyn Strategy + Send>> {
        if self.wants_depth() && look_ahead < 1 {
            return Err(Fault::contract(format!("look-ahead must be at least 1, got {look_ahead}")));
        }
        Ok(match self {
            StrategyKind::Random => Box::new(RandomStrategy),
            StrategyKind::LooksAhead => Box::new(LooksAheadStrategy::new(look_ahead)),
            StrategyKind::Greedy => Box::new(GreedyStrategy),
            StrategyKind::Smart => Box::new(SmartStrategy::new(look_ahead)),
            StrategyKind::Interactive => Box::new(InteractiveStrategy),
            StrategyKind::Cheating => Box::new(CheatingStrategy),
        })
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = Fault;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(StrategyKind::Random),
            "look-ahead" => Ok(StrategyKind::LooksAhead),
            "greedy" => Ok(StrategyKind::Greedy),
            "smart" => Ok(StrategyKind::Smart),
            "interactive" => Ok(StrategyKind::Interactive),
            "cheating" => Ok(StrategyKind::Cheating),
            _ => Err(Fault::contract(format!("unknown strategy kind {s}"))),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;
    use serde_json::json;

    pub fn board_from(value: serde_json::Value) -> Board {
        let mut board = Board::new();
        board.set_grid(serde_json::from_value(value).unwrap());
        board
    }

    /// A quiet midgame position with all four workers and a few towers.
    pub fn midgame() -> Board {
        board_from(json!([
            [[0, "blue1"], 1, 0, 0, 0],
            [0, 0, 2, 0, 0],
            [0, 1, [1, "white1"], 0, 0],
            [0, 0, 0, 0, [0, "blue2"]],
            [0, 0, [0, "white2"], 2, 0]
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn enumeration_is_exhaustive_on_a_small_position() {
        // one blue worker boxed into a corner by capped towers
        let mut board = board_from(json!([
            [[0, "blue1"], 2, 0, 0, [0, "blue2"]],
            [4, 4, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [[0, "white1"], 0, 0, 0, [0, "white2"]],
            [0, 0, 0, 0, 0]
        ]));

        let plays = legal_plays(&mut board, Color::Blue).unwrap();
        // blue1's in-bounds neighbours are capped or two storeys up, so
        // every blue play belongs to blue2
        assert!(!plays.is_empty());
        assert!(plays.iter().all(|p| p.worker == Worker::Blue2));
    }

    #[test]
    fn enumeration_records_wins_without_builds() {
        let mut board = board_from(json!([
            [[2, "blue1"], 3, 0, 0, [0, "blue2"]],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [[0, "white1"], 0, 0, 0, [0, "white2"]],
            [0, 0, 0, 0, 0]
        ]));

        let plays = legal_plays(&mut board, Color::Blue).unwrap();
        let wins: Vec<_> = plays.iter().filter(|p| p.is_winning()).collect();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].worker, Worker::Blue1);
        assert_eq!(wins[0].move_dir, Direction::E);
        // the winning step is never also recorded as a move-and-build
        assert!(!plays
            .iter()
            .any(|p| p.worker == Worker::Blue1 && p.move_dir == Direction::E && !p.is_winning()));
    }

    #[test]
    fn enumeration_leaves_the_board_untouched() {
        let mut board = midgame();
        let before = board.clone();
        legal_plays(&mut board, Color::Blue).unwrap();
        legal_plays(&mut board, Color::White).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn every_enumerated_play_is_legal() {
        let mut board = midgame();
        for color in COLORS {
            for play in legal_plays(&mut board, color).unwrap() {
                assert!(rules::is_legal_play(&mut board, &play).unwrap(), "{play}");
            }
        }
    }

    #[test]
    fn apply_and_undo_are_inverses() {
        let mut board = midgame();
        let before = board.clone();
        for play in legal_plays(&mut board, Color::White).unwrap() {
            if play.is_winning() {
                continue;
            }
            apply_play(&mut board, &play).unwrap();
            undo_play(&mut board, &play).unwrap();
            assert_eq!(board, before, "{play}");
        }
    }

    #[test]
    fn random_placements_land_on_free_distinct_cells() {
        let board = midgame();
        for _ in 0..50 {
            let [a, b] = random_placements(&board);
            assert_ne!(a, b);
            assert!(!board.has_worker_at(a.row, a.col));
            assert!(!board.has_worker_at(b.row, b.col));
        }
    }

    #[test]
    fn kinds_parse_from_config_names() {
        use std::str::FromStr;
        assert_eq!(StrategyKind::from_str("smart").unwrap(), StrategyKind::Smart);
        assert_eq!(StrategyKind::from_str("look-ahead").unwrap(), StrategyKind::LooksAhead);
        assert!(StrategyKind::from_str("psychic").is_err());
        assert!(StrategyKind::LooksAhead.build(0).is_err());
        assert!(StrategyKind::Random.build(0).is_ok());
    }
}
