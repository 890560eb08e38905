use super::Player;
use crate::santorini::prelude::*;
use crate::strategy::{apply_play, legal_plays, undo_play, Strategy};

/// A player living in this process: a name, a replica board, and a
/// strategy. The replica always reflects the last board the referee
/// showed us, so a freshly received board can be checked for
/// reachability before we bother strategizing over it.
pub struct LocalPlayer {
    name: String,
    board: Board,
    strategy: Box<dyn Strategy + Send>,
    color: Option<Color>,
    registered: bool,
    placements: Option<[Placement; 2]>,
    verify_boards: bool,
}

impl LocalPlayer {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy + Send>) -> LocalPlayer {
        LocalPlayer {
            name: name.into(),
            board: Board::new(),
            strategy,
            color: None,
            registered: false,
            placements: None,
            verify_boards: false,
        }
    }

    /// Turns on received-board verification: every board handed to `play`
    /// must be reachable within two plies of the replica, or the turn is
    /// reported as an illegal play.
    pub fn with_verification(mut self) -> LocalPlayer {
        self.verify_boards = true;
        self
    }

    fn color(&self) -> Result<Color> {
        self.color.ok_or_else(|| Fault::contract("player has not been assigned a colour yet"))
    }

    /// Reachability of `received` from the replica in at most two plies.
    ///
    /// Three cases, by what our own last action was:
    /// - we placed first: the board may differ from replica-plus-our-own
    ///   placements only by the opponent's two added workers;
    /// - we placed second: replica-plus-our-own placements must reach the
    ///   board by exactly one legal opponent play;
    /// - we have already played: some own legal non-winning play followed
    ///   by some opponent legal non-winning play must reproduce it.
    fn check_board(&mut self, received: &Grid) -> Result<bool> {
        let color = self.color()?;

        if rules::is_legal_initial_board(self.board.grid(), color) {
            // replica predates our own placements; reapply them first
            let placements = self
                .placements
                .ok_or_else(|| Fault::contract("no recorded placements to verify against"))?;
            let mut replica = self.board.clone();
            for (index, placement) in placements.iter().enumerate() {
                let worker = Worker::of(color, index as u8 + 1)?;
                replica.place_worker(placement.row, placement.col, worker)?;
            }

            if rules::is_legal_board(replica.grid(), &[], MAX_HEIGHT) {
                // all four workers known: we placed second, so the opponent
                // has taken exactly one turn since
                reaches_in_one_play(&mut replica, received, color.opponent())
            } else {
                Ok(differs_by_added_pair(replica.grid(), received, color.opponent()))
            }
        } else {
            for own_play in legal_plays(&mut self.board, color)? {
                if own_play.is_winning() {
                    continue; // a win would have ended the game, not produced this board
                }
                apply_play(&mut self.board, &own_play)?;
                let reachable = reaches_in_one_play(&mut self.board, received, color.opponent())?;
                undo_play(&mut self.board, &own_play)?;
                if reachable {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Whether some legal non-winning play by `color` turns `board` into
/// `target`. Simulations are undone in place.
fn reaches_in_one_play(board: &mut Board, target: &Grid, color: Color) -> Result<bool> {
    for play in legal_plays(board, color)? {
        if play.is_winning() {
            continue;
        }
        apply_play(board, &play)?;
        let hit = board.grid() == target;
        undo_play(board, &play)?;
        if hit {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether `received` differs from `expected` only by the addition of both
/// of `color`'s workers, heights untouched.
fn differs_by_added_pair(expected: &Grid, received: &Grid, color: Color) -> bool {
    if expected.rows() != received.rows() || expected.cols() != received.cols() {
        return false;
    }
    let mut unseen: Vec<Worker> = Worker::pair(color).to_vec();
    for row in 0..expected.rows() {
        for col in 0..expected.cols() {
            let before = expected.cell(row, col);
            let after = received.cell(row, col);
            if before == after {
                continue;
            }
            match (before, after) {
                (Cell::Height(h), Cell::Tower(height, worker)) if height == h => {
                    match unseen.iter().position(|w| *w == worker) {
                        Some(index) => {
                            unseen.remove(index);
                        }
                        None => return false,
                    }
                }
                _ => return false,
            }
        }
    }
    unseen.is_empty()
}

impl Player for LocalPlayer {
    fn register(&mut self) -> Result<String> {
        if self.color.is_some() {
            return Err(Fault::contract("cannot re-register a player mid-match"));
        }
        self.registered = true;
        Ok(self.name.clone())
    }

    fn place(&mut self, board: Grid, color: Color) -> Result<[Placement; 2]> {
        if !self.registered {
            return Err(Fault::contract("place() before register()"));
        }
        if self.color.is_some() {
            return Err(Fault::contract("place() called twice in one match"));
        }
        if !rules::is_legal_initial_board(&board, color) {
            return Err(Fault::contract(format!("not a legal initial board for {color}")));
        }
        self.color = Some(color);
        self.board.set_grid(board);
        let placements = self.strategy.placements(&mut self.board, color)?;
        self.placements = Some(placements);
        Ok(placements)
    }

    fn play(&mut self, board: Grid) -> Result<Option<Play>> {
        let color = self.color()?;
        if !rules::is_legal_board(&board, &[], MAX_HEIGHT) {
            return Err(Fault::contract("received board is not a legal game board"));
        }
        if self.verify_boards && !self.check_board(&board)? {
            return Err(Fault::illegal("received board is not reachable from the last known state"));
        }
        self.board.set_grid(board);
        self.strategy.play(&mut self.board, color)
    }

    fn notify(&mut self, _winner: &str) -> Result<()> {
        if !self.registered {
            return Err(Fault::contract("notify() on a player that never registered"));
        }
        self.registered = false;
        self.color = None;
        self.placements = None;
        self.board = Board::new();
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
