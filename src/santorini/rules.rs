//! Purely functional legality predicates over boards, plus shape-only
//! checks for values arriving off the wire. Nothing in here keeps state;
//! `is_legal_play` simulates on the caller's board and undoes itself.

use serde_json::Value;

use super::prelude::*;

/// A worker may step to an existing, unoccupied, uncapped neighbour at most
/// one storey above its own tower.
pub fn is_valid_move(board: &Board, worker: Worker, dir: Direction) -> Result<bool> {
    let Some(target) = board.neighbour_height(worker, dir)? else {
        return Ok(false);
    };
    let spot = board.spot(worker)?;
    Ok(board.neighbour_occupied(worker, dir)? == Some(false)
        && target != MAX_HEIGHT
        && target as i16 - spot.height as i16 <= 1)
}

/// Building needs an existing, unoccupied, uncapped neighbour; height
/// deltas do not matter.
pub fn is_valid_build(board: &Board, worker: Worker, dir: Direction) -> Result<bool> {
    let Some(target) = board.neighbour_height(worker, dir)? else {
        return Ok(false);
    };
    Ok(board.neighbour_occupied(worker, dir)? == Some(false) && target != MAX_HEIGHT)
}

/// Stepping onto the winning height. Only meaningful for a move that is
/// already valid.
pub fn is_winning_move(board: &Board, worker: Worker, dir: Direction) -> Result<bool> {
    Ok(board.neighbour_height(worker, dir)? == Some(WINNING_HEIGHT))
}

/// The full play check. A one-direction play must be a winning move; a
/// two-direction play must be a non-winning move whose build is valid on
/// the post-move board. The move simulation is undone before returning.
pub fn is_legal_play(board: &mut Board, play: &Play) -> Result<bool> {
    let Play { worker, move_dir, build_dir } = *play;

    if !is_valid_move(board, worker, move_dir)? {
        return Ok(false);
    }
    if is_winning_move(board, worker, move_dir)? {
        return Ok(build_dir.is_none());
    }
    let Some(build_dir) = build_dir else {
        return Ok(false);
    };

    board.move_worker(worker, move_dir)?;
    let legal = is_valid_build(board, worker, build_dir)?;
    board.move_worker(worker, move_dir.opposite())?;
    Ok(legal)
}

/// In bounds and unoccupied.
pub fn is_legal_placement(board: &Board, placement: Placement) -> bool {
    board.grid().in_bounds(placement.row, placement.col)
        && !board.has_worker_at(placement.row, placement.col)
}

/// Semantic validity of a grid. `unset` names workers that are not on the
/// board yet but will be accounted for later; `max_height` bounds every
/// cell (worker cells are additionally capped at two storeys, since no
/// worker survives on a higher tower between turns).
pub fn is_legal_board(grid: &Grid, unset: &[Worker], max_height: u8) -> bool {
    let mut seen: Vec<Worker> = unset.to_vec();
    for row in &grid.0 {
        for cell in row {
            let bound = match cell {
                Cell::Height(_) => max_height,
                Cell::Tower(_, worker) => {
                    if seen.contains(worker) {
                        return false;
                    }
                    seen.push(*worker);
                    max_height.min(2)
                }
            };
            if cell.height() > bound {
                return false;
            }
        }
    }
    if unset.is_empty() {
        seen.len() == 4
    } else {
        seen.len() == 2 || seen.len() == 4
    }
}

/// A board a player may be asked to place on: all heights zero, own
/// workers absent, opponent workers either both present or both absent.
pub fn is_legal_initial_board(grid: &Grid, color: Color) -> bool {
    is_legal_board(grid, &Worker::pair(color), 0)
}

// Shape-only predicates for raw wire values. None of these touch game
// semantics; they answer "could this decode at all".

pub fn is_valid_color(value: &Value) -> bool {
    serde_json::from_value::<Color>(value.clone()).is_ok()
}

pub fn is_valid_worker(value: &Value) -> bool {
    serde_json::from_value::<Worker>(value.clone()).is_ok()
}

pub fn is_valid_direction(value: &Value) -> bool {
    serde_json::from_value::<Direction>(value.clone()).is_ok()
}

/// Exactly two `[row, col]` integer pairs.
pub fn is_valid_placement(value: &Value) -> bool {
    matches!(
        serde_json::from_value::<Vec<Placement>>(value.clone()),
        Ok(placements) if placements.len() == 2
    )
}

/// `[worker, [dir]]` or `[worker, [dir, dir]]`.
pub fn is_valid_play(value: &Value) -> bool {
    serde_json::from_value::<Play>(value.clone()).is_ok()
}

/// A rectangular grid of cells, each an integer or `[height, worker]`.
pub fn is_valid_board(value: &Value) -> bool {
    matches!(
        serde_json::from_value::<Grid>(value.clone()),
        Ok(grid) if grid.is_rectangular()
    )
}
