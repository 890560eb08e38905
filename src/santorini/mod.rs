/*
 *  The Santorini base game: board state, legality rules, wire-shaped values.
 */

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod consts;
pub mod coords;
pub(crate) mod play;
pub mod rules;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::Board,
        cell::{Cell, Grid},
        consts::*,
        coords::{Placement, Spot},
        play::Play,
        rules,
    };
}
