use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::utils::prelude::*;

pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 5;

/// A capped tower; nothing moves onto it and nothing builds on it.
pub const MAX_HEIGHT: u8 = 4;

/// The height a worker must step onto to win.
pub const WINNING_HEIGHT: u8 = 3;

/// Turn order: blue owns the first placement and the first play.
pub const COLORS: [Color; 2] = [Color::Blue, Color::White];

// A player colour.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue = 0,
    White = 1,
}

impl Color {
    /// The colour on the other side of the table.
    pub fn opponent(&self) -> Color {
        -*self
    }

    /// This colour's slot in the referee's turn order.
    pub fn turn_index(&self) -> usize {
        *self as usize
    }
}

impl Neg for Color {
    type Output = Color;
    fn neg(self) -> Self::Output {
        match self {
            Color::Blue => Color::White,
            Color::White => Color::Blue,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Blue => write!(f, "blue"),
            Color::White => write!(f, "white"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = Fault;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blue" => Ok(Color::Blue),
            "white" => Ok(Color::White),
            _ => Err(Fault::contract(format!("invalid colour {s}"))),
        }
    }
}

/// One of the four tokens on the board; each colour owns two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Worker {
    #[serde(rename = "blue1")]
    Blue1,
    #[serde(rename = "blue2")]
    Blue2,
    #[serde(rename = "white1")]
    White1,
    #[serde(rename = "white2")]
    White2,
}

impl Worker {
    /// All four worker tags, blue pair first.
    pub const ALL: [Worker; 4] = [Worker::Blue1, Worker::Blue2, Worker::White1, Worker::White2];

    /// The two workers a colour owns, in placement order.
    pub fn pair(color: Color) -> [Worker; 2] {
        match color {
            Color::Blue => [Worker::Blue1, Worker::Blue2],
            Color::White => [Worker::White1, Worker::White2],
        }
    }

    /// The `rank`-th worker of a colour, where rank is 1 or 2.
    pub fn of(color: Color, rank: u8) -> Result<Worker> {
        match (color, rank) {
            (Color::Blue, 1) => Ok(Worker::Blue1),
            (Color::Blue, 2) => Ok(Worker::Blue2),
            (Color::White, 1) => Ok(Worker::White1),
            (Color::White, 2) => Ok(Worker::White2),
            _ => Err(Fault::contract(format!("no worker {rank} for colour {color}"))),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Worker::Blue1 | Worker::Blue2 => Color::Blue,
            Worker::White1 | Worker::White2 => Color::White,
        }
    }
}

impl std::fmt::Display for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Worker::Blue1 => write!(f, "blue1"),
            Worker::Blue2 => write!(f, "blue2"),
            Worker::White1 => write!(f, "white1"),
            Worker::White2 => write!(f, "white2"),
        }
    }
}

impl std::str::FromStr for Worker {
    type Err = Fault;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blue1" => Ok(Worker::Blue1),
            "blue2" => Ok(Worker::Blue2),
            "white1" => Ok(Worker::White1),
            "white2" => Ok(Worker::White2),
            _ => Err(Fault::contract(format!("invalid worker {s}"))),
        }
    }
}

/// A compass key naming one of the eight neighbours of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The row/col delta this key stands for.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    /// Inverts both axes; `move(w, d)` followed by `move(w, d.opposite())`
    /// restores the pre-move board.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        write!(f, "{repr}")
    }
}

impl std::str::FromStr for Direction {
    type Err = Fault;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "N" => Ok(Direction::N),
            "NE" => Ok(Direction::NE),
            "E" => Ok(Direction::E),
            "SE" => Ok(Direction::SE),
            "S" => Ok(Direction::S),
            "SW" => Ok(Direction::SW),
            "W" => Ok(Direction::W),
            "NW" => Ok(Direction::NW),
            _ => Err(Fault::contract(format!("invalid direction {s}"))),
        }
    }
}
