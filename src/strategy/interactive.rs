use std::io::Write;
use std::str::FromStr;

use super::Strategy;
use crate::santorini::prelude::*;

/// Reads placements and plays from the console. Legality is not checked
/// here; an operator who types an illegal play forfeits like any remote.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractiveStrategy;

impl InteractiveStrategy {
    fn prompt(&self, text: &str) -> Result<String> {
        print!("{text}");
        std::io::stdout()
            .flush()
            .map_err(|e| Fault::contract(format!("console unavailable: {e}")))?;
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .map_err(|e| Fault::contract(format!("console unavailable: {e}")))?;
        Ok(line.trim().to_owned())
    }
}

impl Strategy for InteractiveStrategy {
    fn placements(&mut self, board: &mut Board, color: Color) -> Result<[Placement; 2]> {
        println!("You are playing {color}.");
        println!("{board}");

        let mut picked = vec![];
        while picked.len() != 2 {
            let line = self.prompt("Place a worker as row, col: ")?;
            let fields: Vec<_> = line.split(',').map(str::trim).collect();
            match fields.as_slice() {
                [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                    (Ok(row), Ok(col)) => picked.push(Placement::new(row, col)),
                    _ => println!("row and col must be integers."),
                },
                _ => println!("row and col must be comma separated."),
            }
        }
        Ok([picked[0], picked[1]])
    }

    fn play(&mut self, board: &mut Board, color: Color) -> Result<Option<Play>> {
        println!("{board}");

        loop {
            let worker = self.prompt(&format!("Pick a {color} worker: "))?;
            let move_dir = self.prompt("Move direction: ")?;
            let build_dir = self.prompt("Build direction (empty to claim the win): ")?;

            let worker = Worker::from_str(&worker);
            let move_dir = Direction::from_str(&move_dir.to_uppercase());
            match (worker, move_dir) {
                (Ok(worker), Ok(move_dir)) if build_dir.is_empty() => {
                    return Ok(Some(Play::win(worker, move_dir)));
                }
                (Ok(worker), Ok(move_dir)) => {
                    match Direction::from_str(&build_dir.to_uppercase()) {
                        Ok(build_dir) => return Ok(Some(Play::full(worker, move_dir, build_dir))),
                        Err(_) => println!("Unrecognized build direction."),
                    }
                }
                _ => println!("Unrecognized worker or direction."),
            }
        }
    }
}
