use std::io::BufRead;
use std::str::FromStr;

use serde_json::{json, Value};

use lib_santorini::prelude::*;

/// A line-oriented board console: each line carries one framed JSON value
/// of the form `[board, [command, worker, direction]]`, and each command
/// prints one JSON result. Handy for poking at board semantics by hand or
/// from a test script.
fn main() {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&line).map_err(|e| e.to_string()).and_then(evaluate) {
            Ok(result) => println!("{result}"),
            Err(message) => println!("{}", json!(message)),
        }
    }
}

/// Applies one console statement to a fresh board and reports the result.
fn evaluate(value: Value) -> std::result::Result<Value, String> {
    let (grid, statement): (Grid, (String, String, String)) =
        serde_json::from_value(value).map_err(|e| format!("malformed statement: {e}"))?;
    let (command, worker, direction) = statement;

    let worker = Worker::from_str(&worker).map_err(|e| e.to_string())?;
    let direction = Direction::from_str(&direction).map_err(|e| e.to_string())?;

    let mut board = Board::new();
    board.set_grid(grid);

    let report = |board: &Board| json!(board.grid());
    match command.as_str() {
        "move" => {
            board.move_worker(worker, direction).map_err(|e| e.to_string())?;
            Ok(report(&board))
        }
        "build" => {
            board.build(worker, direction).map_err(|e| e.to_string())?;
            Ok(report(&board))
        }
        "get-height" => {
            let height = board.neighbour_height(worker, direction).map_err(|e| e.to_string())?;
            Ok(json!(height))
        }
        "occupied?" => {
            let occupied = board.neighbour_occupied(worker, direction).map_err(|e| e.to_string())?;
            Ok(json!(occupied))
        }
        "neighboring-cell-exists?" => {
            let exists = board.neighbour_exists(worker, direction).map_err(|e| e.to_string())?;
            Ok(json!(exists))
        }
        other => Err(format!("command not supported: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_evaluate_against_the_given_board() {
        let board = json!([
            [[0, "blue1"], 1, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, [0, "white1"]],
            [0, 0, [0, "blue2"], 0, [0, "white2"]]
        ]);

        let height = evaluate(json!([board.clone(), ["get-height", "blue1", "E"]])).unwrap();
        assert_eq!(height, json!(1));

        let exists =
            evaluate(json!([board.clone(), ["neighboring-cell-exists?", "blue1", "N"]])).unwrap();
        assert_eq!(exists, json!(false));

        let occupied = evaluate(json!([board.clone(), ["occupied?", "white1", "S"]])).unwrap();
        assert_eq!(occupied, json!(true));

        let moved = evaluate(json!([board, ["move", "blue1", "S"]])).unwrap();
        assert_eq!(moved[1][0], json!([0, "blue1"]));
        assert_eq!(moved[0][0], json!(0));
    }

    #[test]
    fn bad_statements_report_errors() {
        let board = json!([[0, 0], [0, [0, "blue1"]]]);
        assert!(evaluate(json!([board.clone(), ["fly", "blue1", "N"]])).is_err());
        assert!(evaluate(json!([board, ["move", "blue3", "N"]])).is_err());
        assert!(evaluate(json!(["not a board"])).is_err());
    }
}
