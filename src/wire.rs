//! The framed-JSON protocol between the administrator side and the player
//! side. One value per newline-terminated line, UTF-8. Decoding a frame
//! into a command or a response is all shape work; legality stays with the
//! rule checker on whichever side cares.

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use crate::santorini::prelude::*;

/// The acknowledgement a player sends back for `["Game Over", name]`.
pub const ACK: &str = "OK";

/// A request the administrator/referee side sends to a player side.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Register,
    Place { color: Color, board: Grid },
    Play { board: Grid },
    GameOver { winner: String },
}

impl Command {
    pub fn to_value(&self) -> Value {
        match self {
            Command::Register => json!(["Register"]),
            Command::Place { color, board } => json!(["Place", color, board]),
            Command::Play { board } => json!(["Play", board]),
            Command::GameOver { winner } => json!(["Game Over", winner]),
        }
    }

    /// Decodes one framed value into a command. Anything that does not
    /// match the four request shapes is an `InvalidCommand`.
    pub fn from_value(value: &Value) -> Result<Command> {
        let items = value
            .as_array()
            .ok_or_else(|| Fault::invalid(format!("expected a command array, got {value}")))?;

        match items.first().and_then(Value::as_str) {
            Some("Register") if items.len() == 1 => Ok(Command::Register),
            Some("Place") if items.len() == 3 && rules::is_valid_board(&items[2]) => {
                let color = serde_json::from_value(items[1].clone())
                    .map_err(|_| Fault::invalid(format!("bad colour in {value}")))?;
                let board = serde_json::from_value(items[2].clone())
                    .map_err(|_| Fault::invalid(format!("bad board in {value}")))?;
                Ok(Command::Place { color, board })
            }
            Some("Play") if items.len() == 2 && rules::is_valid_board(&items[1]) => {
                let board = serde_json::from_value(items[1].clone())
                    .map_err(|_| Fault::invalid(format!("bad board in {value}")))?;
                Ok(Command::Play { board })
            }
            Some("Game Over") if items.len() == 2 && items[1].is_string() => {
                let winner = items[1].as_str().unwrap_or_default().to_owned();
                Ok(Command::GameOver { winner })
            }
            _ => Err(Fault::invalid(format!("unrecognized command {value}"))),
        }
    }
}

/// Reads one frame; `None` on a cleanly closed peer.
pub fn read_frame(reader: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Decodes a frame into a single JSON value.
pub fn parse_frame(frame: &str) -> serde_json::Result<Value> {
    serde_json::from_str(frame)
}

/// Writes one value as a frame and flushes it onto the wire.
pub fn write_frame(writer: &mut impl Write, value: &Value) -> std::io::Result<()> {
    let mut encoded = serde_json::to_string(value)?;
    encoded.push('\n');
    writer.write_all(encoded.as_bytes())?;
    writer.flush()
}

// Response decoding, used by the proxy side. Each checks shape only and
// reports anything else as an IllegalResponse.

pub fn parse_name(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Fault::response(format!("expected a name string, got {value}")))
}

pub fn parse_placements(value: &Value) -> Result<[Placement; 2]> {
    if !rules::is_valid_placement(value) {
        return Err(Fault::response(format!("malformed placement response {value}")));
    }
    let placements: Vec<Placement> = serde_json::from_value(value.clone())
        .map_err(|e| Fault::response(format!("malformed placement response: {e}")))?;
    Ok([placements[0], placements[1]])
}

/// `[]` is a deliberate forfeit; anything else must be a play.
pub fn parse_play_response(value: &Value) -> Result<Option<Play>> {
    if value.as_array().is_some_and(Vec::is_empty) {
        return Ok(None);
    }
    if !rules::is_valid_play(value) {
        return Err(Fault::response(format!("malformed play response {value}")));
    }
    let play = serde_json::from_value(value.clone())
        .map_err(|e| Fault::response(format!("malformed play response: {e}")))?;
    Ok(Some(play))
}

pub fn parse_ack(value: &Value) -> Result<()> {
    if value.as_str() == Some(ACK) {
        Ok(())
    } else {
        Err(Fault::response(format!("expected {ACK:?}, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_through_values() {
        let commands = [
            Command::Register,
            Command::Place { color: Color::White, board: Grid::empty(5, 5) },
            Command::Play { board: Grid::empty(5, 5) },
            Command::GameOver { winner: "garth".into() },
        ];
        for command in commands {
            let decoded = Command::from_value(&command.to_value()).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn junk_commands_are_invalid() {
        for junk in [
            json!(["Regster"]),
            json!(["Register", 1]),
            json!(["Place", "mauve", [[0]]]),
            json!(["Play"]),
            json!(["Game Over", 7]),
            json!(42),
        ] {
            assert!(
                matches!(Command::from_value(&junk), Err(Fault::InvalidCommand(_))),
                "{junk}"
            );
        }
    }

    #[test]
    fn frames_carry_one_value_per_line() {
        let mut sink: Vec<u8> = vec![];
        write_frame(&mut sink, &json!(["Register"])).unwrap();
        write_frame(&mut sink, &json!("OK")).unwrap();

        let mut reader = std::io::BufReader::new(sink.as_slice());
        let first = read_frame(&mut reader).unwrap().unwrap();
        assert_eq!(parse_frame(&first).unwrap(), json!(["Register"]));
        let second = read_frame(&mut reader).unwrap().unwrap();
        assert_eq!(parse_frame(&second).unwrap(), json!("OK"));
        assert_eq!(read_frame(&mut reader).unwrap(), None);
    }

    #[test]
    fn play_responses_distinguish_forfeit_from_garbage() {
        assert_eq!(parse_play_response(&json!([])).unwrap(), None);
        assert!(parse_play_response(&json!(["blue1", ["N"]])).unwrap().is_some());
        assert!(matches!(
            parse_play_response(&json!(["blue1", "N"])),
            Err(Fault::IllegalResponse(_))
        ));
    }

    #[test]
    fn acks_must_be_literal() {
        assert!(parse_ack(&json!("OK")).is_ok());
        assert!(parse_ack(&json!("ok")).is_err());
        assert!(parse_ack(&json!(["OK"])).is_err());
    }
}
