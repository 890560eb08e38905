use std::io::BufReader;
use std::net::TcpStream;
use std::time::Duration;

use serde_json::Value;

use super::Player;
use crate::santorini::prelude::*;
use crate::wire::{self, Command};

/// How long the administrator side waits on a remote answer before the
/// silence is treated as a forfeit.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

/// The administrator-side stand-in for a remote player. Owns the accepted
/// connection for as long as the player stays in the tournament; every
/// trait call is one framed request/response round trip. Only response
/// shape is checked here; the referee judges legality.
pub struct ProxyPlayer {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    name: String,
}

impl ProxyPlayer {
    pub fn new(stream: TcpStream) -> Result<ProxyPlayer> {
        stream
            .set_read_timeout(Some(RESPONSE_TIMEOUT))
            .map_err(|e| Fault::response(format!("could not configure socket: {e}")))?;
        let reader = stream
            .try_clone()
            .map(BufReader::new)
            .map_err(|e| Fault::response(format!("could not clone socket: {e}")))?;
        Ok(ProxyPlayer { stream, reader, name: String::new() })
    }

    /// One request out, one response in. A dead socket, an empty read, a
    /// garbled frame or an error token all surface as faults here.
    fn round_trip(&mut self, command: Command) -> Result<Value> {
        wire::write_frame(&mut self.stream, &command.to_value())
            .map_err(|e| Fault::response(format!("send failed: {e}")))?;

        let frame = wire::read_frame(&mut self.reader)
            .map_err(|e| Fault::response(format!("receive failed: {e}")))?
            .ok_or_else(|| Fault::response("remote closed the connection"))?;
        let value = wire::parse_frame(&frame)
            .map_err(|e| Fault::response(format!("unparseable response {frame:?}: {e}")))?;

        if let Some(fault) = value.as_str().and_then(Fault::from_token) {
            return Err(fault);
        }
        Ok(value)
    }
}

impl Player for ProxyPlayer {
    fn register(&mut self) -> Result<String> {
        let response = self.round_trip(Command::Register)?;
        self.name = wire::parse_name(&response)?;
        Ok(self.name.clone())
    }

    fn place(&mut self, board: Grid, color: Color) -> Result<[Placement; 2]> {
        let response = self.round_trip(Command::Place { color, board })?;
        wire::parse_placements(&response)
    }

    fn play(&mut self, board: Grid) -> Result<Option<Play>> {
        let response = self.round_trip(Command::Play { board })?;
        wire::parse_play_response(&response)
    }

    fn notify(&mut self, winner: &str) -> Result<()> {
        let response = self.round_trip(Command::GameOver { winner: winner.to_owned() })?;
        wire::parse_ack(&response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
