use std::io::BufReader;
use std::net::TcpStream;

use serde_json::{json, Value};

use super::{LocalPlayer, Player};
use crate::santorini::prelude::*;
use crate::wire::{self, Command, ACK};

/// The remote-side loop: one outbound connection to the administrator, and
/// a wrapped local player that answers whatever arrives. Runs until the
/// administrator hangs up. A fault from the wrapped player is answered
/// with its single error token, after which the driver closes; the other
/// side treats that as a forfeit.
pub struct PlayerDriver {
    player: LocalPlayer,
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl PlayerDriver {
    pub fn connect(host: &str, port: u16, player: LocalPlayer) -> anyhow::Result<PlayerDriver> {
        let stream = TcpStream::connect((host, port))?;
        let reader = BufReader::new(stream.try_clone()?);
        log::info!("connected to administrator at {host}:{port}");
        Ok(PlayerDriver { player, stream, reader })
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            let frame = match wire::read_frame(&mut self.reader) {
                Ok(Some(frame)) if !frame.is_empty() => frame,
                Ok(Some(_)) => continue,
                Ok(None) => {
                    log::info!("administrator closed the connection");
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("connection lost: {e}");
                    return Ok(());
                }
            };

            let answer = parse_frame_to_command(&frame)
                .and_then(|command| dispatch(&mut self.player, command));
            match answer {
                Ok(response) => wire::write_frame(&mut self.stream, &response)?,
                Err(fault) => {
                    log::warn!("match over for us: {fault}");
                    let token = fault.token().unwrap_or("IllegalPlay");
                    wire::write_frame(&mut self.stream, &json!(token))?;
                    return Ok(());
                }
            }
        }
    }
}

fn parse_frame_to_command(frame: &str) -> Result<Command> {
    let value = wire::parse_frame(frame)
        .map_err(|e| Fault::invalid(format!("unparseable frame {frame:?}: {e}")))?;
    Command::from_value(&value)
}

fn dispatch(player: &mut LocalPlayer, command: Command) -> Result<Value> {
    match command {
        Command::Register => {
            let name = player.register()?;
            Ok(json!(name))
        }
        Command::Place { color, board } => {
            let placements = player.place(board, color)?;
            Ok(json!(placements))
        }
        Command::Play { board } => {
            let play = player.play(board)?;
            match play {
                Some(play) => Ok(json!(play)),
                None => Ok(json!([])),
            }
        }
        Command::GameOver { winner } => {
            player.notify(&winner)?;
            Ok(json!(ACK))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;
    use crate::player::ProxyPlayer;
    use crate::referee::Referee;
    use crate::strategy::{GreedyStrategy, RandomStrategy};

    /// Full loopback exchange: a proxy on the accepted connection, a driver
    /// on the dialled one, and a referee running a complete match between a
    /// local player and the proxied remote.
    #[test]
    fn a_match_runs_end_to_end_over_a_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let remote = std::thread::spawn(move || {
            let player = LocalPlayer::new("remote", Box::new(RandomStrategy));
            let driver = PlayerDriver::connect("127.0.0.1", port, player).unwrap();
            driver.run().unwrap();
        });

        let (stream, _) = listener.accept().unwrap();
        let mut proxy = ProxyPlayer::new(stream).unwrap();
        assert_eq!(proxy.register().unwrap(), "remote");

        let mut local: Box<dyn Player> = Box::new(LocalPlayer::new("home", Box::new(GreedyStrategy)));
        let mut remote_side: Box<dyn Player> = Box::new(proxy);
        let outcome = Referee::new(local.as_mut(), remote_side.as_mut()).play_game();
        assert!(outcome.winner < 2);

        // dropping the proxy closes the socket; the driver sees EOF
        drop(remote_side);
        remote.join().unwrap();
    }

    #[test]
    fn faults_become_a_token_and_a_hangup() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let remote = std::thread::spawn(move || {
            let player = LocalPlayer::new("remote", Box::new(RandomStrategy));
            let driver = PlayerDriver::connect("127.0.0.1", port, player).unwrap();
            driver.run().unwrap();
        });

        let (stream, _) = listener.accept().unwrap();
        let mut proxy = ProxyPlayer::new(stream).unwrap();
        // playing before placing violates the wrapped player's protocol
        let result = proxy.play(Grid::empty(5, 5));
        assert!(matches!(result, Err(Fault::ContractViolation(_))));

        drop(proxy);
        remote.join().unwrap();
    }
}
