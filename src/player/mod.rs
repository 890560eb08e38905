/*
 *  The two player shapes the referee can drive: a local strategy-backed
 *  player, and a proxy speaking for a remote one over a socket. The
 *  referee only ever sees this trait.
 */

mod driver;
mod local;
mod proxy;

pub use driver::PlayerDriver;
pub use local::LocalPlayer;
pub use proxy::ProxyPlayer;

use crate::santorini::prelude::*;

/// The capability set a match participant exposes. One match drives it as
/// `register`, `place`, `play`*, `notify`; anything outside that order is a
/// contract violation on the callee's side.
pub trait Player {
    /// Announces the player and yields its name.
    fn register(&mut self) -> Result<String>;

    /// Assigns a colour and asks for the two worker placements. The board
    /// carries no buildings and none of this player's workers.
    fn place(&mut self, board: Grid, color: Color) -> Result<[Placement; 2]>;

    /// Asks for this turn's play; `None` forfeits the turn.
    fn play(&mut self, board: Grid) -> Result<Option<Play>>;

    /// Announces the winner and resets the player for its next match.
    fn notify(&mut self, winner: &str) -> Result<()>;

    /// The registered name; empty until known.
    fn name(&self) -> &str;
}
