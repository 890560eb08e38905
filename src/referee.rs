use crate::player::Player;
use crate::santorini::prelude::*;

/// What one match produced: which side won (0 or 1, in seating order) and
/// whether the loser went down for breaking the rules rather than by being
/// outplayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: usize,
    pub cheating: bool,
}

/// Runs exactly one match. Seat 0 plays blue and acts first; seat 1 plays
/// white. The referee keeps the master board and never trusts a player
/// response it has not checked.
pub struct Referee<'a> {
    players: [&'a mut dyn Player; 2],
    names: [String; 2],
    board: Board,
    turn: usize,
}

impl<'a> Referee<'a> {
    pub fn new(first: &'a mut dyn Player, second: &'a mut dyn Player) -> Referee<'a> {
        Referee {
            players: [first, second],
            names: [String::new(), String::new()],
            board: Board::new(),
            turn: 0,
        }
    }

    /// Drives registration, placement and alternating plays to a verdict.
    /// Rule violations, malformed responses and dead sockets all resolve
    /// the same way: the actor at fault loses, flagged as cheating.
    pub fn play_game(mut self) -> MatchOutcome {
        let outcome = match self.run() {
            Ok(winner) => MatchOutcome { winner, cheating: false },
            Err(fault) => {
                let winner = 1 - self.turn;
                log::warn!(
                    "{} forfeits: {fault}",
                    self.display_name(self.turn)
                );
                MatchOutcome { winner, cheating: true }
            }
        };

        log::info!("match over, {} wins", self.display_name(outcome.winner));
        self.notify_both(outcome.winner);
        outcome
    }

    fn run(&mut self) -> Result<usize> {
        for seat in 0..2 {
            self.turn = seat;
            self.names[seat] = self.players[seat].register()?;
            log::debug!("seat {seat} registered as {}", self.names[seat]);
        }

        for seat in 0..2 {
            self.turn = seat;
            let color = COLORS[seat];
            let placements = self.players[seat].place(self.board.snapshot(), color)?;
            self.apply_placements(color, placements)?;
            log::debug!("{color} placed at {} and {}", placements[0], placements[1]);
        }

        self.turn = 0;
        loop {
            match self.players[self.turn].play(self.board.snapshot())? {
                None => {
                    // no acceptable play: the current actor resigns the match
                    log::info!("{} has no play and forfeits", self.display_name(self.turn));
                    return Ok(1 - self.turn);
                }
                Some(play) => {
                    if self.apply_play(&play)? {
                        return Ok(self.turn);
                    }
                }
            }
            self.turn = 1 - self.turn;
        }
    }

    fn apply_placements(&mut self, color: Color, placements: [Placement; 2]) -> Result<()> {
        for (index, placement) in placements.iter().enumerate() {
            if !rules::is_legal_placement(&self.board, *placement) {
                return Err(Fault::illegal(format!("bad placement {placement} by {color}")));
            }
            let worker = Worker::of(color, index as u8 + 1)?;
            self.board.place_worker(placement.row, placement.col, worker)?;
        }
        Ok(())
    }

    /// Checks and applies one play against the master board. Returns true
    /// when the play wins the match.
    fn apply_play(&mut self, play: &Play) -> Result<bool> {
        if play.worker.color() != COLORS[self.turn] {
            return Err(Fault::illegal(format!(
                "{} tried to act with {}",
                self.display_name(self.turn),
                play.worker
            )));
        }
        if !rules::is_legal_play(&mut self.board, play)? {
            return Err(Fault::illegal(format!(
                "illegal play {play} by {}",
                self.display_name(self.turn)
            )));
        }

        log::debug!("{} plays {play}", self.display_name(self.turn));
        if play.is_winning() {
            return Ok(true);
        }
        self.board.move_worker(play.worker, play.move_dir)?;
        if let Some(build_dir) = play.build_dir {
            self.board.build(play.worker, build_dir)?;
        }
        Ok(false)
    }

    fn notify_both(&mut self, winner: usize) {
        let name = self.display_name(winner).to_owned();
        for player in &mut self.players {
            if let Err(fault) = player.notify(&name) {
                // the loser may already be gone; the match is decided anyway
                log::debug!("notify failed: {fault}");
            }
        }
    }

    fn display_name(&self, seat: usize) -> &str {
        let registered = self.names[seat].as_str();
        if registered.is_empty() { self.players[seat].name() } else { registered }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::player::{LocalPlayer, Player};
    use crate::strategy::RandomStrategy;

    /// A player that answers from a script instead of a strategy, so the
    /// referee can be marched through exact scenarios.
    struct Scripted {
        name: String,
        placements: [Placement; 2],
        plays: Vec<Option<Play>>,
        notified: Vec<String>,
    }

    impl Scripted {
        fn new(name: &str, placements: [(usize, usize); 2]) -> Scripted {
            Scripted {
                name: name.into(),
                placements: placements.map(|(r, c)| Placement::new(r, c)),
                plays: vec![],
                notified: vec![],
            }
        }

        fn with_plays(mut self, plays: Vec<Option<Play>>) -> Scripted {
            self.plays = plays;
            self
        }
    }

    impl Player for Scripted {
        fn register(&mut self) -> Result<String> {
            Ok(self.name.clone())
        }

        fn place(&mut self, _board: Grid, _color: Color) -> Result<[Placement; 2]> {
            Ok(self.placements)
        }

        fn play(&mut self, _board: Grid) -> Result<Option<Play>> {
            if self.plays.is_empty() {
                Ok(None)
            } else {
                Ok(self.plays.remove(0))
            }
        }

        fn notify(&mut self, winner: &str) -> Result<()> {
            self.notified.push(winner.to_owned());
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn a_winning_step_ends_the_match_cleanly() {
        // blue1 oscillates between (0,0) and (1,0), pumping both cells up a
        // storey per turn, and finally steps onto the height-3 tower. White
        // shuffles in the far corner and never interferes.
        let up = Play::full(Worker::Blue1, Direction::N, Direction::S);
        let down = Play::full(Worker::Blue1, Direction::S, Direction::N);
        let mut blue = Scripted::new("blue-side", [(0, 0), (2, 2)]).with_plays(vec![
            Some(down),
            Some(up),
            Some(down),
            Some(up),
            Some(down),
            Some(Play::win(Worker::Blue1, Direction::N)),
        ]);
        let wup = Play::full(Worker::White1, Direction::N, Direction::S);
        let wdown = Play::full(Worker::White1, Direction::S, Direction::N);
        let mut white = Scripted::new("white-side", [(4, 4), (4, 2)])
            .with_plays(vec![Some(wup), Some(wdown), Some(wup), Some(wdown), Some(wup)]);

        let outcome = Referee::new(&mut blue, &mut white).play_game();
        assert_eq!(outcome, MatchOutcome { winner: 0, cheating: false });
        assert_eq!(blue.notified, vec!["blue-side".to_owned()]);
        assert_eq!(white.notified, vec!["blue-side".to_owned()]);
    }

    #[test]
    fn an_immediate_winning_play_is_honoured() {
        // build the position by hand and check the referee's play logic
        let mut referee_board = Board::new();
        referee_board.set_grid(
            serde_json::from_value(json!([
                [[2, "white1"], 0, 0, 0, [0, "blue1"]],
                [3, 0, 0, [0, "blue2"], 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, [0, "white2"]],
                [0, 0, 0, 0, 0]
            ]))
            .unwrap(),
        );

        let mut blue = Scripted::new("b", [(0, 4), (1, 3)]);
        let mut white = Scripted::new("w", [(0, 0), (3, 4)]);
        let mut referee = Referee::new(&mut blue, &mut white);
        referee.board = referee_board;
        referee.turn = 1;

        let won = referee.apply_play(&Play::win(Worker::White1, Direction::S)).unwrap();
        assert!(won);
    }

    #[test]
    fn empty_plays_forfeit_without_cheating() {
        let mut blue = Scripted::new("quitter", [(0, 0), (0, 1)]); // no plays scripted
        let mut white = Scripted::new("patient", [(4, 4), (4, 3)]);

        let outcome = Referee::new(&mut blue, &mut white).play_game();
        assert_eq!(outcome, MatchOutcome { winner: 1, cheating: false });
        assert_eq!(blue.notified, vec!["patient".to_owned()]);
    }

    #[test]
    fn acting_with_the_opponents_worker_is_cheating() {
        let mut blue = Scripted::new("builder", [(0, 0), (0, 1)]).with_plays(vec![
            Some(Play::full(Worker::Blue1, Direction::S, Direction::N)),
        ]);
        let mut white = Scripted::new("imposter", [(4, 4), (4, 3)]).with_plays(vec![
            Some(Play::full(Worker::Blue1, Direction::E, Direction::N)),
        ]);

        let outcome = Referee::new(&mut blue, &mut white).play_game();
        assert_eq!(outcome, MatchOutcome { winner: 0, cheating: true });
    }

    #[test]
    fn moves_into_capped_towers_are_cheating() {
        let mut referee_board = Board::new();
        referee_board.set_grid(
            serde_json::from_value(json!([
                [[0, "blue1"], 4, 0, 0, 0],
                [0, 0, 0, [0, "blue2"], 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, [0, "white2"]],
                [0, 0, 0, 0, [0, "white1"]]
            ]))
            .unwrap(),
        );

        let mut blue = Scripted::new("b", [(0, 0), (1, 3)]);
        let mut white = Scripted::new("w", [(4, 4), (3, 4)]);
        let mut referee = Referee::new(&mut blue, &mut white);
        referee.board = referee_board;

        let fault = referee
            .apply_play(&Play::full(Worker::Blue1, Direction::E, Direction::N))
            .unwrap_err();
        assert!(matches!(fault, Fault::IllegalPlay(_)));
    }

    #[test]
    fn climb_delta_violations_forfeit_the_actor() {
        let mut referee_board = Board::new();
        referee_board.set_grid(
            serde_json::from_value(json!([
                [[0, "blue1"], 2, 0, 0, 0],
                [0, 0, 0, [0, "blue2"], 0],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, [0, "white2"]],
                [0, 0, 0, 0, [0, "white1"]]
            ]))
            .unwrap(),
        );

        let mut blue = Scripted::new("b", [(0, 0), (1, 3)]);
        let mut white = Scripted::new("w", [(4, 4), (3, 4)]);
        let mut referee = Referee::new(&mut blue, &mut white);
        referee.board = referee_board;

        let fault = referee
            .apply_play(&Play::full(Worker::Blue1, Direction::E, Direction::W))
            .unwrap_err();
        assert!(matches!(fault, Fault::IllegalPlay(_)));
    }

    #[test]
    fn colliding_placements_forfeit_the_second_player() {
        let mut blue = Scripted::new("first", [(2, 2), (3, 3)]);
        let mut white = Scripted::new("collider", [(2, 2), (0, 0)]);

        let outcome = Referee::new(&mut blue, &mut white).play_game();
        assert_eq!(outcome, MatchOutcome { winner: 0, cheating: true });
    }

    #[test]
    fn self_colliding_placements_are_caught_too() {
        let mut blue = Scripted::new("twins", [(2, 2), (2, 2)]);
        let mut white = Scripted::new("w", [(0, 0), (0, 1)]);

        let outcome = Referee::new(&mut blue, &mut white).play_game();
        assert_eq!(outcome, MatchOutcome { winner: 1, cheating: true });
    }

    #[test]
    fn full_matches_between_live_strategies_finish() {
        for _ in 0..5 {
            let mut a = LocalPlayer::new("rng-a", Box::new(RandomStrategy));
            let mut b = LocalPlayer::new("rng-b", Box::new(RandomStrategy));
            let outcome = Referee::new(&mut a, &mut b).play_game();
            assert!(outcome.winner < 2);
        }
    }
}
