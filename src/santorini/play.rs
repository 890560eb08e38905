use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, SerializeTuple, Serializer};

use super::consts::{Direction, Worker};

/// One turn's worth of intent: a move, optionally followed by a build.
/// The build-less form claims a win by stepping onto the winning height.
/// Wire form: `[worker, [move]]` or `[worker, [move, build]]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Play {
    pub worker: Worker,
    pub move_dir: Direction,
    pub build_dir: Option<Direction>,
}

impl Play {
    pub fn win(worker: Worker, move_dir: Direction) -> Play {
        Play { worker, move_dir, build_dir: None }
    }

    pub fn full(worker: Worker, move_dir: Direction, build_dir: Direction) -> Play {
        Play { worker, move_dir, build_dir: Some(build_dir) }
    }

    /// A one-direction play is only ever sent to claim a win.
    pub fn is_winning(&self) -> bool {
        self.build_dir.is_none()
    }

    pub fn directions(&self) -> Vec<Direction> {
        match self.build_dir {
            Some(build) => vec![self.move_dir, build],
            None => vec![self.move_dir],
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.build_dir {
            Some(build) => write!(f, "[{}, [{}, {}]]", self.worker, self.move_dir, build),
            None => write!(f, "[{}, [{}]]", self.worker, self.move_dir),
        }
    }
}

impl Serialize for Play {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.worker)?;
        tuple.serialize_element(&self.directions())?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Play {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Play, D::Error> {
        let (worker, directions) = <(Worker, Vec<Direction>)>::deserialize(deserializer)?;
        match directions.as_slice() {
            [move_dir] => Ok(Play::win(worker, *move_dir)),
            [move_dir, build_dir] => Ok(Play::full(worker, *move_dir, *build_dir)),
            other => Err(D::Error::custom(format!(
                "a play carries one or two directions, not {}",
                other.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn both_wire_forms_decode() {
        let win: Play = serde_json::from_value(json!(["white1", ["N"]])).unwrap();
        assert_eq!(win, Play::win(Worker::White1, Direction::N));
        assert!(win.is_winning());

        let full: Play = serde_json::from_value(json!(["blue2", ["SE", "W"]])).unwrap();
        assert_eq!(full, Play::full(Worker::Blue2, Direction::SE, Direction::W));
        assert_eq!(serde_json::to_value(full).unwrap(), json!(["blue2", ["SE", "W"]]));
    }

    #[test]
    fn direction_counts_are_bounded() {
        assert!(serde_json::from_value::<Play>(json!(["blue1", []])).is_err());
        assert!(serde_json::from_value::<Play>(json!(["blue1", ["N", "E", "S"]])).is_err());
    }
}
