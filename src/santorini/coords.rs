use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// A cell position on the board; wire form `[row, col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_tuple, Deserialize_tuple)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}

impl Placement {
    pub fn new(row: usize, col: usize) -> Placement {
        Placement { row, col }
    }

    /// Euclidean distance between two cells.
    pub fn distance(&self, other: &Placement) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A worker's entry in the board index: where it stands and how high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spot {
    pub row: usize,
    pub col: usize,
    pub height: u8,
}

impl Spot {
    pub fn position(&self) -> Placement {
        Placement { row: self.row, col: self.col }
    }
}

#[cfg(test)]
mod tests {
    use super::Placement;

    #[test]
    fn wire_form_is_a_pair() {
        let p = Placement::new(2, 4);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[2,4]");
        let back: Placement = serde_json::from_str("[0,3]").unwrap();
        assert_eq!(back, Placement::new(0, 3));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Placement::new(0, 0);
        let b = Placement::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < f64::EPSILON);
    }
}
