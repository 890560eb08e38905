use super::prelude::*;

/// The live form of a board: the grid plus a `worker -> spot` index kept in
/// lockstep with it. Every referee and every player owns its own instance;
/// only grids (shapes with equal values) ever travel between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    workers: HashMap<Worker, Spot>,
}

impl Board {
    /// An empty board at the default dimensions.
    pub fn new() -> Board {
        Board::with_dimensions(DEFAULT_ROWS, DEFAULT_COLS)
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> Board {
        Board { grid: Grid::empty(rows, cols), workers: HashMap::new() }
    }

    /// Replaces the whole state and rebuilds the worker index.
    pub fn set_grid(&mut self, grid: Grid) {
        self.workers = grid.workers().collect();
        self.grid = grid;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A value copy of the state, for handing to a player.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn worker_exists(&self, worker: Worker) -> bool {
        self.workers.contains_key(&worker)
    }

    /// Where a worker stands. Asking about a worker that is not on the
    /// board is a caller bug, not a rule violation.
    pub fn spot(&self, worker: Worker) -> Result<Spot> {
        self.workers
            .get(&worker)
            .copied()
            .ok_or_else(|| Fault::contract(format!("worker {worker} is not on the board")))
    }

    pub fn has_worker_at(&self, row: usize, col: usize) -> bool {
        self.grid.cell(row, col).is_occupied()
    }

    pub fn height_at(&self, row: usize, col: usize) -> u8 {
        self.grid.cell(row, col).height()
    }

    /// The neighbour of a worker's cell in a direction, if it is on the board.
    pub fn neighbour(&self, worker: Worker, dir: Direction) -> Result<Option<(usize, usize)>> {
        let spot = self.spot(worker)?;
        let (dr, dc) = dir.offset();
        let row = spot.row as isize + dr;
        let col = spot.col as isize + dc;
        if row >= 0 && col >= 0 && self.grid.in_bounds(row as usize, col as usize) {
            Ok(Some((row as usize, col as usize)))
        } else {
            Ok(None)
        }
    }

    pub fn neighbour_exists(&self, worker: Worker, dir: Direction) -> Result<bool> {
        Ok(self.neighbour(worker, dir)?.is_some())
    }

    /// Height of the named neighbour (of the underlying tower when a worker
    /// stands there); `None` when the neighbour is off the board.
    pub fn neighbour_height(&self, worker: Worker, dir: Direction) -> Result<Option<u8>> {
        Ok(self.neighbour(worker, dir)?.map(|(r, c)| self.height_at(r, c)))
    }

    /// Whether the named neighbour holds a worker; `None` off the board.
    pub fn neighbour_occupied(&self, worker: Worker, dir: Direction) -> Result<Option<bool>> {
        Ok(self.neighbour(worker, dir)?.map(|(r, c)| self.has_worker_at(r, c)))
    }

    /// Rewrites the source cell to its bare height and the destination to a
    /// tower-with-worker, and updates the index. Legality is the rule
    /// checker's business; this only requires the destination to exist.
    pub fn move_worker(&mut self, worker: Worker, dir: Direction) -> Result<()> {
        let spot = self.spot(worker)?;
        let (row, col) = self
            .neighbour(worker, dir)?
            .ok_or_else(|| Fault::contract(format!("no cell {dir} of {worker}")))?;
        let height = self.height_at(row, col);
        self.grid.0[row][col] = Cell::Tower(height, worker);
        self.grid.0[spot.row][spot.col] = Cell::Height(spot.height);
        self.workers.insert(worker, Spot { row, col, height });
        Ok(())
    }

    /// Raises the named neighbour by one storey. No worker moves.
    pub fn build(&mut self, worker: Worker, dir: Direction) -> Result<()> {
        let (row, col) = self
            .neighbour(worker, dir)?
            .ok_or_else(|| Fault::contract(format!("no cell {dir} of {worker}")))?;
        let height = self.height_at(row, col);
        self.grid.0[row][col] = Cell::Height(height + 1);
        Ok(())
    }

    /// Lowers the named neighbour by one storey; exact inverse of
    /// [`Board::build`], so strategies can search in place.
    pub fn undo_build(&mut self, worker: Worker, dir: Direction) -> Result<()> {
        let (row, col) = self
            .neighbour(worker, dir)?
            .ok_or_else(|| Fault::contract(format!("no cell {dir} of {worker}")))?;
        let height = self.height_at(row, col);
        if height == 0 {
            return Err(Fault::contract(format!("cannot unbuild a height-0 cell at ({row}, {col})")));
        }
        self.grid.0[row][col] = Cell::Height(height - 1);
        Ok(())
    }

    /// Wraps the target cell's height into a tower-with-worker.
    pub fn place_worker(&mut self, row: usize, col: usize, worker: Worker) -> Result<()> {
        if !self.grid.in_bounds(row, col) {
            return Err(Fault::illegal(format!("placement ({row}, {col}) is off the board")));
        }
        if self.has_worker_at(row, col) {
            return Err(Fault::illegal(format!("cell ({row}, {col}) already holds a worker")));
        }
        let height = self.height_at(row, col);
        self.grid.0[row][col] = Cell::Tower(height, worker);
        self.workers.insert(worker, Spot { row, col, height });
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn board_from(value: serde_json::Value) -> Board {
        let mut board = Board::new();
        board.set_grid(serde_json::from_value(value).unwrap());
        board
    }

    fn four_worker_board() -> Board {
        board_from(json!([
            [[0, "blue1"], 1, 2, 0, 0],
            [0, [1, "blue2"], 0, 0, 0],
            [0, 0, 3, 0, 0],
            [0, 0, 0, [0, "white1"], 0],
            [0, 0, 0, 0, [2, "white2"]]
        ]))
    }

    #[test]
    fn set_grid_rebuilds_the_index() {
        let board = four_worker_board();
        for worker in Worker::ALL {
            let spot = board.spot(worker).unwrap();
            assert_eq!(board.grid().cell(spot.row, spot.col).worker(), Some(worker));
            assert_eq!(board.grid().cell(spot.row, spot.col).height(), spot.height);
        }
        assert!(board.spot(Worker::Blue1).unwrap() == Spot { row: 0, col: 0, height: 0 });
    }

    #[test]
    fn move_and_opposite_restore_the_board() {
        let mut board = four_worker_board();
        let before = board.clone();

        board.move_worker(Worker::Blue2, Direction::E).unwrap();
        assert_eq!(board.spot(Worker::Blue2).unwrap().position(), Placement::new(1, 2));
        assert_ne!(board, before);

        board.move_worker(Worker::Blue2, Direction::E.opposite()).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn move_preserves_tower_heights() {
        let mut board = four_worker_board();
        board.move_worker(Worker::Blue1, Direction::E).unwrap();
        // vacated cell keeps its old height, entered cell keeps the tower
        assert_eq!(board.grid().cell(0, 0), Cell::Height(0));
        assert_eq!(board.grid().cell(0, 1), Cell::Tower(1, Worker::Blue1));
        assert_eq!(board.spot(Worker::Blue1).unwrap().height, 1);
    }

    #[test]
    fn build_and_undo_build_restore_the_board() {
        let mut board = four_worker_board();
        let before = board.clone();

        board.build(Worker::White1, Direction::N).unwrap();
        assert_eq!(board.height_at(2, 3), 1);

        board.undo_build(Worker::White1, Direction::N).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn undo_build_refuses_an_empty_cell() {
        let mut board = four_worker_board();
        assert!(matches!(
            board.undo_build(Worker::White1, Direction::E),
            Err(Fault::ContractViolation(_))
        ));
    }

    #[test]
    fn neighbours_off_the_board_do_not_exist() {
        let board = four_worker_board();
        // blue1 sits in the NW corner
        for dir in [Direction::N, Direction::NE, Direction::NW, Direction::W, Direction::SW] {
            assert!(!board.neighbour_exists(Worker::Blue1, dir).unwrap(), "{dir}");
            assert_eq!(board.neighbour_height(Worker::Blue1, dir).unwrap(), None);
        }
        for dir in [Direction::E, Direction::SE, Direction::S] {
            assert!(board.neighbour_exists(Worker::Blue1, dir).unwrap(), "{dir}");
        }
    }

    #[test]
    fn neighbour_queries_see_workers_and_heights() {
        let board = four_worker_board();
        assert_eq!(board.neighbour_height(Worker::Blue1, Direction::E).unwrap(), Some(1));
        assert_eq!(board.neighbour_occupied(Worker::Blue1, Direction::SE).unwrap(), Some(true));
        assert_eq!(board.neighbour_occupied(Worker::Blue1, Direction::E).unwrap(), Some(false));
    }

    #[test]
    fn placements_on_occupied_cells_are_illegal() {
        let mut board = four_worker_board();
        assert!(matches!(
            board.place_worker(0, 0, Worker::White1),
            Err(Fault::IllegalPlay(_))
        ));
        assert!(matches!(
            board.place_worker(9, 9, Worker::White1),
            Err(Fault::IllegalPlay(_))
        ));
    }

    #[test]
    fn missing_workers_are_contract_violations() {
        let board = Board::new();
        assert!(matches!(board.spot(Worker::Blue1), Err(Fault::ContractViolation(_))));
    }
}
