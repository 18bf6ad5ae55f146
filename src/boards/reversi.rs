use crate::board::{Board, GameOutcome, Position, Side};
use crate::error::LayoutError;

pub const SIZE: i32 = 8;

const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

type Cells = [[Option<Side>; SIZE as usize]; SIZE as usize];

pub fn in_bounds(pos: Position) -> bool {
    (0..SIZE).contains(&pos.x) && (0..SIZE).contains(&pos.y)
}

/// The set of empty cells, one bit per cell, iterated in row-major order.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub struct FreeCells(u64);

impl FreeCells {
    fn bit(pos: Position) -> u64 {
        1u64 << (pos.y * SIZE + pos.x)
    }

    pub fn contains(self, pos: Position) -> bool {
        in_bounds(pos) && self.0 & Self::bit(pos) != 0
    }

    fn insert(&mut self, pos: Position) {
        self.0 |= Self::bit(pos);
    }

    fn remove(&mut self, pos: Position) {
        self.0 &= !Self::bit(pos);
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Position> {
        (0..SIZE * SIZE)
            .filter(move |index| self.0 & (1u64 << index) != 0)
            .map(|index| Position::new(index % SIZE, index / SIZE))
    }
}

/// A Reversi position with a full undo history.
///
/// Every applied move (passes included) pushes the previous cells onto the
/// history, so `undo_move` restores the exact prior board. `free` always equals
/// the set of empty cells.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReversiBoard {
    cells: Cells,
    free: FreeCells,
    history: Vec<Cells>,
    move_list: Vec<Option<Position>>,
}

impl Default for ReversiBoard {
    /// Creates the standard opening with the four centre discs placed crosswise.
    fn default() -> Self {
        let mut cells: Cells = [[None; SIZE as usize]; SIZE as usize];
        cells[3][3] = Some(Side::Second);
        cells[4][4] = Some(Side::Second);
        cells[3][4] = Some(Side::First);
        cells[4][3] = Some(Side::First);
        Self::from_cells(cells)
    }
}

impl ReversiBoard {
    fn from_cells(cells: Cells) -> Self {
        let mut free = FreeCells::default();
        for y in 0..SIZE {
            for x in 0..SIZE {
                if cells[y as usize][x as usize].is_none() {
                    free.insert(Position::new(x, y));
                }
            }
        }

        Self {
            cells,
            free,
            history: Vec::new(),
            move_list: Vec::new(),
        }
    }

    /// Parses eight whitespace separated rows of eight cells, top row first.
    /// `X` is a disc of the first player, `O` of the second, `.` is empty.
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout.split_whitespace().collect();
        if rows.len() != SIZE as usize {
            return Err(LayoutError::RowCount {
                expected: SIZE as usize,
                actual: rows.len(),
            });
        }

        let mut cells: Cells = [[None; SIZE as usize]; SIZE as usize];
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != SIZE as usize {
                return Err(LayoutError::RowWidth {
                    row: y,
                    expected: SIZE as usize,
                    actual: width,
                });
            }

            for (x, symbol) in row.chars().enumerate() {
                cells[y][x] = match symbol {
                    'X' => Some(Side::First),
                    'O' => Some(Side::Second),
                    '.' => None,
                    _ => return Err(LayoutError::UnknownSymbol { symbol, x, y }),
                };
            }
        }

        Ok(Self::from_cells(cells))
    }

    /// Returns the owner of the disc on `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<Side> {
        if !in_bounds(pos) {
            return None;
        }
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub fn free_cells(&self) -> FreeCells {
        self.free
    }

    /// Moves applied so far, `None` entries being passes.
    pub fn move_list(&self) -> &[Option<Position>] {
        &self.move_list
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(side))
            .count()
    }

    /// Discs of `side` minus discs of its opponent.
    pub fn disc_difference(&self, side: Side) -> i32 {
        self.count(side) as i32 - self.count(side.opponent()) as i32
    }

    /// Number of opposing discs `player` would flip along `(dx, dy)` by playing
    /// on `pos`. Zero unless the run is closed by one of `player`'s discs.
    fn run_length(&self, pos: Position, dx: i32, dy: i32, player: Side) -> i32 {
        let opponent = Some(player.opponent());
        let mut cursor = pos.offset(dx, dy);
        let mut run = 0;

        while self.get(cursor) == opponent {
            run += 1;
            cursor = cursor.offset(dx, dy);
        }

        if run > 0 && self.get(cursor) == Some(player) {
            run
        } else {
            0
        }
    }

    /// Reverts the most recent move and returns it, or `None` when there is no
    /// history left.
    pub fn undo_move(&mut self) -> Option<Option<Position>> {
        let previous = self.history.pop()?;
        let b_move = self.move_list.pop()?;

        if let Some(pos) = b_move {
            self.free.insert(pos);
        }
        self.cells = previous;

        Some(b_move)
    }
}

impl Board for ReversiBoard {
    type Move = Position;

    fn legal_moves(&self, player: Side) -> Vec<Self::Move> {
        self.free
            .iter()
            .filter(|pos| {
                DIRECTIONS
                    .into_iter()
                    .any(|(dx, dy)| self.run_length(*pos, dx, dy, player) > 0)
            })
            .collect()
    }

    fn perform_move(&mut self, b_move: Option<Self::Move>, player: Side) {
        self.history.push(self.cells);
        self.move_list.push(b_move);

        let Some(pos) = b_move else {
            return;
        };

        self.cells[pos.y as usize][pos.x as usize] = Some(player);
        self.free.remove(pos);

        for (dx, dy) in DIRECTIONS {
            for step in 1..=self.run_length(pos, dx, dy, player) {
                let flipped = pos.offset(dx * step, dy * step);
                self.cells[flipped.y as usize][flipped.x as usize] = Some(player);
            }
        }
    }

    fn get_outcome(&self) -> GameOutcome {
        if !self.is_terminal() {
            return GameOutcome::InProgress;
        }

        match self.disc_difference(Side::First) {
            diff if diff > 0 => GameOutcome::Winner(Side::First),
            diff if diff < 0 => GameOutcome::Winner(Side::Second),
            _ => GameOutcome::Draw,
        }
    }

    fn is_terminal(&self) -> bool {
        if self.free.is_empty() {
            return true;
        }

        matches!(self.move_list.as_slice(), [.., None, None])
    }

    fn explore<R>(
        &mut self,
        b_move: Option<Self::Move>,
        player: Side,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.perform_move(b_move, player);
        let result = f(self);
        self.undo_move();
        result
    }
}
