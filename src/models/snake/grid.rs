//! Coordinate space of the board and occupancy queries.
use std::collections::HashSet;

/// A single board cell. Signed so a head stepping off the board is still representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.value();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// True if `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.col - other.col).abs() + (self.row - other.row).abs() == 1
    }
}

/// Direction the snake travels in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const VARIANTS: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// (column, row) delta. Rows grow downwards.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.get_opposite() == other
    }
}

/// Fixed extent of the board. Holds no occupancy of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    /// Callers validate the extent through [`super::config::GameConfig`].
    #[must_use]
    pub(crate) const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.col) && (0..self.rows).contains(&cell.row)
    }

    #[must_use]
    pub fn is_occupied(self, cell: Cell, occupied: &HashSet<Cell>) -> bool {
        self.in_bounds(cell) && occupied.contains(&cell)
    }

    #[must_use]
    pub fn cols(self) -> i32 {
        self.cols
    }

    #[must_use]
    pub fn rows(self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::try_from(self.cols * self.rows).unwrap_or(0)
    }

    /// Every cell of the board in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(col, row)))
    }
}
