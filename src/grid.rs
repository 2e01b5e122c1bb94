use rand::{seq::IteratorRandom, Rng};
use std::fmt;

/// A square on the playing field.
///
/// Coordinates are signed so that a candidate head one step past an edge can
/// be represented and then rejected by [`Grid::in_bounds()`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell offset from this one by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed-size square playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Grid {
    side: i32,
}

impl Grid {
    pub fn new(side: u16) -> Grid {
        Grid {
            side: i32::from(side),
        }
    }

    /// Return the length of each side of the grid
    pub fn side(self) -> i32 {
        self.side
    }

    /// Return the total number of cells in the grid
    pub fn area(self) -> usize {
        let side = usize::try_from(self.side).unwrap_or_default();
        side * side
    }

    pub fn in_bounds(self, cell: Cell) -> bool {
        (0..self.side).contains(&cell.x) && (0..self.side).contains(&cell.y)
    }

    /// Return a uniformly random in-bounds cell
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        Cell {
            x: rng.random_range(0..self.side),
            y: rng.random_range(0..self.side),
        }
    }

    /// Iterate over every cell in the grid in row-major order
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let side = self.side;
        (0..side).flat_map(move |y| (0..side).map(move |x| Cell { x, y }))
    }

    /// Find a cell for which `occupied` returns `false`.
    ///
    /// Up to `attempts` uniformly random cells are tried first; if none of
    /// them is free, a free cell is instead chosen uniformly from a scan of
    /// the whole grid.  Returns `None` only if every cell is occupied.
    pub fn free_cell<R, F>(self, rng: &mut R, attempts: usize, occupied: F) -> Option<Cell>
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        for _ in 0..attempts {
            let cell = self.random_cell(rng);
            if !occupied(cell) {
                return Some(cell);
            }
        }
        log::warn!("no free cell found after {attempts} random draws; scanning grid");
        self.cells().filter(|&c| !occupied(c)).choose(rng)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(crate::consts::GRID_SIZE)
    }
}
