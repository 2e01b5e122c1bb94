use crate::grid::Cell;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `cell` in this direction.  The result
    /// may lie outside the grid.
    pub fn step(self, cell: Cell) -> Cell {
        match self {
            Direction::Up => cell.offset(0, -1),
            Direction::Down => cell.offset(0, 1),
            Direction::Left => cell.offset(-1, 0),
            Direction::Right => cell.offset(1, 0),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Cell::new(2, 7), Cell::new(2, 6))]
    #[case(Direction::Down, Cell::new(2, 7), Cell::new(2, 8))]
    #[case(Direction::Left, Cell::new(2, 7), Cell::new(1, 7))]
    #[case(Direction::Right, Cell::new(2, 7), Cell::new(3, 7))]
    #[case(Direction::Up, Cell::new(2, 0), Cell::new(2, -1))]
    #[case(Direction::Left, Cell::new(0, 5), Cell::new(-1, 5))]
    #[case(Direction::Right, Cell::new(9, 5), Cell::new(10, 5))]
    #[case(Direction::Down, Cell::new(3, 9), Cell::new(3, 10))]
    fn test_direction_step(#[case] d: Direction, #[case] cell: Cell, #[case] r: Cell) {
        assert_eq!(d.step(cell), r);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down, true)]
    #[case(Direction::Down, Direction::Up, true)]
    #[case(Direction::Left, Direction::Right, true)]
    #[case(Direction::Right, Direction::Left, true)]
    #[case(Direction::Up, Direction::Up, false)]
    #[case(Direction::Up, Direction::Left, false)]
    #[case(Direction::Right, Direction::Down, false)]
    #[case(Direction::Left, Direction::Left, false)]
    fn test_is_opposite(#[case] a: Direction, #[case] b: Direction, #[case] r: bool) {
        assert_eq!(a.is_opposite(b), r);
        assert_eq!(b.is_opposite(a), r);
    }
}
