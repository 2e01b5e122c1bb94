use super::direction::Direction;
use crate::grid::Cell;
use std::collections::VecDeque;

/// The snake: its cells, heading, and any turn waiting for the next tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the rest of the snake's body, starting with the cell
    /// just behind the head
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,

    /// A turn requested since the last tick, to be applied at the next one
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a snake of `len` cells (at least one) with its head at `head`,
    /// facing in `direction` and with the rest of its body trailing straight
    /// behind it.
    pub(super) fn new(head: Cell, direction: Direction, len: usize) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(behind.step(head)), |&c| Some(behind.step(c)))
            .take(len.saturating_sub(1))
            .collect();
        Snake {
            head,
            body,
            direction,
            pending: None,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Cell {
        self.head
    }

    /// Iterate over every cell of the snake, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn contains(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// Request that the snake turn to face `direction` at the next tick.
    ///
    /// A request to reverse the current direction is ignored; otherwise it
    /// replaces any earlier request made since the last tick.  Returns whether
    /// the request was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Apply any pending turn and return the cell the head would move into.
    /// The body itself is not changed.
    pub(super) fn aim(&mut self) -> Cell {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        self.direction.step(self.head())
    }

    /// Make `cell` the snake's new head, with the old head becoming part of
    /// the body
    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
    }

    /// Remove up to `qty` cells from the end of the snake, never leaving it
    /// shorter than one cell.  Returns the number of cells removed.
    pub(super) fn drop_tail(&mut self, qty: usize) -> usize {
        let mut removed = 0;
        while removed < qty && self.body.pop_back().is_some() {
            removed += 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Cell::new(4, 5), Direction::Right, 4);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [
                Cell::new(4, 5),
                Cell::new(3, 5),
                Cell::new(2, 5),
                Cell::new(1, 5),
            ]
        );
        assert_eq!(snake.head(), Cell::new(4, 5));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.pending, None);
    }

    #[test]
    fn new_snake_has_at_least_one_cell() {
        let snake = Snake::new(Cell::new(4, 5), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
    }

    #[rstest]
    #[case(Direction::Right, Direction::Up, true)]
    #[case(Direction::Right, Direction::Down, true)]
    #[case(Direction::Right, Direction::Right, true)]
    #[case(Direction::Right, Direction::Left, false)]
    #[case(Direction::Up, Direction::Down, false)]
    fn test_turn(#[case] facing: Direction, #[case] turn: Direction, #[case] accepted: bool) {
        let mut snake = Snake::new(Cell::new(4, 5), facing, 3);
        assert_eq!(snake.turn(turn), accepted);
        let expected = accepted.then_some(turn);
        assert_eq!(snake.pending, expected);
    }

    #[test]
    fn reversal_checked_against_current_direction() {
        let mut snake = Snake::new(Cell::new(4, 5), Direction::Right, 3);
        assert!(snake.turn(Direction::Up));
        // Still moving right, so going left is refused even though Up is pending
        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.pending, Some(Direction::Up));
        assert!(snake.turn(Direction::Down));
        assert_eq!(snake.pending, Some(Direction::Down));
    }

    #[test]
    fn aim_consumes_pending() {
        let mut snake = Snake::new(Cell::new(4, 5), Direction::Right, 3);
        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.aim(), Cell::new(4, 4));
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pending, None);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.aim(), Cell::new(4, 4));
    }

    #[rstest]
    #[case(4, 1, 1, 3)]
    #[case(4, 2, 2, 2)]
    #[case(4, 5, 3, 1)]
    #[case(2, 2, 1, 1)]
    #[case(1, 2, 0, 1)]
    fn test_drop_tail(
        #[case] len: usize,
        #[case] qty: usize,
        #[case] removed: usize,
        #[case] remaining: usize,
    ) {
        let mut snake = Snake::new(Cell::new(6, 5), Direction::Right, len);
        assert_eq!(snake.drop_tail(qty), removed);
        assert_eq!(snake.len(), remaining);
        assert_eq!(snake.head(), Cell::new(6, 5));
    }
}
