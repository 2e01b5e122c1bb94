use super::question::Question;
use super::snake::Snake;
use crate::consts;
use crate::grid::{Cell, Grid};
use rand::Rng;
use thiserror::Error;

/// What eating a piece of food does
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FoodKind {
    /// Bears the answer to the active question
    Correct,

    /// Bears a wrong answer
    Decoy,

    /// Bears a flat score reward and leaves the question alone
    Bonus,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub value: i32,
    pub kind: FoodKind,
}

impl Food {
    pub fn is_correct(&self) -> bool {
        self.kind == FoodKind::Correct
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == FoodKind::Bonus
    }
}

/// The active question together with the food laid out for it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Pantry {
    pub(super) question: Question,
    pub(super) foods: Vec<Food>,
}

impl Pantry {
    /// Draw a new question and lay out its food on cells not covered by
    /// `snake`: one correct answer, up to `decoys` wrong answers, and, if
    /// `bonus` is `Some`, a bonus food worth that much.
    ///
    /// Decoys & the bonus are placed only while free cells remain.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no free cell for the correct answer.
    pub(super) fn stock<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        decoys: usize,
        bonus: Option<u16>,
    ) -> Result<Pantry, PlacementError> {
        let question = Question::random(rng);
        let answer = question.answer();
        let mut pantry = Pantry {
            question,
            foods: Vec::with_capacity(decoys.saturating_add(2)),
        };
        if !pantry.place(rng, grid, snake, answer, FoodKind::Correct) {
            return Err(PlacementError);
        }
        for _ in 0..decoys {
            let value = answer + decoy_offset(rng);
            if !pantry.place(rng, grid, snake, value, FoodKind::Decoy) {
                log::warn!("no room left for decoy food");
                break;
            }
        }
        if let Some(value) = bonus {
            if !pantry.place(rng, grid, snake, i32::from(value), FoodKind::Bonus) {
                log::warn!("no room left for bonus food");
            }
        }
        Ok(pantry)
    }

    /// Put a food of the given value & kind on a cell occupied neither by
    /// `snake` nor by any food already in the pantry.  Returns `false` if
    /// there is no such cell.
    fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        value: i32,
        kind: FoodKind,
    ) -> bool {
        let cell = grid.free_cell(rng, consts::MAX_PLACEMENT_ATTEMPTS, |c| {
            snake.contains(c) || self.foods.iter().any(|f| f.cell == c)
        });
        if let Some(cell) = cell {
            self.foods.push(Food { cell, value, kind });
            true
        } else {
            false
        }
    }

    /// Return the food at `cell`, if any.  Should several foods share a cell,
    /// the correct answer wins over a decoy, which wins over the bonus.
    pub(super) fn food_at(&self, cell: Cell) -> Option<Food> {
        self.foods
            .iter()
            .filter(|f| f.cell == cell)
            .min_by_key(|f| f.kind)
            .copied()
    }

    pub(super) fn remove_bonus(&mut self) {
        self.foods.retain(|f| !f.is_bonus());
    }
}

/// Return a nonzero offset in `-DECOY_SPREAD..=DECOY_SPREAD`
fn decoy_offset<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let magnitude = rng.random_range(1..=consts::DECOY_SPREAD);
    if rng.random_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no space for food on the grid")]
pub struct PlacementError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Operator};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn check_pantry(pantry: &Pantry, snake: &Snake) {
        let correct = pantry
            .foods
            .iter()
            .filter(|f| f.is_correct())
            .collect::<Vec<_>>();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].value, pantry.question.answer());
        let cells = pantry.foods.iter().map(|f| f.cell).collect::<HashSet<_>>();
        assert_eq!(cells.len(), pantry.foods.len(), "foods share a cell");
        assert!(cells.iter().all(|&c| !snake.contains(c)), "food on snake");
        for f in &pantry.foods {
            if f.kind == FoodKind::Decoy {
                let diff = (f.value - pantry.question.answer()).abs();
                assert!((1..=consts::DECOY_SPREAD).contains(&diff));
            }
        }
    }

    #[test]
    fn stock_places_consistent_food() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::default();
        let snake = Snake::new(Cell::new(4, 5), Direction::Right, 4);
        let mut bonuses = 0;
        for _ in 0..200 {
            let bonus = rng.random_bool(0.5).then_some(5);
            let pantry = Pantry::stock(&mut rng, grid, &snake, 2, bonus).unwrap();
            check_pantry(&pantry, &snake);
            let decoys = pantry
                .foods
                .iter()
                .filter(|f| f.kind == FoodKind::Decoy)
                .count();
            assert_eq!(decoys, 2);
            if bonus.is_some() {
                bonuses += 1;
                let b = pantry.foods.iter().find(|f| f.is_bonus()).unwrap();
                assert_eq!(b.value, 5);
            } else {
                assert!(!pantry.foods.iter().any(Food::is_bonus));
            }
        }
        assert!(bonuses > 0);
    }

    #[test]
    fn stock_on_nearly_full_grid() {
        // A 5x5 grid with every cell but two covered by the snake
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(5);
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right, 1);
        snake.body = grid
            .cells()
            .filter(|&c| c != Cell::new(0, 0) && c != Cell::new(3, 4) && c != Cell::new(4, 4))
            .collect();
        let pantry = Pantry::stock(&mut rng, grid, &snake, 2, Some(5)).unwrap();
        check_pantry(&pantry, &snake);
        assert_eq!(pantry.foods.len(), 2);
        let cells = pantry.foods.iter().map(|f| f.cell).collect::<HashSet<_>>();
        assert_eq!(cells, HashSet::from([Cell::new(3, 4), Cell::new(4, 4)]));
    }

    #[test]
    fn stock_on_full_grid() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = Grid::new(5);
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right, 1);
        snake.body = grid.cells().filter(|&c| c != Cell::new(0, 0)).collect();
        assert_eq!(
            Pantry::stock(&mut rng, grid, &snake, 2, None),
            Err(PlacementError)
        );
    }

    #[test]
    fn food_at_prefers_correct() {
        let cell = Cell::new(2, 2);
        let pantry = Pantry {
            question: Question::new(4, Operator::Add, 3),
            foods: vec![
                Food {
                    cell,
                    value: 5,
                    kind: FoodKind::Bonus,
                },
                Food {
                    cell,
                    value: 9,
                    kind: FoodKind::Decoy,
                },
                Food {
                    cell,
                    value: 7,
                    kind: FoodKind::Correct,
                },
            ],
        };
        assert_eq!(pantry.food_at(cell).map(|f| f.kind), Some(FoodKind::Correct));
        assert_eq!(pantry.food_at(Cell::new(3, 3)), None);
    }

    #[test]
    fn decoy_offsets_nonzero() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let offsets = (0..500)
            .map(|_| decoy_offset(&mut rng))
            .collect::<HashSet<_>>();
        assert_eq!(offsets, HashSet::from([-2, -1, 1, 2]));
    }
}
