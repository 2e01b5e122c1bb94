//! Default rules & hard-coded configuration

/// Milliseconds between movements of the snake
pub const TICK_PERIOD_MS: u64 = 200;

/// Side length of the square playing field
pub const GRID_SIZE: u16 = 10;

/// Number of cells in the snake when a game starts
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// How many wrong-answer foods accompany each question
pub const DECOY_COUNT: usize = 2;

/// Probability that a question also comes with a bonus food
pub const BONUS_PROBABILITY: f64 = 0.2;

/// Points awarded for eating the bonus food
pub const BONUS_VALUE: u16 = 5;

/// How many cells the snake loses upon eating a wrong answer
pub const WRONG_FOOD_PENALTY: usize = 2;

/// Smallest & largest operands drawn for a question
pub const OPERAND_RANGE: std::ops::RangeInclusive<i32> = 1..=9;

/// Largest distance between a decoy's value and the correct answer
pub const DECOY_SPREAD: i32 = 2;

/// Number of random draws made when looking for a free cell before falling
/// back to scanning the whole grid
pub const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Smallest & largest accepted grid sizes
pub const GRID_SIZE_RANGE: std::ops::RangeInclusive<u16> = 5..=64;
