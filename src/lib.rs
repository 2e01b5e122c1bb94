//! Arithmetic snake.
//!
//! A snake moves over a small square grid, one cell per tick.  Each round
//! poses a simple sum; the snake must eat the food showing the answer while
//! avoiding the walls, itself, and the decoys showing wrong answers.
//!
//! [`Game`] holds the whole simulation and changes only when told to;
//! [`Scheduler`] ticks a game at a fixed rate on a background thread, and
//! front ends draw from the [`Snapshot`]s it hands out.
pub mod config;
pub mod consts;
pub mod game;
pub mod grid;
pub mod highscores;
pub mod rules;
pub mod scheduler;
pub use crate::config::Config;
pub use crate::game::{
    Direction, Food, FoodKind, Game, GameOver, Operator, Question, Snapshot, Tick,
};
pub use crate::grid::{Cell, Grid};
pub use crate::highscores::HighScores;
pub use crate::rules::Rules;
pub use crate::scheduler::Scheduler;
