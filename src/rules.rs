use crate::consts;
use crate::grid::Grid;
use rand::distr::Bernoulli;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gameplay parameters
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Rules {
    /// Side length of the square grid
    pub grid_size: u16,

    /// Length of the snake at the start of a game
    pub initial_length: usize,

    /// Number of wrong-answer foods laid out with each question
    pub decoys: usize,

    /// Probability that a question also comes with a bonus food
    pub bonus_chance: f64,

    /// Points scored by eating a bonus food
    pub bonus_value: u16,

    /// Number of cells lost by eating a wrong answer
    pub wrong_food_penalty: usize,

    /// Milliseconds between ticks
    pub tick_period_ms: u64,
}

impl Rules {
    /// Check that the rules describe a playable game, returning the
    /// distribution for rolling bonus food.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any field is out of range.
    pub fn validate(&self) -> Result<Bernoulli, RulesError> {
        if !consts::GRID_SIZE_RANGE.contains(&self.grid_size) {
            return Err(RulesError::GridSize(self.grid_size));
        }
        let max_len = usize::from(self.grid_size / 2);
        if !(1..=max_len).contains(&self.initial_length) {
            return Err(RulesError::InitialLength {
                len: self.initial_length,
                max: max_len,
            });
        }
        // Room for the correct answer, every decoy, and a bonus next to the
        // starting snake
        let max_decoys = Grid::new(self.grid_size)
            .area()
            .saturating_sub(self.initial_length)
            .saturating_sub(2);
        if self.decoys > max_decoys {
            return Err(RulesError::Decoys {
                decoys: self.decoys,
                max: max_decoys,
            });
        }
        if self.tick_period_ms == 0 {
            return Err(RulesError::TickPeriod);
        }
        Bernoulli::new(self.bonus_chance).map_err(|_| RulesError::BonusChance(self.bonus_chance))
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            grid_size: consts::GRID_SIZE,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            decoys: consts::DECOY_COUNT,
            bonus_chance: consts::BONUS_PROBABILITY,
            bonus_value: consts::BONUS_VALUE,
            wrong_food_penalty: consts::WRONG_FOOD_PENALTY,
            tick_period_ms: consts::TICK_PERIOD_MS,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("grid size must be between 5 and 64, got {0}")]
    GridSize(u16),
    #[error("initial snake length must be between 1 and {max}, got {len}")]
    InitialLength { len: usize, max: usize },
    #[error("number of decoys must be at most {max}, got {decoys}")]
    Decoys { decoys: usize, max: usize },
    #[error("bonus chance must be between 0 and 1, got {0}")]
    BonusChance(f64),
    #[error("tick period must be nonzero")]
    TickPeriod,
}
