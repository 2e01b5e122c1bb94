mod direction;
mod food;
mod question;
mod snake;
pub use self::direction::Direction;
pub use self::food::{Food, FoodKind, PlacementError};
pub use self::question::{Operator, Question};
use self::food::Pantry;
use self::snake::Snake;
use crate::grid::{Cell, Grid};
use crate::rules::{Rules, RulesError};
use rand::{
    distr::{Bernoulli, Distribution},
    rngs::StdRng,
    Rng, SeedableRng,
};

/// A single game: the snake, the active question & its food, and the score.
///
/// The game only changes when [`Game::tick()`], [`Game::set_direction()`], or
/// [`Game::restart()`] is called; timing is left to the caller (see
/// [`crate::scheduler::Scheduler`]).
#[derive(Clone, Debug)]
pub struct Game<R = StdRng> {
    rng: R,
    rules: Rules,
    bonus: Bernoulli,
    grid: Grid,
    snake: Snake,
    pantry: Pantry,
    score: u32,
    state: GameState,
    ticks: u64,
}

impl Game<StdRng> {
    /// Start a new game with a randomly-seeded RNG
    ///
    /// # Errors
    ///
    /// Returns `Err` if `rules` are invalid.
    pub fn new(rules: Rules) -> Result<Self, RulesError> {
        let seed = rand::rng().random();
        log::info!("Using random seed {seed}");
        Game::with_seed(rules, seed)
    }

    /// Start a new game whose random draws are determined by `seed`
    ///
    /// # Errors
    ///
    /// Returns `Err` if `rules` are invalid.
    pub fn with_seed(rules: Rules, seed: u64) -> Result<Self, RulesError> {
        Game::new_with_rng(rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// # Errors
    ///
    /// Returns `Err` if `rules` are invalid.
    pub fn new_with_rng(rules: Rules, mut rng: R) -> Result<Game<R>, RulesError> {
        let bonus = rules.validate()?;
        let grid = Grid::new(rules.grid_size);
        let snake = starting_snake(grid, rules.initial_length);
        let question = Question::random(&mut rng);
        let mut game = Game {
            rng,
            rules,
            bonus,
            grid,
            snake,
            pantry: Pantry {
                question,
                foods: Vec::new(),
            },
            score: 0,
            state: GameState::Running,
            ticks: 0,
        };
        if !game.restock() {
            game.state = GameState::Over(GameOver::BoardFull);
        }
        Ok(game)
    }

    /// Throw away the current game and start a new one with the same rules
    pub fn restart(&mut self) {
        log::info!("Restarting game");
        self.snake = starting_snake(self.grid, self.rules.initial_length);
        self.score = 0;
        self.ticks = 0;
        self.state = GameState::Running;
        if !self.restock() {
            self.state = GameState::Over(GameOver::BoardFull);
        }
    }

    /// Advance the game by one step and report what happened.
    ///
    /// Once the game is over, this does nothing and returns [`Tick::Idle`].
    pub fn tick(&mut self) -> Tick {
        if self.is_over() {
            return Tick::Idle;
        }
        self.ticks += 1;
        let head = self.snake.aim();
        if !self.grid.in_bounds(head) {
            return self.end(GameOver::Wall);
        }
        if self.snake.contains(head) {
            return self.end(GameOver::SelfCollision);
        }
        self.snake.push_head(head);
        match self.pantry.food_at(head).map(|f| f.kind) {
            Some(FoodKind::Correct) => {
                self.score = self.score.saturating_add(1);
                log::debug!("Ate correct answer at {head}; score is now {}", self.score);
                if !self.restock() {
                    return self.end(GameOver::BoardFull);
                }
                Tick::AteCorrect
            }
            Some(FoodKind::Decoy) => {
                let removed = self
                    .snake
                    .drop_tail(self.rules.wrong_food_penalty.saturating_add(1));
                let lost = removed.saturating_sub(1);
                log::debug!("Ate wrong answer at {head}; lost {lost} cells");
                if !self.restock() {
                    return self.end(GameOver::BoardFull);
                }
                Tick::AteDecoy { lost }
            }
            Some(FoodKind::Bonus) => {
                self.score = self.score.saturating_add(u32::from(self.rules.bonus_value));
                self.pantry.remove_bonus();
                log::debug!("Ate bonus at {head}; score is now {}", self.score);
                Tick::AteBonus
            }
            None => {
                let _ = self.snake.drop_tail(1);
                Tick::Moved
            }
        }
    }

    /// Lay out a fresh question & food.  On failure, the food is cleared and
    /// `false` is returned.
    fn restock(&mut self) -> bool {
        let bonus = self
            .bonus
            .sample(&mut self.rng)
            .then_some(self.rules.bonus_value);
        match Pantry::stock(
            &mut self.rng,
            self.grid,
            &self.snake,
            self.rules.decoys,
            bonus,
        ) {
            Ok(pantry) => {
                log::debug!("New question: {}", pantry.question);
                self.pantry = pantry;
                true
            }
            Err(e) => {
                log::warn!("Could not restock food: {e}");
                self.pantry.foods.clear();
                false
            }
        }
    }
}

impl<R> Game<R> {
    /// Request that the snake turn to face `direction` at the next tick.
    ///
    /// Only the most recent request before a tick is honored.  Requests to
    /// reverse the snake's current direction are ignored, and `false` is
    /// returned.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.snake.turn(direction);
        if !accepted {
            log::debug!("Ignoring reversal to {direction:?}");
        }
        accepted
    }

    fn end(&mut self, reason: GameOver) -> Tick {
        log::info!("Game over ({reason:?}) with score {}", self.score);
        self.state = GameState::Over(reason);
        Tick::Ended(reason)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Over(_))
    }

    pub fn game_over(&self) -> Option<GameOver> {
        match self.state {
            GameState::Running => None,
            GameState::Over(reason) => Some(reason),
        }
    }

    pub fn question(&self) -> Question {
        self.pantry.question
    }

    pub fn foods(&self) -> &[Food] {
        &self.pantry.foods
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Iterate over the cells of the snake, head first
    pub fn snake_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.cells()
    }

    /// Return a copy of everything a front end needs to draw the game
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.rules.grid_size,
            snake: self.snake.cells().collect(),
            direction: self.snake.direction(),
            question: self.pantry.question,
            foods: self.pantry.foods.clone(),
            score: self.score,
            game_over: self.game_over(),
            ticks: self.ticks,
        }
    }
}

/// The snake at the start of a game: facing right, with its head just left
/// of the center of the grid
fn starting_snake(grid: Grid, len: usize) -> Snake {
    let mid = grid.side() / 2;
    Snake::new(Cell::new(mid - 1, mid), Direction::Right, len)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Over(GameOver),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameOver {
    /// The snake ran into the edge of the grid
    Wall,

    /// The snake ran into itself
    SelfCollision,

    /// The snake has filled the grid and there are no more cells to place
    /// the correct answer in.
    BoardFull,
}

/// The outcome of a call to [`Game::tick()`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tick {
    /// The snake moved into an empty cell
    Moved,

    /// The snake ate the correct answer, scoring a point & growing by one
    AteCorrect,

    /// The snake ate a wrong answer and lost `lost` cells
    AteDecoy { lost: usize },

    /// The snake ate the bonus food, scoring its value & growing by one
    AteBonus,

    /// The game ended this tick
    Ended(GameOver),

    /// The game was already over, so nothing happened
    Idle,
}

/// A read-only copy of a game's state
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub grid_size: u16,

    /// The cells of the snake, head first
    pub snake: Vec<Cell>,

    pub direction: Direction,
    pub question: Question,
    pub foods: Vec<Food>,
    pub score: u32,

    /// `Some` once the game has ended
    pub game_over: Option<GameOver>,

    /// Number of ticks that have advanced the current game
    pub ticks: u64,
}

impl Snapshot {
    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}
