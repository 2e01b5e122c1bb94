//! Glyphs, styles, and timings for the terminal interface
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// How long to wait for input before redrawing the screen
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(33);

/// Number of terminal columns taken up by one grid cell.  Wide enough for a
/// food value such as `-10`.
pub(crate) const CELL_WIDTH: u16 = 3;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the snake's head when it's hit a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for food bearing a candidate answer.  Correct answers & decoys
/// must look the same.
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

pub(crate) const BONUS_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the question & score bar at the top of the screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const NEW_HIGH_SCORE_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);
