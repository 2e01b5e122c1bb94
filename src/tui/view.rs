use super::consts;
use mathsnake::{Cell, Direction, FoodKind, GameOver, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::num::NonZeroU32;

/// Everything drawn on one frame of the game screen
#[derive(Clone, Copy, Debug)]
pub(crate) struct View<'a> {
    pub(crate) snapshot: &'a Snapshot,
    pub(crate) paused: bool,

    /// Best score recorded for the grid size, if any
    pub(crate) best: Option<NonZeroU32>,

    /// Whether the game that just ended set a new best score
    pub(crate) new_best: bool,
}

impl Widget for View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.snapshot;
        let [status_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let status = match self.best {
            Some(best) => format!(
                " {}   Score: {}   Best: {best}",
                snap.question, snap.score
            ),
            None => format!(" {}   Score: {}", snap.question, snap.score),
        };
        Line::styled(status, consts::STATUS_BAR_STYLE).render(status_area, buf);

        let block_size = Size {
            width: snap
                .grid_size
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: snap.grid_size.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for food in &snap.foods {
            match food.kind {
                FoodKind::Correct | FoodKind::Decoy => {
                    board.draw_cell(food.cell, &food.value.to_string(), consts::FOOD_STYLE);
                }
                FoodKind::Bonus => {
                    board.draw_cell(food.cell, &format!("+{}", food.value), consts::BONUS_STYLE);
                }
            }
        }
        let body = consts::SNAKE_BODY_SYMBOL.to_string();
        for &cell in snap.snake.iter().skip(1) {
            board.draw_cell(cell, &body, consts::SNAKE_STYLE);
        }
        if let Some(head) = snap.head() {
            // Drawn last so that a collision overwrites whatever was hit
            let (symbol, style) = match snap.game_over {
                Some(GameOver::Wall | GameOver::SelfCollision) => {
                    (consts::COLLISION_SYMBOL, consts::COLLISION_STYLE)
                }
                _ => (head_symbol(snap.direction), consts::SNAKE_STYLE),
            };
            board.draw_cell(head, &symbol.to_string(), style);
        }

        if let Some(reason) = snap.game_over {
            let mut line = Line::from_iter([
                Span::raw(" — GAME OVER — "),
                Span::raw(describe(reason)),
            ]);
            if self.new_best {
                line.push_span(Span::raw("   "));
                line.push_span(Span::styled(
                    "NEW HIGH SCORE!",
                    consts::NEW_HIGH_SCORE_STYLE,
                ));
            }
            line.render(msg1_area, buf);
            keys_line(&[("Restart", "r"), ("Quit", "q")]).render(msg2_area, buf);
        } else if self.paused {
            Span::from(" — PAUSED —").render(msg1_area, buf);
            keys_line(&[("Resume", "p"), ("Restart", "r"), ("Quit", "q")]).render(msg2_area, buf);
        } else {
            keys_line(&[("Steer", "arrows"), ("Pause", "p"), ("Quit", "q")])
                .render(msg2_area, buf);
        }
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_WEST_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_EAST_SYMBOL,
    }
}

fn describe(reason: GameOver) -> &'static str {
    match reason {
        GameOver::Wall => "You hit the wall",
        GameOver::SelfCollision => "You ran into yourself",
        GameOver::BoardFull => "The board is full",
    }
}

/// Build a line of key hints such as " Resume (p)" joined by dashes
fn keys_line(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut line = Line::default();
    for (i, &(label, key)) in keys.iter().enumerate() {
        let sep = if i == 0 { " " } else { " — " };
        line.push_span(Span::raw(format!("{sep}{label} (")));
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(Span::raw(")"));
    }
    line
}

fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Draws grid cells into a buffer, each cell [`consts::CELL_WIDTH`] columns
/// wide.  Anything falling outside `area` is dropped.
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, text: &str, style: Style) {
        let Some((x0, y)) = self.origin(cell) else {
            return;
        };
        let width = usize::from(consts::CELL_WIDTH);
        let text = format!("{text:^width$}");
        let style = Style::reset().patch(style);
        for (ch, dx) in text.chars().zip(0..consts::CELL_WIDTH) {
            let Some(x) = x0.checked_add(dx) else {
                return;
            };
            if !self.area.contains(Position { x, y }) {
                return;
            }
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(ch);
                c.set_style(style);
            }
        }
    }

    fn origin(&self, cell: Cell) -> Option<(u16, u16)> {
        let x = u16::try_from(cell.x)
            .ok()?
            .checked_mul(consts::CELL_WIDTH)?;
        let y = u16::try_from(cell.y).ok()?;
        Some((self.area.x.checked_add(x)?, self.area.y.checked_add(y)?))
    }
}
