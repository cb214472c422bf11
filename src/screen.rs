//! Drawing a [`Snapshot`] of the game to the terminal
use crate::consts;
use crate::game::{Direction, FoodKind, GameState, Point, PowerUp, Snapshot};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};

pub(crate) fn draw(snapshot: &Snapshot, frame: &mut Frame<'_>) {
    frame.render_widget(snapshot, frame.area());
}

impl Widget for &Snapshot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        score_line(self).render(score_area, buf);

        let block_size = Size {
            width: self
                .grid
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: self.grid.height.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        let power_up = self.power_up_kind();
        if power_up == Some(PowerUp::Wrap) {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let snake_style = if power_up == Some(PowerUp::Ghost) {
            consts::GHOST_SNAKE_STYLE
        } else {
            consts::SNAKE_STYLE
        };
        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &p in self.body.iter().skip(1) {
            level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, snake_style);
        }
        let (food_symbol, food_style) = match self.food.kind {
            FoodKind::Normal => (consts::FOOD_SYMBOL, consts::FOOD_STYLE),
            FoodKind::Ghost => (consts::GHOST_FOOD_SYMBOL, consts::GHOST_FOOD_STYLE),
            FoodKind::Wrap => (consts::WRAP_FOOD_SYMBOL, consts::WRAP_FOOD_STYLE),
        };
        level.draw_cell(self.food.position, food_symbol, food_style);
        // Draw the head last so it sits on top of anything else in its cell
        if let Some(&head) = self.body.first() {
            if self.state == GameState::GameOver {
                level.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                level.draw_cell(head, head_symbol(self.direction), snake_style);
            }
        }

        match self.state {
            GameState::Playing => (),
            GameState::Start => {
                let mut lines = vec![
                    Line::raw("Steer: arrows, WASD, or HJKL"),
                    key_line("Space", "start"),
                ];
                if self.pause_enabled {
                    lines.push(key_line("p", "pause"));
                }
                lines.push(key_line("q", "quit"));
                popup(" POWERSNAKE ", lines, display, buf);
            }
            GameState::Paused => {
                popup(
                    " PAUSED ",
                    vec![key_line("p", "resume"), key_line("q", "quit")],
                    display,
                    buf,
                );
            }
            GameState::GameOver => {
                let mut line = Line::raw(format!(" GAME OVER: you scored {}", self.score));
                if self.new_high_score {
                    line.push_span("  ");
                    line.push_span(Span::styled("NEW HIGH SCORE!", consts::CELEBRATION_STYLE));
                }
                line.render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Play again ("),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(") or Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

fn score_line(snapshot: &Snapshot) -> Line<'static> {
    let mut line = Line::raw(format!(
        " Score: {}   High: {}",
        snapshot.score, snapshot.high_score
    ));
    if let Some((kind, left)) = snapshot.power_up {
        line.push_span(format!("   {kind} {:.1}s", left.as_secs_f64()));
    }
    line.style(consts::SCORE_BAR_STYLE)
}

fn key_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(": "),
        Span::raw(action),
    ])
}

/// Draw a bordered box with a title in the middle of `area`, blanking out
/// whatever was beneath it
fn popup(title: &'static str, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let width = lines
        .iter()
        .map(Line::width)
        .chain(std::iter::once(title.len()))
        .max()
        .unwrap_or_default()
        .saturating_add(4);
    let size = Size {
        width: u16::try_from(width).unwrap_or(u16::MAX),
        height: u16::try_from(lines.len().saturating_add(2)).unwrap_or(u16::MAX),
    };
    let popup_area = center_rect(area, size);
    Clear.render(popup_area, buf);
    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1))
        .style(Style::reset());
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);
    for (line, row) in lines.into_iter().zip(inner.rows()) {
        line.render(row, buf);
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, x: u16, y: u16, symbol: char) {
        let Some(x) = self.area.x.checked_add(x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw a grid cell.  Each cell is [`CELL_WIDTH`][consts::CELL_WIDTH]
    /// columns wide, and the symbol goes in the leftmost one.
    fn draw_cell(&mut self, pos: Point, symbol: char, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if !self.area.contains((x, y).into()) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// The border drawn around the field while the wraparound power-up is active
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(0, 0, '·');
        canvas.draw_char(max_x, 0, '·');
        canvas.draw_char(max_x, max_y, '·');
        canvas.draw_char(0, max_y, '·');
        for x in 1..max_x {
            canvas.draw_char(x, 0, '⋯');
            canvas.draw_char(x, max_y, '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(0, y, '⋮');
            canvas.draw_char(max_x, y, '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Input, Session};
    use crate::tuning::Variant;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn snapshot(variant: Variant, state: GameState) -> Snapshot {
        let mut session = Session::new_with_rng(
            variant.tuning(),
            350,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        if state != GameState::Start {
            session.handle(Input::StartOrRestart);
        }
        let mut snap = session.snapshot();
        snap.state = state;
        snap.score = 120;
        snap.food.position = Point::new(3, 4);
        snap.food.kind = FoodKind::Normal;
        snap
    }

    fn render(snap: &Snapshot) -> Buffer {
        let area = Rect::new(0, 0, 80, 25);
        let mut buffer = Buffer::empty(area);
        snap.render(area, &mut buffer);
        buffer
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn classic_playing() {
        let buffer = render(&snapshot(Variant::Classic, GameState::Playing));
        assert_eq!(
            row_text(&buffer, 0).trim_end(),
            " Score: 120   High: 350"
        );
        assert_eq!(buffer[(0, 0)].modifier, consts::SCORE_BAR_STYLE.add_modifier);
        // 30x20 field, two columns per cell, centered under the score bar
        assert_eq!(buffer[(9, 1)].symbol(), "┌");
        assert_eq!(buffer[(70, 1)].symbol(), "┐");
        assert_eq!(buffer[(9, 22)].symbol(), "└");
        assert_eq!(buffer[(30, 12)].symbol(), "<");
        assert_eq!(buffer[(30, 12)].fg, Color::Green);
        assert_eq!(buffer[(31, 12)].symbol(), " ");
        assert_eq!(buffer[(16, 6)].symbol(), "●");
        assert_eq!(buffer[(16, 6)].fg, Color::LightRed);
        assert_eq!(row_text(&buffer, 23).trim(), "");
        assert_eq!(row_text(&buffer, 24).trim(), "");
    }

    #[test]
    fn neon_body() {
        let buffer = render(&snapshot(Variant::Neon, GameState::Playing));
        // 20x20 field starts at column 20; head at (10, 10) facing east with
        // two body cells trailing to the west
        assert_eq!(buffer[(19, 1)].symbol(), "┌");
        assert_eq!(buffer[(40, 12)].symbol(), "<");
        assert_eq!(buffer[(38, 12)].symbol(), "⚬");
        assert_eq!(buffer[(36, 12)].symbol(), "⚬");
        assert_eq!(buffer[(34, 12)].symbol(), " ");
    }

    #[test]
    fn food_kinds() {
        let mut snap = snapshot(Variant::Classic, GameState::Playing);
        snap.food.kind = FoodKind::Ghost;
        let buffer = render(&snap);
        assert_eq!(buffer[(16, 6)].symbol(), "◌");
        assert_eq!(buffer[(16, 6)].fg, Color::LightMagenta);
        snap.food.kind = FoodKind::Wrap;
        let buffer = render(&snap);
        assert_eq!(buffer[(16, 6)].symbol(), "◎");
        assert_eq!(buffer[(16, 6)].fg, Color::LightCyan);
    }

    #[test]
    fn wrap_active() {
        let mut snap = snapshot(Variant::Classic, GameState::Playing);
        snap.power_up = Some((PowerUp::Wrap, Duration::from_millis(6500)));
        let buffer = render(&snap);
        assert_eq!(
            row_text(&buffer, 0).trim_end(),
            " Score: 120   High: 350   WRAP 6.5s"
        );
        assert_eq!(buffer[(9, 1)].symbol(), "·");
        assert_eq!(buffer[(10, 1)].symbol(), "⋯");
        assert_eq!(buffer[(9, 2)].symbol(), "⋮");
        assert_eq!(buffer[(70, 22)].symbol(), "·");
        assert_eq!(buffer[(30, 12)].fg, Color::Green);
    }

    #[test]
    fn ghost_active() {
        let mut snap = snapshot(Variant::Neon, GameState::Playing);
        snap.power_up = Some((PowerUp::Ghost, Duration::from_millis(100)));
        let buffer = render(&snap);
        assert!(row_text(&buffer, 0).contains("GHOST 0.1s"));
        assert_eq!(buffer[(19, 1)].symbol(), "┌");
        assert_eq!(buffer[(40, 12)].fg, Color::Gray);
        assert_eq!(buffer[(38, 12)].fg, Color::Gray);
    }

    #[test]
    fn start_screen() {
        let buffer = render(&snapshot(Variant::Neon, GameState::Start));
        let text = (0..25).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|row| row.contains(" POWERSNAKE ")));
        assert!(text.iter().any(|row| row.contains("Space: start")));
        assert!(text.iter().any(|row| row.contains("p: pause")));
    }

    #[test]
    fn classic_start_screen_has_no_pause_hint() {
        let buffer = render(&snapshot(Variant::Classic, GameState::Start));
        assert!((0..25).all(|y| !row_text(&buffer, y).contains("p: pause")));
    }

    #[test]
    fn paused() {
        let buffer = render(&snapshot(Variant::Neon, GameState::Paused));
        let text = (0..25).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|row| row.contains(" PAUSED ")));
        assert!(text.iter().any(|row| row.contains("p: resume")));
    }

    #[test]
    fn game_over() {
        let buffer = render(&snapshot(Variant::Classic, GameState::GameOver));
        assert_eq!(buffer[(30, 12)].symbol(), "×");
        assert_eq!(
            row_text(&buffer, 23).trim_end(),
            " GAME OVER: you scored 120"
        );
        assert_eq!(
            row_text(&buffer, 24).trim_end(),
            " Play again (Space) or Quit (q)"
        );
    }

    #[test]
    fn game_over_marks_unmoved_head() {
        let buffer = render(&snapshot(Variant::Neon, GameState::GameOver));
        // A fatal move changes nothing, so the mark lands on the head's
        // last position with the body still behind it
        assert_eq!(buffer[(40, 12)].symbol(), "×");
        assert_eq!(buffer[(38, 12)].symbol(), "⚬");
        assert_eq!(buffer[(42, 12)].symbol(), " ");
    }

    #[test]
    fn game_over_with_high_score() {
        let mut snap = snapshot(Variant::Classic, GameState::GameOver);
        snap.high_score = 120;
        snap.new_high_score = true;
        let buffer = render(&snap);
        assert_eq!(
            row_text(&buffer, 23).trim_end(),
            " GAME OVER: you scored 120  NEW HIGH SCORE!"
        );
        assert_eq!(buffer[(28, 23)].fg, Color::LightYellow);
    }
}
