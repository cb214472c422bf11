//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// How long a power-up lasts, in play time
pub(crate) const POWER_UP_DURATION: Duration = Duration::from_millis(7000);

/// Food draws above this value are ghost food
pub(crate) const GHOST_FOOD_THRESHOLD: f64 = 0.85;

/// Food draws above this value (and not above [`GHOST_FOOD_THRESHOLD`]) are
/// wrap food
pub(crate) const WRAP_FOOD_THRESHOLD: f64 = 0.70;

/// How many times to redraw a food position that landed on the snake before
/// picking directly from the free cells
pub(crate) const MAX_SPAWN_ATTEMPTS: usize = 32;

/// Minimum displacement, in [swipe units](SWIPE_UNITS_PER_COLUMN), for a
/// pointer drag to count as a swipe
pub(crate) const SWIPE_THRESHOLD: i32 = 30;

/// Swipe units per terminal column.  Terminal cells are roughly twice as tall
/// as they are wide, and these values approximate their size in pixels.
pub(crate) const SWIPE_UNITS_PER_COLUMN: i32 = 8;

/// Swipe units per terminal row
pub(crate) const SWIPE_UNITS_PER_ROW: i32 = 16;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 25,
};

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

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

/// Glyph for normal food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for ghost food
pub(crate) const GHOST_FOOD_SYMBOL: char = '◌';

/// Glyph for wrap food
pub(crate) const WRAP_FOOD_SYMBOL: char = '◎';

/// Glyph for the snake's head after it has collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while the ghost power-up is active
pub(crate) const GHOST_SNAKE_STYLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::DIM);

/// Style for normal food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for ghost food
pub(crate) const GHOST_FOOD_STYLE: Style = Style::new().fg(Color::LightMagenta);

/// Style for wrap food
pub(crate) const WRAP_FOOD_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the new-high-score banner
pub(crate) const CELEBRATION_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::SLOW_BLINK);
