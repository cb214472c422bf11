//! The two built-in flavours of the game and the knobs that distinguish them
use crate::game::{Direction, Grid, Point, Snake};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A named set of default [`Tuning`] values
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Variant {
    /// Wide field, a one-cell snake, 10 points per food, no pausing
    #[default]
    Classic,

    /// Square field, a three-cell snake, 50 points per food, pausing allowed
    Neon,
}

impl Variant {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Neon => "neon",
        }
    }

    pub(crate) fn tuning(self) -> Tuning {
        match self {
            Variant::Classic => Tuning {
                grid: Grid::new(30, 20),
                tick_interval: Duration::from_millis(100),
                score_per_food: 10,
                pause_enabled: false,
                initial_head: Point::new(10, 10),
                initial_length: 1,
            },
            Variant::Neon => Tuning {
                grid: Grid::new(20, 20),
                tick_interval: Duration::from_millis(100),
                score_per_food: 50,
                pause_enabled: true,
                initial_head: Point::new(10, 10),
                initial_length: 3,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        [Variant::Classic, Variant::Neon]
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseVariantError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown game variant {0:?}; expected \"classic\" or \"neon\"")]
pub(crate) struct ParseVariantError(String);

/// Everything that differs between one flavour of the game and another
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Tuning {
    pub(crate) grid: Grid,

    /// Time between movements of the snake
    pub(crate) tick_interval: Duration,

    /// Points awarded for each food eaten
    pub(crate) score_per_food: u32,

    /// Whether the game can be paused
    pub(crate) pause_enabled: bool,

    /// Where the snake's head starts.  The rest of the body trails off to
    /// the west, as the snake always starts out heading east.
    pub(crate) initial_head: Point,

    /// How many cells long the snake starts out
    pub(crate) initial_length: u16,
}

impl Tuning {
    /// The direction in which every new snake starts out moving
    pub(crate) const INITIAL_DIRECTION: Direction = Direction::East;

    pub(crate) fn initial_snake(&self) -> Snake {
        Snake::straight(
            self.initial_head,
            self.initial_length,
            Tuning::INITIAL_DIRECTION,
        )
    }

    /// Check that a game can actually be played with these settings
    ///
    /// # Errors
    ///
    /// Returns `Err` if the grid has no cells, the tick interval is zero, or
    /// the starting snake does not fit inside the grid.
    pub(crate) fn validate(self) -> Result<Tuning, TuningError> {
        if self.grid.is_empty() {
            Err(TuningError::EmptyGrid)
        } else if self.tick_interval.is_zero() {
            Err(TuningError::ZeroTick)
        } else if self.initial_length == 0 {
            Err(TuningError::ZeroLength)
        } else if let Some(p) = self.initial_snake().body().find(|&p| !self.grid.in_bounds(p)) {
            Err(TuningError::SnakeOutOfBounds {
                cell: p,
                width: self.grid.width,
                height: self.grid.height,
            })
        } else {
            Ok(self)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum TuningError {
    #[error("grid width and height must both be at least 1")]
    EmptyGrid,
    #[error("tick interval must be greater than zero")]
    ZeroTick,
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("starting snake cell {cell} lies outside the {width}×{height} grid")]
    SnakeOutOfBounds { cell: Point, width: u16, height: u16 },
}
