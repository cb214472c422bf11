use super::geometry::{Grid, Point};
use super::power_up::PowerUp;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum FoodKind {
    Normal,
    /// Grants [`PowerUp::Ghost`]
    Ghost,
    /// Grants [`PowerUp::Wrap`]
    Wrap,
}

impl FoodKind {
    /// Map a uniform draw from `[0, 1)` to a kind.  The top 15% of the
    /// interval is ghost food, the 15% below that is wrap food, and the rest
    /// is normal.
    pub(crate) fn from_draw(draw: f64) -> FoodKind {
        if draw > consts::GHOST_FOOD_THRESHOLD {
            FoodKind::Ghost
        } else if draw > consts::WRAP_FOOD_THRESHOLD {
            FoodKind::Wrap
        } else {
            FoodKind::Normal
        }
    }

    /// The power-up granted by eating this kind of food
    pub(crate) fn power_up(self) -> Option<PowerUp> {
        match self {
            FoodKind::Normal => None,
            FoodKind::Ghost => Some(PowerUp::Ghost),
            FoodKind::Wrap => Some(PowerUp::Wrap),
        }
    }
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FoodKind::Normal => "normal",
            FoodKind::Ghost => "ghost",
            FoodKind::Wrap => "wrap",
        };
        f.pad(name)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Point,
    pub(crate) kind: FoodKind,
}

/// Pick a uniformly random cell and an independently drawn kind.  The cell
/// may be occupied by the snake; see [`spawn_clear_of()`].
pub(crate) fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Food {
    let position = Point::new(
        rng.random_range(0..i32::from(grid.width)),
        rng.random_range(0..i32::from(grid.height)),
    );
    let kind = FoodKind::from_draw(rng.random());
    Food { position, kind }
}

/// Like [`spawn()`], but avoid cells occupied by `snake`.
///
/// The raw draw is retried a bounded number of times; after that, a kind is
/// drawn and the cell is chosen uniformly from the free cells.  If the snake
/// fills the whole grid there is nowhere else to go, and a raw draw is
/// returned.
pub(crate) fn spawn_clear_of<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Food {
    for _ in 0..consts::MAX_SPAWN_ATTEMPTS {
        let food = spawn(rng, grid);
        if !snake.contains(food.position) {
            return food;
        }
    }
    let kind = FoodKind::from_draw(rng.random());
    match grid.positions().filter(|&p| !snake.contains(p)).choose(rng) {
        Some(position) => Food { position, kind },
        None => spawn(rng, grid),
    }
}
