use super::direction::Direction;
use super::food::{Food, FoodKind};
use super::geometry::Grid;
use super::power_up::PowerUp;
use super::snake::Snake;

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepResult {
    /// The snake moved one cell.  `ate` is the kind of food it ate, if it
    /// landed on the food, in which case it also grew by one cell.
    Moved { ate: Option<FoodKind> },

    /// The move would have killed the snake.  Nothing was changed.
    Died(Collision),
}

impl StepResult {
    pub(crate) fn grew(self) -> bool {
        matches!(self, StepResult::Moved { ate: Some(_) })
    }
}

/// The snake simulation: owns the snake and the food it is after, and
/// advances them one tick at a time.
///
/// The engine never respawns food or keeps score; it reports what happened
/// and leaves the consequences to the session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine {
    pub(super) grid: Grid,
    pub(super) snake: Snake,
    pub(super) food: Food,
}

impl Engine {
    pub(crate) fn new(grid: Grid, snake: Snake, food: Food) -> Engine {
        Engine { grid, snake, food }
    }

    /// Advance the snake one cell in `direction` with `power_up` in effect.
    ///
    /// The candidate head is computed and checked against the walls (unless
    /// wrapping) and against every cell of the current body, tail tip
    /// included (unless ghosting).  Only if both checks pass is the move
    /// committed; on [`StepResult::Died`] the engine is left untouched.
    pub(crate) fn step(&mut self, direction: Direction, power_up: Option<PowerUp>) -> StepResult {
        let mut head = direction.advance(self.snake.head());
        if power_up == Some(PowerUp::Wrap) {
            head = self.grid.wrap(head);
        } else if !self.grid.in_bounds(head) {
            return StepResult::Died(Collision::Wall);
        }
        // The tail tip is about to move out of the way unless the snake
        // grows, but it still counts here.
        if power_up != Some(PowerUp::Ghost) && self.snake.contains(head) {
            return StepResult::Died(Collision::Body);
        }
        let ate = (head == self.food.position).then_some(self.food.kind);
        self.snake.advance(head, direction, ate.is_some());
        StepResult::Moved { ate }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Food {
        self.food
    }

    pub(crate) fn set_food(&mut self, food: Food) {
        self.food = food;
    }
}
