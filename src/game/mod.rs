//! The game itself, independent of how it is drawn or driven: a
//! deterministic snake simulation, the food spawner & power-up timer it
//! consults, and the session state machine that wraps them.
mod direction;
mod engine;
mod food;
mod geometry;
mod power_up;
mod session;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::FoodKind;
pub(crate) use self::geometry::{Grid, Point};
pub(crate) use self::power_up::PowerUp;
pub(crate) use self::session::{Cue, GameState, Input, Session, Snapshot};
pub(crate) use self::snake::Snake;
