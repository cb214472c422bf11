//! Turning pointer drags into direction changes
use crate::consts;
use crate::game::Direction;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Classify a drag displacement as a swipe.  The axis is whichever of
/// `|dx|` and `|dy|` is larger (vertical on a tie), and the displacement
/// along it must be at least [`SWIPE_THRESHOLD`][consts::SWIPE_THRESHOLD]
/// units.
pub(crate) fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    let (adx, ady) = (dx.saturating_abs(), dy.saturating_abs());
    if adx.max(ady) < consts::SWIPE_THRESHOLD {
        None
    } else if adx > ady {
        Some(if dx > 0 {
            Direction::East
        } else {
            Direction::West
        })
    } else {
        Some(if dy > 0 {
            Direction::South
        } else {
            Direction::North
        })
    }
}

/// Tracks a left-button press so that its release can be classified as a
/// swipe
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SwipeTracker {
    /// Column & row at which the button was pressed
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub(crate) fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    /// Handle a mouse event.  Returns `Some` when a completed drag amounts
    /// to a swipe.
    pub(crate) fn handle_mouse(&mut self, ev: MouseEvent) -> Option<Direction> {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((ev.column, ev.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.start.take()?;
                let dx = (i32::from(ev.column) - i32::from(column)) * consts::SWIPE_UNITS_PER_COLUMN;
                let dy = (i32::from(ev.row) - i32::from(row)) * consts::SWIPE_UNITS_PER_ROW;
                swipe_direction(dx, dy)
            }
            _ => None,
        }
    }
}
