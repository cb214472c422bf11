use super::geometry::Point;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit vector for the direction.  The y axis points down the
    /// screen.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `pos` in this direction.  The result is
    /// not bounds-checked.
    pub(crate) fn advance(self, pos: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(pos.x + dx, pos.y + dy)
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Returns `true` if both directions move along the same axis.  A turn
    /// onto the axis of travel is either a no-op or a 180° reversal, and is
    /// never accepted.
    pub(crate) fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.pad(name)
    }
}
