//! Cells of the playing field and the arithmetic for moving between them
use std::fmt;

/// A cell on the grid.  Coordinates are signed so that a head that has just
/// stepped off an edge can be represented before it is bounds-checked or
/// wrapped.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub(crate) const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The dimensions of the playing field.  Valid cells are those in
/// `[0, width) × [0, height)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Grid {
    pub(crate) const fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn in_bounds(self, p: Point) -> bool {
        (0..i32::from(self.width)).contains(&p.x) && (0..i32::from(self.height)).contains(&p.y)
    }

    /// Map `p` into the grid by treating both axes as periodic.  Points that
    /// are already in bounds are returned unchanged.
    ///
    /// The grid must not have a zero dimension.
    pub(crate) fn wrap(self, p: Point) -> Point {
        Point {
            x: p.x.rem_euclid(i32::from(self.width)),
            y: p.y.rem_euclid(i32::from(self.height)),
        }
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn positions(self) -> impl Iterator<Item = Point> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    pub(crate) fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
