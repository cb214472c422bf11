use super::direction::Direction;
use super::geometry::Point;
use std::collections::VecDeque;

/// The snake's body.  It always has at least one cell, the head.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Point,

    /// The positions of the rest of the body, starting with the cell right
    /// behind the head and ending with the tip of the tail
    pub(super) tail: VecDeque<Point>,

    /// The direction the snake moved in on its last step
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a snake `length` cells long, lying in a straight line behind
    /// `head` and facing in `direction`.  A `length` of zero is treated as
    /// one.
    pub(crate) fn straight(head: Point, length: u16, direction: Direction) -> Snake {
        let backwards = direction.reverse();
        let tail = std::iter::successors(Some(head), |&p| Some(backwards.advance(p)))
            .skip(1)
            .take(usize::from(length.saturating_sub(1)))
            .collect();
        Snake {
            head,
            tail,
            direction,
        }
    }

    pub(crate) fn head(&self) -> Point {
        self.head
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Iterate over every cell of the snake from head to tail
    pub(crate) fn body(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    pub(crate) fn contains(&self, p: Point) -> bool {
        self.head == p || self.tail.contains(&p)
    }

    /// Move the head to `new_head`, which was reached by travelling in
    /// `direction`.  Unless `grow` is true, the tip of the tail is dropped.
    pub(super) fn advance(&mut self, new_head: Point, direction: Direction, grow: bool) {
        self.tail.push_front(self.head);
        self.head = new_head;
        self.direction = direction;
        if !grow {
            let _ = self.tail.pop_back();
        }
    }
}
