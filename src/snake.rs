use serde::Deserialize;

use crate::input::Direction;

/// Grid position in logical cell coordinates (1-based, border included).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Ordered snake body, head first, with a hard length cap.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    max_len: usize,
}

impl Snake {
    /// Creates a straight horizontal snake whose body trails left of `head`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or exceeds `max_len`.
    #[must_use]
    pub fn new(head: Position, len: usize, max_len: usize) -> Self {
        let body = (0..len)
            .map(|offset| Position {
                x: head.x - offset as i32,
                y: head.y,
            })
            .collect();

        Self::with_body(body, Direction::Right, max_len)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty or longer than `max_len`.
    #[must_use]
    pub fn with_body(segments: Vec<Position>, direction: Direction, max_len: usize) -> Self {
        assert!(!segments.is_empty(), "snake must have at least one segment");
        assert!(
            segments.len() <= max_len,
            "snake of length {} exceeds cap {max_len}",
            segments.len()
        );

        let mut body = Vec::with_capacity(max_len);
        body.extend(segments);

        Self {
            body,
            direction,
            max_len,
        }
    }

    /// Applies `requested` unless it would reverse the snake onto itself.
    ///
    /// Returns the direction in effect afterwards. A reversal is silently
    /// ignored and the current direction comes back unchanged.
    pub fn set_direction(&mut self, requested: Direction) -> Direction {
        if requested != self.direction.opposite() {
            self.direction = requested;
        }
        self.direction
    }

    /// Appends one tail segment at `at`, normally the trail point of the last move.
    ///
    /// # Panics
    ///
    /// Panics when the snake is already at its maximum length.
    pub fn grow(&mut self, at: Position) {
        assert!(
            self.body.len() < self.max_len,
            "snake cannot grow past its maximum length of {}",
            self.max_len
        );
        self.body.push(at);
    }

    /// Returns a snake moved onto `head` while heading in `direction`, every
    /// other segment following its predecessor.
    ///
    /// The last segment's old position is dropped; callers that need it read
    /// [`Snake::tail`] first.
    #[must_use]
    pub(crate) fn shifted(&self, head: Position, direction: Direction) -> Self {
        let mut body = Vec::with_capacity(self.max_len);
        body.push(head);
        body.extend_from_slice(&self.body[..self.body.len() - 1]);

        Self {
            body,
            direction,
            max_len: self.max_len,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head shares a cell with any other segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.body
    }
}
