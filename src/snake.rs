use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{Coord, Coords};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step on the grid. Screen coordinates: y grows downwards.
    pub fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Parses "up", "Down", "LEFT", ... Anything else is `None`.
    pub fn from_token(token: &str) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(token.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Up => "Up",
            Down => "Down",
            Left => "Left",
            Right => "Right",
        }
    }
}

/// Snake body, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// A straight snake of `size` segments whose head is at `head`, trailing
    /// behind it opposite to `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction, cell_size: Coord) -> Self {
        let diff = direction.delta();

        let body = (0..size as Coord)
            .map(|i| (head.0 - diff.0 * cell_size * i, head.1 - diff.1 * cell_size * i))
            .collect();
        Snake { body }
    }

    pub fn from_segments<I: IntoIterator<Item = Coords>>(segments: I) -> Self {
        Snake { body: segments.into_iter().collect() }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn segments(&self) -> Vec<Coords> {
        self.body.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Coords> {
        self.body.front().copied()
    }

    pub fn tail(&self) -> Option<Coords> {
        self.body.back().copied()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    /// Where the head would be after one step in `direction`.
    pub fn next_head(&self, direction: Direction, cell_size: Coord) -> Option<Coords> {
        let (dx, dy) = direction.delta();
        self.head().map(|(x, y)| (x + dx * cell_size, y + dy * cell_size))
    }

    pub(crate) fn push_head(&mut self, pos: Coords) {
        self.body.push_front(pos);
    }

    pub(crate) fn drop_tail(&mut self) -> Option<Coords> {
        self.body.pop_back()
    }
}

/// Terminal glyph for the head, pointing where the snake is going.
pub fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}
