//! # Grid Positions
//!
//! Integer coordinates on a square layout grid.

use serde::{Deserialize, Serialize};

/// A cell coordinate on a layout grid.
///
/// Coordinates are signed so that neighbour arithmetic can step off the grid
/// edge; [`Position::within`] tells whether a position is on the grid.
///
/// # Examples
///
/// ```
/// use hamlet::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.manhattan_distance(Position::new(7, 9)), 7);
/// assert!(pos.within(16));
/// assert!(!pos.within(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the 4 cardinal neighbours (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1), // N
            Position::new(self.x - 1, self.y), // W
            Position::new(self.x + 1, self.y), // E
            Position::new(self.x, self.y + 1), // S
        ]
    }

    /// Returns true if the position lies on a grid of the given side.
    pub fn within(self, side: u32) -> bool {
        let side = side as i64;
        (0..side).contains(&(self.x as i64)) && (0..side).contains(&(self.y as i64))
    }

    /// Moves the position onto a grid of the given side.
    pub fn clamped(self, side: u32) -> Position {
        let max = side.saturating_sub(1) as i32;
        Position::new(self.x.clamp(0, max), self.y.clamp(0, max))
    }

    /// Cells of an L-shaped run from `self` to `end`, both ends included.
    ///
    /// The run goes horizontally first and then vertically when
    /// `horizontal_first` is set, and the other way around otherwise. Cells
    /// come out in walking order, so consecutive cells are 4-adjacent.
    pub fn l_path_to(self, end: Position, horizontal_first: bool) -> Vec<Position> {
        let mut cells = vec![self];
        let mut current = self;

        let legs = if horizontal_first { [true, false] } else { [false, true] };
        for horizontal in legs {
            if horizontal {
                while current.x != end.x {
                    current.x += (end.x - current.x).signum();
                    cells.push(current);
                }
            } else {
                while current.y != end.y {
                    current.y += (end.y - current.y).signum();
                    cells.push(current);
                }
            }
        }

        cells
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
        assert!((a.euclidean_distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_within_and_clamped() {
        assert!(Position::new(0, 0).within(1));
        assert!(!Position::new(-1, 0).within(10));
        assert!(!Position::new(3, 10).within(10));
        assert_eq!(Position::new(-4, 12).clamped(10), Position::new(0, 9));
    }

    #[test]
    fn test_l_path_endpoints_and_adjacency() {
        let start = Position::new(2, 3);
        let end = Position::new(6, 0);

        for horizontal_first in [true, false] {
            let path = start.l_path_to(end, horizontal_first);
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert_eq!(path.len() as u32, start.manhattan_distance(end) + 1);
            for pair in path.windows(2) {
                assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
            }
        }

        // Horizontal leg first keeps the starting row
        let path = start.l_path_to(end, true);
        assert_eq!(path[1], Position::new(3, 3));
        let path = start.l_path_to(end, false);
        assert_eq!(path[1], Position::new(2, 2));
    }

    #[test]
    fn test_l_path_to_self() {
        let pos = Position::new(4, 4);
        assert_eq!(pos.l_path_to(pos, true), vec![pos]);
    }
}
