use serde::{Deserialize, Serialize};

/// One of the four shift directions.
///
/// Each direction maps to a unit vector `(dx, dy)` with `y` growing downward. The same
/// vector drives move application and neighbor lookups in the evaluator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("right")]
    Right,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
}

impl Direction {
    pub const LEN: usize = 4;

    /// All directions in the fixed order used for deterministic tie-breaking.
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    #[must_use]
    pub const fn vector(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A cell coordinate; `(0, 0)` is the top-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Serialize,
    Deserialize,
)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Steps one cell in `direction`, or returns `None` when leaving a `width`×`height` grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = direction.vector();
        let x = self.x.checked_add_signed(dx).filter(|x| *x < width)?;
        let y = self.y.checked_add_signed(dy).filter(|y| *y < height)?;
        Some(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, direction) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(direction.index(), i);
        }
    }

    #[test]
    fn test_step_stays_inside_grid() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 4, 4), None);
        assert_eq!(corner.step(Direction::Left, 4, 4), None);
        assert_eq!(corner.step(Direction::Right, 4, 4), Some(Position::new(1, 0)));
        assert_eq!(corner.step(Direction::Down, 4, 4), Some(Position::new(0, 1)));

        let edge = Position::new(3, 3);
        assert_eq!(edge.step(Direction::Right, 4, 4), None);
        assert_eq!(edge.step(Direction::Down, 4, 4), None);
    }

    #[test]
    fn test_display_and_serde_names() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::from_str::<Direction>("\"down\"").unwrap(),
            Direction::Down
        );
    }
}
