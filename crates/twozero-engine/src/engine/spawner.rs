use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};

use crate::core::{Board, Position, Tile};

/// Places random tiles the way the real game does after each move.
///
/// A uniformly chosen empty cell receives a 4 with probability
/// [`TileSpawner::DEFAULT_FOUR_PROBABILITY`], otherwise a 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpawner {
    four_probability: f64,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSpawner {
    pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            four_probability: Self::DEFAULT_FOUR_PROBABILITY,
        }
    }

    /// # Panics
    ///
    /// Panics if `four_probability` is not in `0.0..=1.0`.
    #[must_use]
    pub fn with_four_probability(four_probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&four_probability),
            "probability must be in 0.0..=1.0, got {four_probability}"
        );
        Self { four_probability }
    }

    /// Spawns one tile into `board`, returning where it went.
    ///
    /// Returns `None` (and leaves the board alone) when there is no empty cell.
    pub fn spawn<R>(&self, board: &mut Board, rng: &mut R) -> Option<(Position, Tile)>
    where
        R: Rng + ?Sized,
    {
        let empty = board
            .empty_positions()
            .collect::<ArrayVec<Position, { Board::MAX_CELLS }>>();
        let pos = *empty.choose(rng)?;
        let tile = if rng.random_bool(self.four_probability) {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        board.place(pos, tile);
        Some((pos, tile))
    }
}
