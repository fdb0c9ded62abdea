use serde::{Deserialize, Serialize};

use crate::core::{Direction, Tile};

/// Counters collected while a [`Game`](super::Game) is played.
///
/// # Example
///
/// ```
/// use twozero_engine::{Direction, GameStats, Tile};
///
/// let mut stats = GameStats::new();
/// stats.complete_move(Direction::Left, 4, Some(Tile::TWO), Some(Tile::FOUR));
///
/// assert_eq!(stats.moves(), 1);
/// assert_eq!(stats.score(), 4);
/// assert_eq!(stats.direction_counter()[Direction::Left.index()], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    moves: usize,
    score: u64,
    max_tile: Option<Tile>,
    spawned: [usize; 2],
    direction_counter: [usize; Direction::LEN],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moves: 0,
            score: 0,
            max_tile: None,
            spawned: [0; 2],
            direction_counter: [0; Direction::LEN],
        }
    }

    /// Counters for a game resumed from a board that already scored `score`.
    #[must_use]
    pub const fn with_score(score: u64) -> Self {
        let mut stats = Self::new();
        stats.score = score;
        stats
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn max_tile(&self) -> Option<Tile> {
        self.max_tile
    }

    /// Number of spawned 2s and 4s, in that order.
    #[must_use]
    pub const fn spawned(&self) -> [usize; 2] {
        self.spawned
    }

    /// Moves per direction, indexed by [`Direction::index`].
    #[must_use]
    pub const fn direction_counter(&self) -> &[usize; Direction::LEN] {
        &self.direction_counter
    }

    /// Records a spawn that did not follow a move (the opening tiles).
    pub fn record_spawn(&mut self, tile: Tile) {
        if tile == Tile::FOUR {
            self.spawned[1] += 1;
        } else {
            self.spawned[0] += 1;
        }
        self.observe_max_tile(Some(tile));
    }

    pub fn observe_max_tile(&mut self, tile: Option<Tile>) {
        self.max_tile = self.max_tile.max(tile);
    }

    /// Updates the counters after a legal move and the spawn that followed it.
    pub fn complete_move(
        &mut self,
        direction: Direction,
        score_delta: u64,
        spawned: Option<Tile>,
        max_tile: Option<Tile>,
    ) {
        self.moves += 1;
        self.score = self.score.saturating_add(score_delta);
        self.direction_counter[direction.index()] += 1;
        if let Some(tile) = spawned {
            self.record_spawn(tile);
        }
        self.observe_max_tile(max_tile);
    }
}
