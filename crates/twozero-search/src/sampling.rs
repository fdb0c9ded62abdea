//! Monte Carlo move selection.
//!
//! Each round plays one random game (random legal moves, real spawn odds) after every
//! legal first move. Rounds repeat until the budget is spent; the first move with the
//! highest mean final score wins. At least one round always runs.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use twozero_engine::{Board, Direction, TileSpawner};

use crate::strategy::{Decision, SearchStrategy};

#[derive(Debug, Clone)]
pub struct SamplingSearch {
    rollout_moves: usize,
    max_rounds: usize,
    spawner: TileSpawner,
    rng: Pcg32,
}

#[derive(Debug, Clone, Copy, Default)]
struct RolloutStats {
    total_score: u64,
    rollouts: u32,
}

impl RolloutStats {
    #[expect(clippy::cast_precision_loss)]
    fn mean(self) -> f64 {
        if self.rollouts == 0 {
            return f64::NEG_INFINITY;
        }
        self.total_score as f64 / f64::from(self.rollouts)
    }
}

impl SamplingSearch {
    /// Random moves played after the first one in each rollout.
    pub const DEFAULT_ROLLOUT_MOVES: usize = 40;
    /// Upper bound on rounds, so an unbounded budget still terminates.
    pub const DEFAULT_MAX_ROUNDS: usize = 256;

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rollout_moves: Self::DEFAULT_ROLLOUT_MOVES,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            spawner: TileSpawner::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_rollout_moves(mut self, rollout_moves: usize) -> Self {
        self.rollout_moves = rollout_moves;
        self
    }

    /// # Panics
    ///
    /// Panics if `max_rounds` is zero.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        assert!(max_rounds > 0, "max_rounds must be positive");
        self.max_rounds = max_rounds;
        self
    }

    /// Plays `first`, then random moves, and returns the final score.
    fn rollout(&mut self, board: &Board, first: Direction) -> u64 {
        let mut board = board.apply_move(first).board;
        self.spawner.spawn(&mut board, &mut self.rng);
        for _ in 0..self.rollout_moves {
            let legal = board.legal_directions();
            let Some(direction) = legal.choose(&mut self.rng) else {
                break;
            };
            board = board.apply_move(*direction).board;
            self.spawner.spawn(&mut board, &mut self.rng);
        }
        board.score()
    }
}

impl SearchStrategy for SamplingSearch {
    fn choose_best_direction(&mut self, board: &Board, budget: Duration) -> Decision {
        let start = Instant::now();
        let legal = board.legal_directions();
        match legal.as_slice() {
            [] => return Decision::NoLegalMove,
            [direction] => return Decision::Move(*direction),
            _ => {}
        }

        let mut stats = legal
            .iter()
            .map(|_| RolloutStats::default())
            .collect::<ArrayVec<_, { Direction::LEN }>>();
        let mut rounds = 0;
        loop {
            for (direction, entry) in legal.iter().zip(&mut stats) {
                entry.total_score += self.rollout(board, *direction);
                entry.rollouts += 1;
            }
            rounds += 1;
            if rounds >= self.max_rounds || start.elapsed() >= budget {
                break;
            }
        }

        let means = stats
            .iter()
            .copied()
            .map(RolloutStats::mean)
            .collect::<ArrayVec<f64, { Direction::LEN }>>();
        let mut best = 0;
        for (i, mean) in means.iter().enumerate().skip(1) {
            if *mean > means[best] {
                best = i;
            }
        }
        tracing::trace!(rounds, elapsed = ?start.elapsed(), "sampling finished");
        Decision::Move(legal[best])
    }
}
