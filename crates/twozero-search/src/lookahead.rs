//! Fixed-depth single-player lookahead.
//!
//! For each legal first move the search samples one random spawn, tries every direction
//! on the result, and recurses a fixed number of plies, keeping the best leaf score. No
//! adversary and no pruning: cheap and noisy, and it ignores the time budget.

use std::time::Duration;

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use twozero_engine::{Board, Direction, TileSpawner};
use twozero_evaluator::board_evaluator::BoardEvaluator;

use crate::strategy::{Decision, SearchStrategy};

#[derive(Debug)]
pub struct LookaheadSearch {
    evaluator: Box<dyn BoardEvaluator>,
    depth: usize,
    spawner: TileSpawner,
    rng: Pcg32,
}

impl LookaheadSearch {
    /// Plies searched after the first move.
    pub const DEFAULT_DEPTH: usize = 4;

    #[must_use]
    pub fn new(evaluator: Box<dyn BoardEvaluator>, seed: u64) -> Self {
        Self {
            evaluator,
            depth: Self::DEFAULT_DEPTH,
            spawner: TileSpawner::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Best leaf score reachable from `board` in `depth` more plies.
    ///
    /// Dead ends score `f32::NEG_INFINITY`.
    fn expand(&mut self, board: &Board, depth: usize) -> f32 {
        if depth == 0 {
            return self.evaluator.evaluate(board);
        }
        let mut spawned = board.clone();
        self.spawner.spawn(&mut spawned, &mut self.rng);
        let mut best = f32::NEG_INFINITY;
        for direction in Direction::ALL {
            if let Some(outcome) = spawned.try_move(direction) {
                best = best.max(self.expand(&outcome.board, depth - 1));
            }
        }
        best
    }
}

impl SearchStrategy for LookaheadSearch {
    fn choose_best_direction(&mut self, board: &Board, _budget: Duration) -> Decision {
        let mut best: Option<(Direction, f32)> = None;
        for direction in Direction::ALL {
            let Some(outcome) = board.try_move(direction) else {
                continue;
            };
            let score = self.expand(&outcome.board, self.depth);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((direction, score));
            }
        }
        tracing::trace!(?best, "lookahead finished");
        best.map_or(Decision::NoLegalMove, |(direction, _)| Decision::Move(direction))
    }
}
