use std::{fmt, time::Duration};

use twozero_engine::{Board, Direction};
use twozero_evaluator::{board_evaluator::HeuristicEvaluator, weights::EvaluationWeights};

use crate::{
    adversarial::{AdversarialSearch, SpawnPruning},
    lookahead::LookaheadSearch,
    sampling::SamplingSearch,
};

/// Outcome of asking a strategy for a move.
///
/// `NoLegalMove` means the board is terminal. It is distinct from any `Move`, so a
/// driver can stop the game instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Decision {
    #[display("{_0}")]
    Move(Direction),
    #[display("no legal move")]
    NoLegalMove,
}

impl Decision {
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Move(direction) => Some(direction),
            Self::NoLegalMove => None,
        }
    }
}

/// A move-selection policy behind a single contract.
///
/// Implementations never mutate `board`; the caller applies the returned direction.
pub trait SearchStrategy: fmt::Debug + Send {
    fn choose_best_direction(&mut self, board: &Board, budget: Duration) -> Decision;
}

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr,
)]
pub enum StrategyKind {
    #[default]
    #[display("adversarial")]
    Adversarial,
    #[display("lookahead")]
    Lookahead,
    #[display("sampling")]
    Sampling,
}

impl StrategyKind {
    /// Whether the strategy scores boards with [`StrategyOptions::weights`].
    #[must_use]
    pub fn uses_evaluator(self) -> bool {
        !matches!(self, Self::Sampling)
    }

    /// Builds a boxed strategy from the options it uses; the others are ignored.
    #[must_use]
    pub fn build(self, options: &StrategyOptions) -> Box<dyn SearchStrategy> {
        let evaluator = Box::new(HeuristicEvaluator::new(options.weights));
        match self {
            Self::Adversarial => Box::new(
                AdversarialSearch::new(evaluator)
                    .with_pruning(options.pruning)
                    .with_max_depth(options.max_depth),
            ),
            Self::Lookahead => Box::new(LookaheadSearch::new(evaluator, options.seed)),
            Self::Sampling => Box::new(SamplingSearch::new(options.seed)),
        }
    }
}

/// Settings for [`StrategyKind::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyOptions {
    /// Evaluator weights (adversarial, lookahead).
    pub weights: EvaluationWeights,
    /// Spawn pruning proxy (adversarial).
    pub pruning: SpawnPruning,
    /// Deepest iteration, at least 1 (adversarial).
    pub max_depth: usize,
    /// Seed for the random spawns (lookahead, sampling).
    pub seed: u64,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            weights: EvaluationWeights::DEFAULT,
            pruning: SpawnPruning::default(),
            max_depth: AdversarialSearch::DEFAULT_MAX_DEPTH,
            seed: 0,
        }
    }
}
