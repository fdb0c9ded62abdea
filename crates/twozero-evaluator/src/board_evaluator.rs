//! Board evaluation: scoring a position for the player.
//!
//! [`BoardEvaluator`] is the seam every search strategy calls at its leaves. The shipped
//! implementation, [`HeuristicEvaluator`], is a linear weighted sum of the
//! [`EvaluationTerms`] extracted from a [`BoardAnalysis`].
//!
//! Evaluation is a pure function of the board: the same board always yields the same
//! score, and evaluating one board never affects the score of another.

use std::fmt;

use twozero_engine::Board;

use crate::{board_analysis::BoardAnalysis, weights::EvaluationWeights};

/// Emptiness term for a board with no empty cells.
///
/// `ln(n)` is at least `0.0` for every `n >= 1`, so a full board always ranks strictly
/// below any board with room left.
pub const EMPTY_BOARD_FLOOR: f32 = -1.0;

/// Scores boards from the player's point of view (higher is better).
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, board: &Board) -> f32;

    /// Scores a board whose analysis the caller already holds.
    ///
    /// The default implementation ignores the cached metrics and calls
    /// [`Self::evaluate`].
    fn evaluate_analysis(&self, analysis: &BoardAnalysis<'_>) -> f32 {
        self.evaluate(analysis.board())
    }
}

/// Unweighted heuristic values of one board, each oriented so that larger is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationTerms {
    pub smoothness: f32,
    pub monotonicity: f32,
    pub emptiness: f32,
    pub max_tile: f32,
    pub raw_score: f32,
    pub islands: f32,
}

impl EvaluationTerms {
    #[must_use]
    pub fn from_analysis(analysis: &BoardAnalysis<'_>) -> Self {
        Self {
            smoothness: smoothness_term(analysis),
            monotonicity: monotonicity_term(analysis),
            emptiness: emptiness_term(analysis),
            max_tile: max_tile_term(analysis),
            raw_score: raw_score_term(analysis),
            islands: islands_term(analysis),
        }
    }

    /// Linear combination of the terms with `weights`.
    #[must_use]
    pub fn weighted(&self, weights: &EvaluationWeights) -> f32 {
        self.smoothness * weights.smoothness
            + self.monotonicity * weights.monotonicity
            + self.emptiness * weights.emptiness
            + self.max_tile * weights.max_tile
            + self.raw_score * weights.raw_score
            + self.islands * weights.islands
    }
}

#[expect(clippy::cast_precision_loss)]
fn smoothness_term(analysis: &BoardAnalysis<'_>) -> f32 {
    -(analysis.roughness() as f32)
}

#[expect(clippy::cast_precision_loss)]
fn monotonicity_term(analysis: &BoardAnalysis<'_>) -> f32 {
    analysis.monotonicity() as f32
}

#[expect(clippy::cast_precision_loss)]
fn emptiness_term(analysis: &BoardAnalysis<'_>) -> f32 {
    match analysis.empty_count() {
        0 => EMPTY_BOARD_FLOOR,
        n => (n as f32).ln(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn max_tile_term(analysis: &BoardAnalysis<'_>) -> f32 {
    analysis.max_tile().map_or(0.0, |tile| tile.value() as f32)
}

#[expect(clippy::cast_precision_loss)]
fn raw_score_term(analysis: &BoardAnalysis<'_>) -> f32 {
    analysis.board().score() as f32
}

#[expect(clippy::cast_precision_loss)]
fn islands_term(analysis: &BoardAnalysis<'_>) -> f32 {
    -(analysis.islands() as f32)
}

/// Weighted sum of smoothness, monotonicity, emptiness, max tile, raw score and islands.
///
/// ```
/// use twozero_engine::Board;
/// use twozero_evaluator::{
///     board_evaluator::{BoardEvaluator, EMPTY_BOARD_FLOOR, HeuristicEvaluator},
///     weights::EvaluationWeights,
/// };
///
/// let evaluator = HeuristicEvaluator::new(EvaluationWeights::DEFAULT);
/// let full: Board = "2,4/8,16".parse().unwrap();
/// assert_eq!(evaluator.terms(&full).emptiness, EMPTY_BOARD_FLOOR);
/// assert!(evaluator.evaluate(&full).is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: EvaluationWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    /// Returns every unweighted term for `board`, including ones whose weight is zero.
    #[must_use]
    pub fn terms(&self, board: &Board) -> EvaluationTerms {
        EvaluationTerms::from_analysis(&BoardAnalysis::new(board))
    }
}

impl BoardEvaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board) -> f32 {
        self.evaluate_analysis(&BoardAnalysis::new(board))
    }

    fn evaluate_analysis(&self, analysis: &BoardAnalysis<'_>) -> f32 {
        let w = &self.weights;
        let mut score = smoothness_term(analysis) * w.smoothness
            + monotonicity_term(analysis) * w.monotonicity
            + emptiness_term(analysis) * w.emptiness
            + max_tile_term(analysis) * w.max_tile
            + raw_score_term(analysis) * w.raw_score;
        // flood fill is the most expensive metric
        if w.islands != 0.0 {
            score += islands_term(analysis) * w.islands;
        }
        score
    }
}
