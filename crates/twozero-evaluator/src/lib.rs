//! Positional evaluation of 2048 boards.
//!
//! The evaluator turns a [`Board`](twozero_engine::Board) into a single `f32` score
//! (higher is better for the player). It is the leaf function of every search strategy.
//!
//! # Architecture
//!
//! ```text
//! BoardEvaluator::evaluate (weighted sum)
//!     ↓ uses
//! EvaluationTerms (one value per heuristic, higher is better)
//!     ↓ computed from
//! BoardAnalysis (lazily cached board metrics)
//! ```
//!
//! - [`board_analysis`] - smoothness, monotonicity, empty cells, max tile and island
//!   count for one board, each computed on first access and cached
//! - [`weights`] - [`EvaluationWeights`](weights::EvaluationWeights), the fixed
//!   coefficients of the linear combination
//! - [`board_evaluator`] - the [`BoardEvaluator`](board_evaluator::BoardEvaluator)
//!   trait and the [`HeuristicEvaluator`](board_evaluator::HeuristicEvaluator)
//!
//! # Terms
//!
//! | Term         | Raw value                                               |
//! |--------------|---------------------------------------------------------|
//! | smoothness   | `-Σ |log2 a - log2 b|` over right/down nearest neighbors |
//! | monotonicity | `Σ max(increase, decrease)` over rows, then columns     |
//! | emptiness    | `ln(empty cells)`, `-1.0` for a full board              |
//! | max tile     | value of the largest tile                               |
//! | raw score    | accumulated merge score                                 |
//! | islands      | `-(number of same-valued 4-connected regions)`          |
//!
//! # Design: Linear Weighted Sum
//!
//! As with any hand-tuned evaluator, the weights encode intuition rather than learned
//! values. The terms are not normalized, so a weight's effect depends on the typical
//! magnitude of its term (max tile and raw score grow with the game, smoothness and
//! monotonicity stay within a few dozen).
//!
//! # Example
//!
//! ```
//! use twozero_engine::Board;
//! use twozero_evaluator::{
//!     board_evaluator::{BoardEvaluator, HeuristicEvaluator},
//!     weights::EvaluationWeights,
//! };
//!
//! let evaluator = HeuristicEvaluator::new(EvaluationWeights::DEFAULT);
//! let ordered: Board = "8,4,2,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
//! let shuffled: Board = "8,2,4,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
//!
//! assert!(evaluator.evaluate(&ordered) > evaluator.evaluate(&shuffled));
//! ```

pub mod board_analysis;
pub mod board_evaluator;
pub mod weights;
