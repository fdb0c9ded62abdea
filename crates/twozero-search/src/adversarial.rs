//! Alpha-beta search over player moves and adversarial tile spawns.
//!
//! The random spawn step of the real game is modeled as an opponent that picks the cell
//! and value (2 or 4) that hurts the player most. This is cheaper than expectimax and
//! gives a pessimistic, stable estimate for bounded-time play.
//!
//! # Tree
//!
//! ```text
//! Player (max)      tries Up, Right, Down, Left; skips illegal directions
//!     ↓
//! Adversary (min)   places a 2 or a 4 on an empty cell
//!     ↓
//! Player (max)      same depth budget minus one
//! ```
//!
//! Only player moves consume depth: a search at depth `d` looks at `d` player moves and
//! evaluates the board after the last one.
//!
//! # Spawn pruning
//!
//! Expanding every empty cell with both values would make the adversary's branching
//! factor up to `2 × 16`. By default the adversary first scores every placement with the
//! smoothness term alone and keeps only the placements that are worst for the player
//! (all of them on ties). This is a heuristic approximation: the retained set is not
//! guaranteed to contain the placement a full search would pick. [`SpawnPruning`] selects
//! the proxy, or turns pruning off.
//!
//! # Iterative deepening
//!
//! [`AdversarialSearch::search`] runs depth 1, 2, 3, ... from the same root board until
//! the time budget runs out or [`AdversarialSearch::max_depth`] is reached. Depth 1
//! always runs to completion. Deeper iterations poll the clock while recursing; an
//! interrupted iteration is discarded and the last completed one is reported.

use std::time::{Duration, Instant};

use twozero_engine::{Board, Direction, Tile};
use twozero_evaluator::{board_analysis::BoardAnalysis, board_evaluator::BoardEvaluator};

use crate::strategy::{Decision, SearchStrategy};

/// Proxy the adversary uses to narrow its candidate spawns.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr,
)]
pub enum SpawnPruning {
    /// Keep the placements that minimize the smoothness term.
    #[default]
    #[display("smoothness")]
    Smoothness,
    /// Keep the placements that minimize the full evaluator score.
    #[display("evaluator")]
    Evaluator,
    /// Keep every placement.
    #[display("exhaustive")]
    Exhaustive,
}

/// Result of one iterative-deepening search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub decision: Decision,
    /// Score of the chosen direction at the reported depth.
    ///
    /// `f32::NEG_INFINITY` when there is no legal move, or when every line of play at
    /// the reported depth ends in a terminal board.
    pub score: f32,
    /// Deepest completed iteration; `0` when the decision needed no search.
    pub depth: usize,
    /// Nodes visited over all iterations, including the discarded one.
    pub nodes: u64,
    /// Alpha-beta cutoffs over all iterations.
    pub cutoffs: u64,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct AdversarialSearch {
    evaluator: Box<dyn BoardEvaluator>,
    pruning: SpawnPruning,
    max_depth: usize,
}

impl AdversarialSearch {
    pub const DEFAULT_MAX_DEPTH: usize = 8;

    #[must_use]
    pub fn new(evaluator: Box<dyn BoardEvaluator>) -> Self {
        Self {
            evaluator,
            pruning: SpawnPruning::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: SpawnPruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// # Panics
    ///
    /// Panics if `max_depth` is zero.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        assert!(max_depth > 0, "max_depth must be positive");
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn pruning(&self) -> SpawnPruning {
        self.pruning
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Chooses a direction for `board` within roughly `budget` of wall-clock time.
    ///
    /// The root board is only read; every node of the tree works on its own copy.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use twozero_engine::Board;
    /// use twozero_evaluator::board_evaluator::HeuristicEvaluator;
    /// use twozero_search::{adversarial::AdversarialSearch, strategy::Decision};
    ///
    /// let search = AdversarialSearch::new(Box::new(HeuristicEvaluator::default()));
    ///
    /// let stuck: Board = "2,4/4,2".parse().unwrap();
    /// assert_eq!(search.search(&stuck, Duration::ZERO).decision, Decision::NoLegalMove);
    ///
    /// let board: Board = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
    /// let report = search.search(&board, Duration::ZERO);
    /// assert!(report.decision.is_move());
    /// assert_eq!(report.depth, 1);
    /// ```
    #[must_use]
    pub fn search(&self, board: &Board, budget: Duration) -> SearchReport {
        let start = Instant::now();
        let legal = board.legal_directions();
        match legal.as_slice() {
            [] => {
                return SearchReport {
                    decision: Decision::NoLegalMove,
                    score: f32::NEG_INFINITY,
                    depth: 0,
                    nodes: 0,
                    cutoffs: 0,
                    elapsed: start.elapsed(),
                };
            }
            [direction] => {
                let outcome = board.apply_move(*direction);
                return SearchReport {
                    decision: Decision::Move(*direction),
                    score: self.evaluator.evaluate(&outcome.board),
                    depth: 0,
                    nodes: 1,
                    cutoffs: 0,
                    elapsed: start.elapsed(),
                };
            }
            _ => {}
        }

        // `None` when the budget is too large to represent: no deadline at all
        let deadline = start.checked_add(budget);
        let mut searcher = Searcher::new(self.evaluator.as_ref(), self.pruning);
        let mut best = None;
        for depth in 1..=self.max_depth {
            if depth > 1 {
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    break;
                }
                searcher.deadline = deadline;
            }
            match searcher.player(board, depth, f32::NEG_INFINITY, f32::INFINITY) {
                Ok((Some(direction), score)) => {
                    tracing::debug!(
                        depth,
                        %direction,
                        score,
                        nodes = searcher.nodes,
                        cutoffs = searcher.cutoffs,
                        elapsed = ?start.elapsed(),
                        "completed search depth"
                    );
                    best = Some((direction, score, depth));
                }
                Ok((None, _)) => break,
                Err(Interrupted) => {
                    tracing::trace!(depth, elapsed = ?start.elapsed(), "discarded search depth");
                    break;
                }
            }
        }

        let (decision, score, depth) = match best {
            Some((direction, score, depth)) => (Decision::Move(direction), score, depth),
            // depth 1 runs without a deadline, so this only guards the impossible case
            None => (Decision::Move(legal[0]), f32::NEG_INFINITY, 0),
        };
        SearchReport {
            decision,
            score,
            depth,
            nodes: searcher.nodes,
            cutoffs: searcher.cutoffs,
            elapsed: start.elapsed(),
        }
    }
}

impl SearchStrategy for AdversarialSearch {
    fn choose_best_direction(&mut self, board: &Board, budget: Duration) -> Decision {
        self.search(board, budget).decision
    }
}

/// The deadline passed while an iteration was in progress.
#[derive(Debug)]
struct Interrupted;

/// Visited nodes between two clock reads.
const CLOCK_CHECK_INTERVAL: u64 = 64;

#[derive(Debug)]
struct Searcher<'a> {
    evaluator: &'a dyn BoardEvaluator,
    pruning: SpawnPruning,
    deadline: Option<Instant>,
    nodes: u64,
    cutoffs: u64,
}

impl<'a> Searcher<'a> {
    fn new(evaluator: &'a dyn BoardEvaluator, pruning: SpawnPruning) -> Self {
        Self {
            evaluator,
            pruning,
            deadline: None,
            nodes: 0,
            cutoffs: 0,
        }
    }

    fn visit(&mut self) -> Result<(), Interrupted> {
        self.nodes += 1;
        if let Some(deadline) = self.deadline
            && self.nodes.is_multiple_of(CLOCK_CHECK_INTERVAL)
            && Instant::now() >= deadline
        {
            return Err(Interrupted);
        }
        Ok(())
    }

    /// Maximizing node. Returns the best direction and its value, or `None` and
    /// `f32::NEG_INFINITY` when the board has no legal move.
    fn player(
        &mut self,
        board: &Board,
        depth: usize,
        alpha: f32,
        beta: f32,
    ) -> Result<(Option<Direction>, f32), Interrupted> {
        self.visit()?;
        let mut best_direction = None;
        let mut best = f32::NEG_INFINITY;
        for direction in Direction::ALL {
            let Some(outcome) = board.try_move(direction) else {
                continue;
            };
            let score = if depth <= 1 {
                self.evaluator.evaluate(&outcome.board)
            } else {
                self.adversary(&outcome.board, depth - 1, alpha.max(best), beta)?
            };
            if best_direction.is_none() || score > best {
                best = score;
                best_direction = Some(direction);
            }
            if best > beta {
                self.cutoffs += 1;
                return Ok((best_direction, beta));
            }
        }
        Ok((best_direction, best))
    }

    /// Minimizing node over the retained spawn placements.
    fn adversary(
        &mut self,
        board: &Board,
        depth: usize,
        alpha: f32,
        beta: f32,
    ) -> Result<f32, Interrupted> {
        self.visit()?;
        let candidates = self.spawn_candidates(board);
        if candidates.is_empty() {
            // nothing to place; the player moves again on the same board
            return Ok(self.player(board, depth, alpha, beta)?.1);
        }
        let mut best = f32::INFINITY;
        for child in &candidates {
            let (_, score) = self.player(child, depth, alpha, beta.min(best))?;
            if score < best {
                best = score;
            }
            if best < alpha {
                self.cutoffs += 1;
                return Ok(alpha);
            }
        }
        Ok(best)
    }

    /// Boards reachable by one spawn, 2s before 4s, narrowed by the pruning proxy.
    fn spawn_candidates(&self, board: &Board) -> Vec<Board> {
        let children = Tile::SPAWNABLE.into_iter().flat_map(|tile| {
            board
                .empty_positions()
                .map(move |pos| board.with_tile(pos, tile))
        });
        match self.pruning {
            SpawnPruning::Exhaustive => children.collect(),
            SpawnPruning::Smoothness => keep_worst(children, |child| {
                -f64::from(BoardAnalysis::new(child).roughness())
            }),
            SpawnPruning::Evaluator => {
                keep_worst(children, |child| f64::from(self.evaluator.evaluate(child)))
            }
        }
    }
}

/// Keeps the boards with the lowest proxy score, preserving their order.
fn keep_worst<I, F>(children: I, proxy: F) -> Vec<Board>
where
    I: Iterator<Item = Board>,
    F: Fn(&Board) -> f64,
{
    let scored = children
        .map(|child| {
            let score = proxy(&child);
            (child, score)
        })
        .collect::<Vec<_>>();
    let Some(worst) = scored.iter().map(|(_, score)| *score).min_by(f64::total_cmp) else {
        return vec![];
    };
    scored
        .into_iter()
        .filter(|(_, score)| score.total_cmp(&worst).is_eq())
        .map(|(child, _)| child)
        .collect()
}
