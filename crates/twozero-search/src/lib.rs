//! Move selection for 2048 boards.
//!
//! Every strategy implements [`SearchStrategy`](strategy::SearchStrategy): given a board
//! and a wall-clock budget it returns a [`Decision`](strategy::Decision), either a
//! direction or the explicit "no legal move" outcome. Strategies read the board and never
//! modify it.
//!
//! | Strategy                                   | Approach                                        |
//! |--------------------------------------------|-------------------------------------------------|
//! | [`AdversarialSearch`](adversarial::AdversarialSearch) | alpha-beta against worst-case spawns, iterative deepening |
//! | [`LookaheadSearch`](lookahead::LookaheadSearch)       | fixed-depth single-player lookahead             |
//! | [`SamplingSearch`](sampling::SamplingSearch)          | Monte Carlo rollouts                            |
//!
//! [`StrategyKind`](strategy::StrategyKind) names the strategies for command-line use
//! and builds them.

pub mod adversarial;
pub mod lookahead;
pub mod sampling;
pub mod strategy;
