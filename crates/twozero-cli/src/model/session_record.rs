use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twozero_engine::{Board, Game, GameSeed, GameStats, Tile};
use twozero_evaluator::weights::EvaluationWeights;

/// Every game of one `auto-play` run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionCollection {
    pub strategy: String,
    pub budget_ms: u64,
    pub weights: EvaluationWeights,
    pub sessions: Vec<SessionRecord>,
}

/// Outcome of one headless game.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionRecord {
    pub seed: GameSeed,
    pub finished_at: DateTime<Utc>,
    pub score: u64,
    pub max_tile: u64,
    pub moves: usize,
    pub is_game_over: bool,
    pub final_board: Board,
    pub stats: GameStats,
}

impl SessionRecord {
    pub fn from_game(game: &Game) -> Self {
        let stats = game.stats().clone();
        Self {
            seed: game.seed(),
            finished_at: Utc::now(),
            score: game.board().score(),
            max_tile: game.board().max_tile().map_or(0, Tile::value),
            moves: stats.moves(),
            is_game_over: game.is_over(),
            final_board: game.board().clone(),
            stats,
        }
    }
}
