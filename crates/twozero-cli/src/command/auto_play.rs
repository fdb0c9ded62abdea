use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use twozero_engine::{Board, Game, GameSeed};
use twozero_search::strategy::{Decision, StrategyOptions};

use super::strategy_arg::StrategyArg;
use crate::{
    model::session_record::{SessionCollection, SessionRecord},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    strategy: StrategyArg,
    /// Time budget per move, in milliseconds
    #[arg(long, default_value_t = 50)]
    budget_ms: u64,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Seed of the first game as 32 hex characters; later games use the following seeds
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Stop each game after this many moves
    #[arg(long)]
    max_moves: Option<usize>,
    /// Board width
    #[arg(long, default_value_t = Board::STANDARD_SIDE)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = Board::STANDARD_SIDE)]
    height: usize,
    /// Output file path for the session records (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        strategy,
        budget_ms,
        games,
        seed,
        max_moves,
        width,
        height,
        output,
    } = arg;

    let options = strategy.options(0)?;
    let strategy = strategy.strategy;
    let budget = Duration::from_millis(*budget_ms);
    let first_seed = seed.unwrap_or_else(rand::random);

    let mut sessions = Vec::with_capacity(*games);
    for i in 0..*games {
        let seed = nth_seed(first_seed, i);
        let mut search = strategy.build(&StrategyOptions {
            seed: strategy_seed(seed),
            ..options
        });
        let mut game = Game::with_seed(*width, *height, seed)
            .with_context(|| format!("cannot start a {width}x{height} game"))?;
        tracing::info!(game = i, %seed, %strategy, "game started");

        while max_moves.is_none_or(|max| game.stats().moves() < max) {
            match search.choose_best_direction(game.board(), budget) {
                Decision::NoLegalMove => break,
                Decision::Move(direction) => {
                    game.play(direction)
                        .with_context(|| format!("{strategy} chose an illegal move"))?;
                }
            }
        }

        let record = SessionRecord::from_game(&game);
        tracing::info!(
            game = i,
            score = record.score,
            max_tile = record.max_tile,
            moves = record.moves,
            game_over = record.is_game_over,
            "game finished"
        );
        sessions.push(record);
    }

    print_summary(&sessions);
    let collection = SessionCollection {
        strategy: strategy.to_string(),
        budget_ms: *budget_ms,
        weights: options.weights,
        sessions,
    };
    Output::save_json(&collection, output.clone())?;
    Ok(())
}

fn nth_seed(first: GameSeed, n: usize) -> GameSeed {
    GameSeed::from_u128(first.as_u128().wrapping_add(n as u128))
}

/// Folds a game seed into the 64-bit seed the strategies take.
#[expect(clippy::cast_possible_truncation)]
fn strategy_seed(seed: GameSeed) -> u64 {
    let value = seed.as_u128();
    (value >> 64) as u64 ^ value as u64
}

fn print_summary(sessions: &[SessionRecord]) {
    let Some(best) = sessions.iter().max_by_key(|record| record.score) else {
        return;
    };
    let total_score = sessions.iter().map(|record| record.score).sum::<u64>();
    let game_count = u64::try_from(sessions.len()).unwrap_or(u64::MAX);
    eprintln!("Played {} games", sessions.len());
    eprintln!("  Mean score: {}", total_score / game_count);
    eprintln!("  Best score: {} (seed {})", best.score, best.seed);
    eprintln!(
        "  Max tile:   {}",
        sessions.iter().map(|record| record.max_tile).max().unwrap_or(0)
    );
    for (i, record) in sessions.iter().enumerate() {
        eprintln!(
            "  {i:3}: score {:>7}  max tile {:>5}  moves {:>5}",
            record.score, record.max_tile, record.moves
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_seed_is_sequential() {
        let first = GameSeed::from_u128(u128::MAX);
        assert_eq!(nth_seed(first, 0), first);
        assert_eq!(nth_seed(first, 1), GameSeed::from_u128(0));
    }

    #[test]
    fn test_strategy_seed_mixes_both_halves() {
        assert_eq!(strategy_seed(GameSeed::from_u128(0)), 0);
        assert_eq!(strategy_seed(GameSeed::from_u128(1 << 64)), 1);
        assert_eq!(strategy_seed(GameSeed::from_u128((1 << 64) | 1)), 0);
    }
}
