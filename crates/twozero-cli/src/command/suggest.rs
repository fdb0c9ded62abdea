use std::time::Duration;

use anyhow::Context;
use twozero_engine::Board;

use super::strategy_arg::StrategyArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Board in row notation, e.g. `2,2,0,0/0,4,0,0/0,0,0,0/0,0,0,0@8`
    board: String,
    #[clap(flatten)]
    strategy: StrategyArg,
    /// Time budget for the decision, in milliseconds
    #[arg(long, default_value_t = 100)]
    budget_ms: u64,
    /// Seed for strategies that sample random spawns
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let SuggestArg {
        board,
        strategy,
        budget_ms,
        seed,
    } = arg;

    let board: Board = board
        .parse()
        .with_context(|| format!("invalid board: {board}"))?;
    let options = strategy.options(*seed)?;
    let strategy = strategy.strategy;
    let mut search = strategy.build(&options);
    let decision = search.choose_best_direction(&board, Duration::from_millis(*budget_ms));
    tracing::debug!(%strategy, %decision, "suggestion ready");

    println!("{decision}");
    Ok(())
}
