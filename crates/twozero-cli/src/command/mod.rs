use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, suggest::SuggestArg, weights::WeightsArg};

mod auto_play;
mod strategy_arg;
mod suggest;
mod weights;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play headless games with a search strategy
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the direction a strategy picks for one board
    Suggest(#[clap(flatten)] SuggestArg),
    /// Write the default evaluation weights as JSON
    Weights(#[clap(flatten)] WeightsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
        Mode::Weights(arg) => weights::run(&arg)?,
    }
    Ok(())
}
