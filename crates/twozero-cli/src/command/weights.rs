use std::path::PathBuf;

use twozero_evaluator::weights::EvaluationWeights;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WeightsArg {
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &WeightsArg) -> anyhow::Result<()> {
    let WeightsArg { output } = arg;
    Output::save_json(&EvaluationWeights::DEFAULT, output.clone())
}
