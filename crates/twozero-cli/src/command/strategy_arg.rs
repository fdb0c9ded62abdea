use std::path::PathBuf;

use twozero_search::{
    adversarial::{AdversarialSearch, SpawnPruning},
    strategy::{StrategyKind, StrategyOptions},
};

use crate::util;

/// Strategy selection shared by the commands that search.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StrategyArg {
    /// Search strategy
    #[arg(long, default_value = "adversarial")]
    pub(crate) strategy: StrategyKind,
    /// Evaluation weights file (JSON); built-in defaults if omitted. Not used by `sampling`
    #[arg(long)]
    weights: Option<PathBuf>,
    /// How the adversarial search narrows spawns: smoothness, evaluator or exhaustive
    #[arg(long, default_value = "smoothness")]
    pruning: SpawnPruning,
    /// Deepest iteration of the adversarial search
    #[arg(long, default_value_t = AdversarialSearch::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl StrategyArg {
    /// Loads the weights and checks the search limits.
    pub(crate) fn options(&self, seed: u64) -> anyhow::Result<StrategyOptions> {
        anyhow::ensure!(self.max_depth > 0, "--max-depth must be at least 1");
        if self.weights.is_some() && !self.strategy.uses_evaluator() {
            tracing::warn!(strategy = %self.strategy, "--weights has no effect on this strategy");
        }
        Ok(StrategyOptions {
            weights: util::load_weights(self.weights.as_deref())?,
            pruning: self.pruning,
            max_depth: self.max_depth,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        strategy: StrategyArg,
    }

    fn parse(args: &[&str]) -> StrategyArg {
        TestArgs::try_parse_from(iter::once("twozero").chain(args.iter().copied()))
            .unwrap()
            .strategy
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).options(7).unwrap();
        assert_eq!(
            options,
            StrategyOptions {
                seed: 7,
                ..StrategyOptions::default()
            }
        );
    }

    #[test]
    fn test_pruning_and_depth_flags() {
        let arg = parse(&["--pruning", "exhaustive", "--max-depth", "3"]);
        let options = arg.options(0).unwrap();
        assert_eq!(options.pruning, SpawnPruning::Exhaustive);
        assert_eq!(options.max_depth, 3);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(parse(&["--max-depth", "0"]).options(0).is_err());
    }

    #[test]
    fn test_unknown_pruning_rejected() {
        let args = ["twozero", "--pruning", "random"];
        assert!(TestArgs::try_parse_from(args).is_err());
    }
}
