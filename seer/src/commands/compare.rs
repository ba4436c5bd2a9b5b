use std::path::PathBuf;

use color_eyre::eyre::Result;
use itertools::Itertools;
use multiagent_minimax::{
    AdversarialSearch, Evaluation, MultiAgentSearcher, SearchConfig, Strategy, DEFAULT_DEPTH,
};

use super::load_layout;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Layout file to search from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Evaluation function for the states where the search stops: score or better
    #[clap(short, long, value_parser, default_value = "score")]
    eval_fn: Evaluation,

    /// Number of plies to look ahead
    #[clap(short, long, value_parser, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let world = load_layout(&self.layout)?;

        println!("{world}");
        println!();
        println!(
            "{:<12}{:<8}{:>10}{:>10}{:>10}  options",
            "strategy", "action", "value", "nodes", "cutoffs"
        );

        for strategy in Strategy::ALL {
            let searcher = MultiAgentSearcher::new(
                strategy,
                SearchConfig::new(self.eval_fn, self.depth),
                "seer-compare",
            );
            let result = searcher.select_action(&world)?;

            let options = result
                .options
                .iter()
                .map(|(action, value)| format!("{action}={value}"))
                .join(", ");

            println!(
                "{:<12}{:<8}{:>10}{:>10}{:>10}  {options}",
                strategy.to_string(),
                result.action.to_string(),
                result.value,
                result.stats.nodes_visited,
                result.stats.cutoffs,
            );
        }

        Ok(())
    }
}
