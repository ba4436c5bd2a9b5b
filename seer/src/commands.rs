pub mod choose;
pub mod compare;
pub mod fuzz;
pub mod play;

use std::path::Path;

use choose::Choose;
use compare::Compare;
use fuzz::Fuzz;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use gridworld::GridWorld;
use multiagent_minimax::{Evaluation, MultiAgentSearcher, SearchConfig, Strategy, DEFAULT_DEPTH};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pick the next move for pacman on a layout
    Choose(Choose),
    /// Play a whole game against randomly moving ghosts
    Play(Play),
    /// Run every strategy on the same layout
    Compare(Compare),
    /// Check alpha-beta against minimax on random layouts
    Fuzz(Fuzz),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Choose(c) => c.run()?,
            Command::Play(p) => p.run()?,
            Command::Compare(c) => c.run()?,
            Command::Fuzz(f) => f.run()?,
        }

        Ok(())
    }
}

/// Flags shared by every command that runs a single searcher
#[derive(clap::Args, Debug, Clone, Copy)]
pub(crate) struct SearchArgs {
    /// minimax, alphabeta or expectimax
    #[clap(short, long, value_parser, default_value = "minimax")]
    strategy: Strategy,

    /// Evaluation function for the states where the search stops: score or better
    #[clap(short, long, value_parser, default_value = "score")]
    eval_fn: Evaluation,

    /// Number of plies to look ahead
    #[clap(short, long, value_parser, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
}

impl SearchArgs {
    pub(crate) fn searcher(&self) -> MultiAgentSearcher<Evaluation> {
        MultiAgentSearcher::new(
            self.strategy,
            SearchConfig::new(self.eval_fn, self.depth),
            "seer",
        )
    }
}

pub(crate) fn load_layout(path: &Path) -> Result<GridWorld> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Could not read layout {}", path.display()))?;

    text.parse::<GridWorld>()
        .wrap_err_with(|| format!("Could not parse layout {}", path.display()))
}
