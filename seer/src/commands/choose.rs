use std::path::PathBuf;

use color_eyre::eyre::Result;
use multiagent_minimax::AdversarialSearch;

use super::{load_layout, SearchArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Choose {
    /// Layout file to search from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    search: SearchArgs,

    /// Print the root of the search as a tree
    #[clap(long)]
    tree: bool,

    /// Print the whole search result as JSON
    #[clap(long, conflicts_with = "tree")]
    json: bool,
}

impl Choose {
    pub(crate) fn run(self) -> Result<()> {
        let world = load_layout(&self.layout)?;
        let searcher = self.search.searcher();

        let result = searcher.select_action(&world)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if self.tree {
            println!("{}", result.to_text_tree());
            return Ok(());
        }

        println!("{world}");
        println!();
        println!(
            "{} chose {} with a value of {}",
            searcher.strategy(),
            result.action,
            result.value
        );
        for (action, value) in &result.options {
            println!("  {action:<6} {value}");
        }
        println!(
            "Visited {} nodes with {} cutoffs",
            result.stats.nodes_visited, result.stats.cutoffs
        );

        Ok(())
    }
}
