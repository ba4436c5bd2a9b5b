use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use text_trees::StringTreeNode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Counters collected while running a single search
pub struct SearchStats {
    /// Every node the search entered, below the root
    pub nodes_visited: u64,
    /// How many times alpha-beta stopped looking at the remaining siblings of a node
    pub cutoffs: u64,
    /// The deepest completed ply any path reached
    pub max_plies_reached: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// This is returned from a search
/// It contains the chosen action along with what we learned about every action at the root
pub struct SearchReturn<Action> {
    /// The action with the best value. Ties go to whichever came first in the legal actions
    pub action: Action,
    /// The folded value of [SearchReturn::action]
    pub value: f64,
    /// Every root action in legal-action order, with the value the search returned for it
    ///
    /// With alpha-beta, actions that were cut off carry an upper bound rather than their exact
    /// value. That bound is never higher than the chosen value
    pub options: Vec<(Action, f64)>,
    /// Counters for this search
    pub stats: SearchStats,
}

impl<Action> SearchReturn<Action>
where
    Action: Debug + PartialEq,
{
    /// The value the search returned for the given root action, if it was legal
    pub fn value_of(&self, action: &Action) -> Option<f64> {
        self.options
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, value)| *value)
    }

    /// Returns the root actions that tied with the chosen value
    pub fn best_actions(&self) -> Vec<&Action> {
        self.options
            .iter()
            .filter(|(_, value)| *value == self.value)
            .map(|(action, _)| action)
            .collect()
    }

    /// This returns a visual representation of the root of the search
    /// It shows the chosen action and value, then every option with the chosen one marked
    pub fn to_text_tree(&self) -> String {
        let mut node = StringTreeNode::new(format!(
            "{:?} {} (nodes: {}, cutoffs: {})",
            self.action, self.value, self.stats.nodes_visited, self.stats.cutoffs
        ));

        let mut marked = false;
        for (action, value) in &self.options {
            let chosen = !marked && *action == self.action;
            marked |= chosen;

            let label = if chosen {
                format!("{action:?} {value} *")
            } else {
                format!("{action:?} {value}")
            };
            node.push_node(StringTreeNode::new(label));
        }

        format!("{}", node)
    }
}
