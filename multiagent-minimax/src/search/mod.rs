//! The three searchers: minimax, minimax with alpha-beta pruning, and expectimax.
//!
//! All of them pick an action for agent zero (the maximizer) while every other agent moves in
//! index order after it. They share one recursive tree walk and only differ in how adversary
//! nodes combine their children:
//!
//! - [Strategy::Minimax] assumes every adversary picks the worst outcome for us and takes the
//!   minimum of every child.
//! - [Strategy::AlphaBeta] computes exactly the same value as minimax, but carries an
//!   alpha-beta window down the tree and stops looking at siblings once a value falls outside it.
//! - [Strategy::Expectimax] assumes every adversary picks uniformly at random, so adversary nodes
//!   are chance nodes whose value is the mean of every child.
//!
//! ```rust
//! use multiagent_minimax::{
//!     AdversarialSearch, AgentCountableGame, LegalActionGame, MultiAgentSearcher, SearchConfig,
//!     SimulableGame, VictorDeterminableGame,
//! };
//!
//! // A tiny two player game: we pick a number, then the opponent subtracts 0 or 1 from it
//! #[derive(Debug, Clone)]
//! struct Countdown {
//!     value: i32,
//!     moves: usize,
//! }
//!
//! impl AgentCountableGame for Countdown {
//!     fn num_agents(&self) -> usize { 2 }
//! }
//!
//! impl LegalActionGame for Countdown {
//!     type Action = i32;
//!
//!     fn legal_actions(&self, agent: usize) -> Vec<i32> {
//!         if agent == 0 { vec![1, 3, 2] } else { vec![0, -1] }
//!     }
//! }
//!
//! impl SimulableGame for Countdown {
//!     fn successor(&self, _agent: usize, action: &i32) -> Self {
//!         Countdown { value: self.value + action, moves: self.moves + 1 }
//!     }
//! }
//!
//! impl VictorDeterminableGame for Countdown {
//!     fn is_win(&self) -> bool { false }
//!     fn is_lose(&self) -> bool { false }
//! }
//!
//! let config = SearchConfig::new(|state: &Countdown| f64::from(state.value), 1);
//! let searcher = MultiAgentSearcher::alpha_beta(config);
//!
//! let result = searcher.select_action(&Countdown { value: 0, moves: 0 }).unwrap();
//!
//! assert_eq!(result.action, 3);
//! assert_eq!(result.value, 2.0);
//! ```

use std::{fmt::Display, str::FromStr};

use derivative::Derivative;
use thiserror::Error;
use tracing::info_span;

use crate::{
    config::{ConfigError, SearchConfig},
    score::Scorable,
    types::{AgentIndex, SearchableGame, MAXIMIZER},
};

mod driver;
pub use driver::Bounds;
use driver::Driver;

mod search_return;
pub use search_return::{SearchReturn, SearchStats};

/// Errors that can occur during a search
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A non-terminal node had nothing to fold over
    ///
    /// This is raised at the root for every strategy, at an adversary node for every strategy,
    /// and at an inner maximizer node for plain minimax only. Alpha-beta and expectimax evaluate
    /// a maximizer node without actions directly instead.
    #[error("agent {agent} has no legal actions after {plies} completed plies")]
    NoLegalActions {
        /// The agent that was supposed to move
        agent: AgentIndex,
        /// How many full plies had been completed at that node
        plies: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How adversary nodes are folded
pub enum Strategy {
    /// Worst-case adversaries, exhaustive
    Minimax,
    /// Worst-case adversaries, with alpha-beta pruning
    AlphaBeta,
    /// Uniformly random adversaries
    Expectimax,
}

impl Strategy {
    /// All the strategies, in the order they are usually compared
    pub const ALL: [Strategy; 3] = [
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::Expectimax,
    ];

    /// Whether this strategy cuts off siblings using an alpha-beta window
    pub fn prunes(&self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Minimax => write!(f, "minimax"),
            Strategy::AlphaBeta => write!(f, "alphabeta"),
            Strategy::Expectimax => write!(f, "expectimax"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minimaxagent" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" | "alphabetaagent" => {
                Ok(Strategy::AlphaBeta)
            }
            "expectimax" | "expectimaxagent" => Ok(Strategy::Expectimax),
            _ => Err(ConfigError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// Something that can pick the maximizer's next action from a game state
pub trait AdversarialSearch<GameType: SearchableGame> {
    /// Search from `state` and return the best action for agent zero, along with the value of
    /// every root action
    ///
    /// When several actions share the best value, the first one in legal-action order wins.
    /// Fails if agent zero has no legal actions in `state`.
    fn select_action(
        &self,
        state: &GameType,
    ) -> Result<SearchReturn<GameType::Action>, SearchError>;

    /// The folded value of `state` with agent zero to move and no completed plies
    fn value(&self, state: &GameType) -> Result<f64, SearchError>;

    /// Only the chosen action of [AdversarialSearch::select_action]
    fn best_action(&self, state: &GameType) -> Result<GameType::Action, SearchError> {
        self.select_action(state).map(|result| result.action)
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps a strategy and a configuration and can be used to run a search
///
/// It also outputs traces using the [tracing] crate.
pub struct MultiAgentSearcher<ScorableType> {
    strategy: Strategy,
    config: SearchConfig<ScorableType>,
    /// Used to tell searchers apart in traces
    pub name: &'static str,
}

impl<ScorableType> MultiAgentSearcher<ScorableType> {
    /// Construct a new `MultiAgentSearcher`
    pub fn new(
        strategy: Strategy,
        config: SearchConfig<ScorableType>,
        name: &'static str,
    ) -> Self {
        Self {
            strategy,
            config,
            name,
        }
    }

    /// A plain minimax searcher
    pub fn minimax(config: SearchConfig<ScorableType>) -> Self {
        Self::new(Strategy::Minimax, config, "minimax")
    }

    /// A minimax searcher with alpha-beta pruning
    pub fn alpha_beta(config: SearchConfig<ScorableType>) -> Self {
        Self::new(Strategy::AlphaBeta, config, "alphabeta")
    }

    /// An expectimax searcher
    pub fn expectimax(config: SearchConfig<ScorableType>) -> Self {
        Self::new(Strategy::Expectimax, config, "expectimax")
    }

    /// The strategy this searcher folds adversary nodes with
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The configuration this searcher was built with
    pub fn config(&self) -> &SearchConfig<ScorableType> {
        &self.config
    }

    fn driver(&self, num_agents: usize) -> Driver<'_, ScorableType> {
        Driver::new(
            self.strategy,
            &self.config.evaluation,
            self.config.depth,
            num_agents,
        )
    }
}

impl<GameType, ScorableType> AdversarialSearch<GameType> for MultiAgentSearcher<ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    fn select_action(
        &self,
        state: &GameType,
    ) -> Result<SearchReturn<GameType::Action>, SearchError> {
        info_span!(
            "select_action",
            searcher = self.name,
            strategy = %self.strategy,
            depth = self.config.depth,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
            nodes_visited = tracing::field::Empty,
        )
        .in_scope(|| -> Result<SearchReturn<GameType::Action>, SearchError> {
            let actions = state.legal_actions(MAXIMIZER);
            let mut driver = self.driver(state.num_agents());

            let mut best: Option<(GameType::Action, f64)> = None;
            let mut options = Vec::with_capacity(actions.len());

            for action in actions {
                // Later root actions are searched against the best value found so far
                let alpha = match &best {
                    Some((_, best_value)) if self.strategy.prunes() => *best_value,
                    _ => f64::NEG_INFINITY,
                };

                let value = driver.after_move(
                    &state.successor(MAXIMIZER, &action),
                    0,
                    MAXIMIZER,
                    Bounds {
                        alpha,
                        beta: f64::INFINITY,
                    },
                )?;
                options.push((action.clone(), value));

                let improves = match &best {
                    Some((_, best_value)) => value > *best_value,
                    None => true,
                };
                if improves {
                    best = Some((action, value));
                }
            }

            let (action, value) = best.ok_or(SearchError::NoLegalActions {
                agent: MAXIMIZER,
                plies: 0,
            })?;

            let current_span = tracing::Span::current();
            current_span.record("chosen_action", format!("{:?}", action).as_str());
            current_span.record("chosen_value", value);
            current_span.record("nodes_visited", driver.stats.nodes_visited);

            Ok(SearchReturn {
                action,
                value,
                options,
                stats: driver.stats,
            })
        })
    }

    fn value(&self, state: &GameType) -> Result<f64, SearchError> {
        self.driver(state.num_agents())
            .max_value(state, 0, Bounds::UNBOUNDED)
    }
}
