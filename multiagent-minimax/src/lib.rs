#![deny(missing_debug_implementations, missing_docs)]
#![warn(missing_copy_implementations)]
//! This crate implements adversarial search for a single maximizing agent in a turn based game
//! with any number of adversaries. You provide an evaluation function that turns a game state
//! into an `f64`, and pick one of three searchers: minimax, minimax with alpha-beta pruning, or
//! expectimax.
//!
//! The crate does not know anything about the rules of the game. Game states plug in through the
//! capability traits in [types], and the searchers only ever ask for legal actions, successor
//! states, whether the game is over, and the evaluation of the states where they stop.
//!
//! ```rust
//! use multiagent_minimax::{Evaluation, MultiAgentSearcher, SearchConfig, Strategy};
//!
//! // Evaluation and depth can be resolved from the same names the agents take on the command line
//! let config = SearchConfig::from_args("better", "3").unwrap();
//!
//! let searcher = MultiAgentSearcher::new(Strategy::Expectimax, config, "expectimax-pacman");
//!
//! assert_eq!(searcher.config().evaluation, Evaluation::Better);
//! assert_eq!(searcher.strategy(), Strategy::Expectimax);
//! ```

pub mod config;
pub use config::{ConfigError, Evaluation, SearchConfig, DEFAULT_DEPTH};

pub mod eval;
pub use eval::{better_evaluation, reflex_evaluation, score_evaluation};

mod reflex;
pub use reflex::ReflexAgent;

mod score;
pub use score::Scorable;

pub mod search;
pub use search::{
    AdversarialSearch, Bounds, MultiAgentSearcher, SearchError, SearchReturn, SearchStats,
    Strategy,
};

pub mod types;
pub use types::{
    manhattan_distance, AgentCountableGame, AgentIndex, LegalActionGame, NoopAction,
    PickupGettableGame, Position, PositionGettableGame, ScoreGettableGame, SearchableGame,
    SimulableGame, ThreatGettableGame, Threat, VictorDeterminableGame, MAXIMIZER,
};

#[cfg(test)]
mod test_utils;
