//! Construction-time configuration for the searchers.

use std::{fmt::Display, str::FromStr};

use derivative::Derivative;
use thiserror::Error;

use crate::{
    eval::{better_evaluation, score_evaluation},
    score::Scorable,
    types::{PickupGettableGame, PositionGettableGame, ScoreGettableGame, ThreatGettableGame},
};

/// The ply bound used when none is given
pub const DEFAULT_DEPTH: usize = 2;

/// Errors raised while turning user supplied names and numbers into a configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The evaluation function name did not match any known function
    #[error("unknown evaluation function `{0}`")]
    UnknownEvaluation(String),
    /// The depth was not a non-negative integer
    #[error("invalid search depth `{0}`, expected a non-negative integer")]
    InvalidDepth(String),
    /// The strategy name did not match any known searcher
    #[error("unknown search strategy `{0}`")]
    UnknownStrategy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// The evaluation functions that can be selected by name
pub enum Evaluation {
    /// [score_evaluation]
    #[default]
    Score,
    /// [better_evaluation]
    Better,
}

impl FromStr for Evaluation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(Evaluation::Score),
            "better" | "betterEvaluationFunction" => Ok(Evaluation::Better),
            other => Err(ConfigError::UnknownEvaluation(other.to_owned())),
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::Score => write!(f, "score"),
            Evaluation::Better => write!(f, "better"),
        }
    }
}

impl<GameType> Scorable<GameType> for Evaluation
where
    GameType:
        ScoreGettableGame + PositionGettableGame + ThreatGettableGame + PickupGettableGame,
{
    fn score(&self, game: &GameType) -> f64 {
        match self {
            Evaluation::Score => score_evaluation(game),
            Evaluation::Better => better_evaluation(game),
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Everything a searcher needs to know besides the state: how to score the states where it
/// stops, and how many plies to look ahead.
///
/// A ply is one move by every agent. The configuration is fixed once built and is only ever
/// read during a search.
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_minimax::{Evaluation, SearchConfig};
///
/// let defaults: SearchConfig<Evaluation> = Default::default();
///
/// assert_eq!(defaults.evaluation, Evaluation::Score);
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchConfig<ScorableType> {
    /// Scores the states where the search stops
    #[derivative(Debug = "ignore")]
    pub evaluation: ScorableType,
    /// How many plies to look ahead
    pub depth: usize,
}

impl<ScorableType> SearchConfig<ScorableType> {
    /// Construct a new `SearchConfig`
    ///
    /// ```
    /// use multiagent_minimax::SearchConfig;
    ///
    /// fn constant(_: &()) -> f64 { 4.0 }
    ///
    /// let config = SearchConfig::new(constant, 3);
    /// assert_eq!(config.depth, 3);
    /// ```
    pub fn new(evaluation: ScorableType, depth: usize) -> Self {
        Self { evaluation, depth }
    }
}

impl SearchConfig<Evaluation> {
    /// Build a configuration from an evaluation function name and a depth string, the way the
    /// agents are configured from the command line
    ///
    /// ```
    /// use multiagent_minimax::{Evaluation, SearchConfig};
    ///
    /// let config = SearchConfig::from_args("better", "3").unwrap();
    ///
    /// assert_eq!(config.evaluation, Evaluation::Better);
    /// assert_eq!(config.depth, 3);
    /// ```
    pub fn from_args(evaluation: &str, depth: &str) -> Result<Self, ConfigError> {
        let evaluation = evaluation.parse()?;
        let depth = depth
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidDepth(depth.to_owned()))?;

        Ok(Self::new(evaluation, depth))
    }
}

impl Default for SearchConfig<Evaluation> {
    fn default() -> Self {
        Self::new(Evaluation::default(), DEFAULT_DEPTH)
    }
}
