use tracing::trace;

use super::{SearchError, SearchStats, Strategy};
use crate::{
    score::Scorable,
    types::{AgentIndex, SearchableGame, MAXIMIZER},
};

#[derive(Debug, Clone, Copy, PartialEq)]
/// The alpha-beta window handed down to a node
///
/// This is passed by value, so a node tightening its own window never changes what its siblings
/// see.
pub struct Bounds {
    /// The best value the maximizer can already guarantee
    pub alpha: f64,
    /// The best value the minimizing side can already guarantee
    pub beta: f64,
}

impl Bounds {
    /// A window that never causes a cutoff
    pub const UNBOUNDED: Bounds = Bounds {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };
}

/// The recursive tree walk shared by every [Strategy]
///
/// The strategy only changes how an adversary node folds its children (a minimum, with or
/// without cutoffs, or a mean) and what happens at a max node without legal actions.
pub(crate) struct Driver<'a, ScorableType> {
    strategy: Strategy,
    evaluation: &'a ScorableType,
    depth: usize,
    num_agents: usize,
    pub(crate) stats: SearchStats,
}

impl<'a, ScorableType> Driver<'a, ScorableType> {
    pub(crate) fn new(
        strategy: Strategy,
        evaluation: &'a ScorableType,
        depth: usize,
        num_agents: usize,
    ) -> Self {
        Self {
            strategy,
            evaluation,
            depth,
            num_agents,
            stats: SearchStats::default(),
        }
    }

    fn enter(&mut self, plies: usize) {
        self.stats.nodes_visited += 1;
        self.stats.max_plies_reached = self.stats.max_plies_reached.max(plies);
    }

    fn evaluate<GameType>(&self, state: &GameType) -> f64
    where
        ScorableType: Scorable<GameType>,
    {
        let value = self.evaluation.score(state);
        trace!(value, "evaluated leaf");

        value
    }

    /// Value of `state` once `agent` has just moved: either the next adversary in this ply, or
    /// the maximizer at the start of the next ply
    pub(crate) fn after_move<GameType>(
        &mut self,
        state: &GameType,
        plies: usize,
        agent: AgentIndex,
        bounds: Bounds,
    ) -> Result<f64, SearchError>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        let next_agent = agent + 1;

        if next_agent < self.num_agents {
            self.adversary_value(state, plies, next_agent, bounds)
        } else {
            self.max_value(state, plies + 1, bounds)
        }
    }

    pub(crate) fn max_value<GameType>(
        &mut self,
        state: &GameType,
        plies: usize,
        bounds: Bounds,
    ) -> Result<f64, SearchError>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        self.enter(plies);

        if state.is_over() || plies >= self.depth {
            return Ok(self.evaluate(state));
        }

        let actions = state.legal_actions(MAXIMIZER);
        if actions.is_empty() {
            return match self.strategy {
                Strategy::Minimax => Err(SearchError::NoLegalActions {
                    agent: MAXIMIZER,
                    plies,
                }),
                Strategy::AlphaBeta | Strategy::Expectimax => Ok(self.evaluate(state)),
            };
        }

        let prunes = self.strategy.prunes();
        let remaining = actions.len();
        let mut alpha = bounds.alpha;
        let mut value = f64::NEG_INFINITY;

        for (i, action) in actions.into_iter().enumerate() {
            let child = self.after_move(
                &state.successor(MAXIMIZER, &action),
                plies,
                MAXIMIZER,
                Bounds {
                    alpha,
                    beta: bounds.beta,
                },
            )?;
            value = value.max(child);

            if prunes {
                if value > bounds.beta {
                    if i + 1 < remaining {
                        self.stats.cutoffs += 1;
                        trace!(value, beta = bounds.beta, plies, "beta cutoff");
                    }
                    return Ok(value);
                }

                if value > alpha {
                    alpha = value;
                }
            }
        }

        Ok(value)
    }

    fn adversary_value<GameType>(
        &mut self,
        state: &GameType,
        plies: usize,
        agent: AgentIndex,
        bounds: Bounds,
    ) -> Result<f64, SearchError>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        self.enter(plies);

        if state.is_over() {
            return Ok(self.evaluate(state));
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions { agent, plies });
        }

        match self.strategy {
            Strategy::Minimax | Strategy::AlphaBeta => {
                self.min_value(state, plies, agent, actions, bounds)
            }
            Strategy::Expectimax => self.chance_value(state, plies, agent, actions),
        }
    }

    fn min_value<GameType>(
        &mut self,
        state: &GameType,
        plies: usize,
        agent: AgentIndex,
        actions: Vec<GameType::Action>,
        bounds: Bounds,
    ) -> Result<f64, SearchError>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        let prunes = self.strategy.prunes();
        let remaining = actions.len();
        let mut beta = bounds.beta;
        let mut value = f64::INFINITY;

        for (i, action) in actions.into_iter().enumerate() {
            let child = self.after_move(
                &state.successor(agent, &action),
                plies,
                agent,
                Bounds {
                    alpha: bounds.alpha,
                    beta,
                },
            )?;
            value = value.min(child);

            if prunes {
                if value < bounds.alpha {
                    // Only counted when it skips at least one sibling
                    if i + 1 < remaining {
                        self.stats.cutoffs += 1;
                        trace!(value, alpha = bounds.alpha, plies, agent, "alpha cutoff");
                    }
                    return Ok(value);
                }

                if value < beta {
                    beta = value;
                }
            }
        }

        Ok(value)
    }

    /// Every action is assumed equally likely, so the value is the plain mean of the children.
    /// All of them have to be visited, so there is no window to pass down
    fn chance_value<GameType>(
        &mut self,
        state: &GameType,
        plies: usize,
        agent: AgentIndex,
        actions: Vec<GameType::Action>,
    ) -> Result<f64, SearchError>
    where
        GameType: SearchableGame,
        ScorableType: Scorable<GameType>,
    {
        let count = actions.len() as f64;
        let mut total = 0.0;

        for action in actions {
            total += self.after_move(
                &state.successor(agent, &action),
                plies,
                agent,
                Bounds::UNBOUNDED,
            )?;
        }

        Ok(total / count)
    }
}
