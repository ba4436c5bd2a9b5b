use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::{
    eval::reflex_evaluation,
    search::SearchError,
    types::{
        NoopAction, PickupGettableGame, PositionGettableGame, ScoreGettableGame, SimulableGame,
        ThreatGettableGame, MAXIMIZER,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// A one-ply agent that looks at every legal action with [reflex_evaluation] and takes one of
/// the best
///
/// No search happens here: the adversaries are never simulated.
pub struct ReflexAgent;

impl ReflexAgent {
    /// Every legal action for agent zero along with its reflex score, in legal-action order
    pub fn scored_actions<GameType>(&self, state: &GameType) -> Vec<(GameType::Action, f64)>
    where
        GameType: SimulableGame
            + ScoreGettableGame
            + PositionGettableGame
            + ThreatGettableGame
            + PickupGettableGame,
        GameType::Action: NoopAction,
    {
        state
            .legal_actions(MAXIMIZER)
            .into_iter()
            .map(|action| {
                let score = reflex_evaluation(state, &action);
                (action, score)
            })
            .collect_vec()
    }

    /// Pick uniformly at random among the actions tied for the best reflex score
    pub fn select_action<GameType, R>(
        &self,
        state: &GameType,
        rng: &mut R,
    ) -> Result<GameType::Action, SearchError>
    where
        GameType: SimulableGame
            + ScoreGettableGame
            + PositionGettableGame
            + ThreatGettableGame
            + PickupGettableGame,
        GameType::Action: NoopAction,
        R: Rng + ?Sized,
    {
        let scored = self.scored_actions(state);
        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        let best_actions = scored
            .into_iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| action)
            .collect_vec();

        debug!(best_score, candidates = best_actions.len(), "reflex choice");

        best_actions
            .choose(rng)
            .cloned()
            .ok_or(SearchError::NoLegalActions {
                agent: MAXIMIZER,
                plies: 0,
            })
    }
}
