//! Evaluation functions for the maximizing agent.
//!
//! [score_evaluation] and [better_evaluation] take a single state and are meant to be plugged
//! into a [crate::SearchConfig]. [reflex_evaluation] scores a state together with a candidate
//! action and is what the [crate::ReflexAgent] uses.

use crate::types::{
    NoopAction, PickupGettableGame, PositionGettableGame, ScoreGettableGame, SimulableGame,
    ThreatGettableGame, MAXIMIZER,
};

/// Points subtracted for every special pickup still on the board
pub const CAPSULE_PENALTY: f64 = 30.0;

/// Just the game score
pub fn score_evaluation<GameType: ScoreGettableGame>(state: &GameType) -> f64 {
    state.score()
}

/// Positional-safety evaluation
///
/// Starts from the game score, subtracts the distance to the closest threat and then
/// [CAPSULE_PENALTY] for every remaining special pickup, so states where the capsules have been
/// eaten look better. A board without threats gets no distance term.
pub fn better_evaluation<GameType>(state: &GameType) -> f64
where
    GameType:
        ScoreGettableGame + PositionGettableGame + ThreatGettableGame + PickupGettableGame,
{
    let position = state.agent_zero_position();

    // The maximum of the negated distances, ie the closest threat
    let threat_term = state
        .threats()
        .iter()
        .map(|threat| position.manhattan_distance(&threat.position))
        .min()
        .map_or(0.0, |distance| -f64::from(distance));

    state.score() + threat_term - CAPSULE_PENALTY * state.special_pickup_count() as f64
}

/// Reflex evaluation of taking `action` from `state`
///
/// Returns negative infinity for the no-op action, whatever the rest of the state looks like.
/// Otherwise the action is simulated and the successor is scored as its score, plus the sum of
/// every threat's scared timer, plus the ratio of the closest threat distance to the closest
/// food distance.
///
/// When the agent is standing on food the food distance is treated as `1`, the largest finite
/// ratio for that threat distance. Without any food or any threats the ratio is `0`.
pub fn reflex_evaluation<GameType>(state: &GameType, action: &GameType::Action) -> f64
where
    GameType: SimulableGame
        + ScoreGettableGame
        + PositionGettableGame
        + ThreatGettableGame
        + PickupGettableGame,
    GameType::Action: NoopAction,
{
    if action.is_noop() {
        return f64::NEG_INFINITY;
    }

    let successor = state.successor(MAXIMIZER, action);
    let position = successor.agent_zero_position();
    let threats = successor.threats();

    let scared_time: f64 = threats
        .iter()
        .map(|threat| f64::from(threat.scared_timer))
        .sum();

    let nearest_threat = threats
        .iter()
        .map(|threat| position.manhattan_distance(&threat.position))
        .min();
    let nearest_food = successor
        .pickup_positions()
        .iter()
        .map(|food| position.manhattan_distance(food))
        .min();

    let proximity = match (nearest_threat, nearest_food) {
        (Some(threat), Some(food)) => f64::from(threat) / f64::from(food.max(1)),
        _ => 0.0,
    };

    successor.score() + scared_time + proximity
}
