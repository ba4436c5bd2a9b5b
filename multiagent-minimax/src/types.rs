//! The capabilities a game state has to offer before it can be searched or evaluated.
//!
//! The search never owns any board mechanics. Everything it knows about the world comes through
//! these traits, which the game implementation provides. They are split up so that a game only
//! needs to implement what a given consumer actually asks for: the searchers only need
//! [SearchableGame], while the evaluation functions in [crate::eval] additionally read positions,
//! threats and pickups.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Index of an agent in the turn order
pub type AgentIndex = usize;

/// The agent whose move we are choosing. It always moves first in a ply
pub const MAXIMIZER: AgentIndex = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A 2-D integer coordinate on the board
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// Construct a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance between two positions
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        manhattan_distance(*self, *other)
    }
}

/// Taxicab distance between two positions. This is the only distance metric the evaluation
/// functions use
pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Something that can hurt the maximizing agent, along with how long it will stay harmless
pub struct Threat {
    /// Where the threat currently is
    pub position: Position,
    /// How many more moves the threat stays neutralized for. Zero means it is dangerous
    pub scared_timer: u32,
}

/// Knows how many agents take turns in this game
pub trait AgentCountableGame {
    /// Total number of agents, including the maximizer. Constant for a whole search
    fn num_agents(&self) -> usize;
}

/// Can list the legal actions for any agent
pub trait LegalActionGame {
    /// The type of a single move
    type Action: Clone + Debug + PartialEq;

    /// Legal actions for the given agent, in a stable order. May be empty
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;
}

/// Can produce the state that follows an agent taking an action
pub trait SimulableGame: LegalActionGame + Sized {
    /// Returns a new state. `self` is never modified
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;
}

/// Can tell whether the game has been won or lost
pub trait VictorDeterminableGame {
    /// The maximizer has won
    fn is_win(&self) -> bool;

    /// The maximizer has lost
    fn is_lose(&self) -> bool;

    /// Either a win or a loss. Search never expands past a state where this is true
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Has a scalar score
pub trait ScoreGettableGame {
    /// The current game score, from the maximizer's point of view
    fn score(&self) -> f64;
}

/// Knows where the maximizing agent is
pub trait PositionGettableGame {
    /// Position of agent zero
    fn agent_zero_position(&self) -> Position;
}

/// Knows where the threats are and whether they are neutralized
pub trait ThreatGettableGame {
    /// Every threat on the board
    fn threats(&self) -> Vec<Threat>;
}

/// Knows where the pickups are
pub trait PickupGettableGame {
    /// Every remaining ordinary pickup (food)
    fn pickup_positions(&self) -> Vec<Position>;

    /// How many special pickups (power capsules) are left
    fn special_pickup_count(&self) -> usize;
}

/// Implemented by action types that have a "do nothing" move
pub trait NoopAction {
    /// True for the action that leaves the agent where it is
    fn is_noop(&self) -> bool;
}

/// Everything the searchers need from a game
pub trait SearchableGame: AgentCountableGame + SimulableGame + VictorDeterminableGame {}

impl<T> SearchableGame for T where T: AgentCountableGame + SimulableGame + VictorDeterminableGame {}
