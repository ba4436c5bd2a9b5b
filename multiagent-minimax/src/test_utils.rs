//! Small hand-built games used by the unit tests

use std::rc::Rc;

use rand::Rng;

use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Win,
    Lose,
}

/// A node of a scripted game tree. The children are the moves of whichever agent is to move at
/// this node, so the shape of the tree has to follow the turn order
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tree {
    score: f64,
    outcome: Option<Outcome>,
    children: Vec<Rc<Tree>>,
}

impl Tree {
    pub(crate) fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

/// A non-terminal node with no moves
pub(crate) fn leaf(score: f64) -> Tree {
    Tree {
        score,
        outcome: None,
        children: vec![],
    }
}

pub(crate) fn win(score: f64) -> Tree {
    Tree {
        outcome: Some(Outcome::Win),
        ..leaf(score)
    }
}

pub(crate) fn lose(score: f64) -> Tree {
    Tree {
        outcome: Some(Outcome::Lose),
        ..leaf(score)
    }
}

pub(crate) fn node(children: Vec<Tree>) -> Tree {
    Tree {
        score: 0.0,
        outcome: None,
        children: children.into_iter().map(Rc::new).collect(),
    }
}

/// A game whose moves are indices into the children of the current tree node
#[derive(Debug, Clone)]
pub(crate) struct ScriptedGame {
    num_agents: usize,
    tree: Rc<Tree>,
}

impl ScriptedGame {
    pub(crate) fn new(num_agents: usize, tree: Tree) -> Self {
        Self {
            num_agents,
            tree: Rc::new(tree),
        }
    }
}

impl AgentCountableGame for ScriptedGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl LegalActionGame for ScriptedGame {
    type Action = usize;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
        (0..self.tree.children.len()).collect()
    }
}

impl SimulableGame for ScriptedGame {
    fn successor(&self, _agent: AgentIndex, action: &usize) -> Self {
        Self {
            num_agents: self.num_agents,
            tree: Rc::clone(&self.tree.children[*action]),
        }
    }
}

impl VictorDeterminableGame for ScriptedGame {
    fn is_win(&self) -> bool {
        self.tree.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.tree.outcome == Some(Outcome::Lose)
    }
}

impl ScoreGettableGame for ScriptedGame {
    fn score(&self) -> f64 {
        self.tree.score
    }
}

/// Builds a random tree that is well formed for the returned depth: every maximizer node before
/// the depth bound and every adversary node has at least one move, unless it is terminal
pub(crate) fn random_tree<R: Rng>(rng: &mut R) -> (ScriptedGame, usize) {
    let num_agents = rng.gen_range(1..=3);
    let depth = rng.gen_range(1..=(6 / num_agents).min(3));
    let tree = random_subtree(rng, num_agents, depth, 0, MAXIMIZER);

    (ScriptedGame::new(num_agents, tree), depth)
}

fn random_subtree<R: Rng>(
    rng: &mut R,
    num_agents: usize,
    depth: usize,
    plies: usize,
    agent: AgentIndex,
) -> Tree {
    let value = f64::from(rng.gen_range(-20..=20_i32));
    let is_root = plies == 0 && agent == MAXIMIZER;

    if !is_root && rng.gen_bool(0.1) {
        return if rng.gen_bool(0.5) {
            win(value)
        } else {
            lose(value)
        };
    }

    if agent == MAXIMIZER && plies == depth {
        return leaf(value);
    }

    let (next_plies, next_agent) = if agent + 1 == num_agents {
        (plies + 1, MAXIMIZER)
    } else {
        (plies, agent + 1)
    };

    let branching = rng.gen_range(1..=3);
    let mut children = Vec::with_capacity(branching);
    for _ in 0..branching {
        children.push(random_subtree(rng, num_agents, depth, next_plies, next_agent));
    }

    node(children)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    Stop,
    Move(i32, i32),
}

impl NoopAction for Step {
    fn is_noop(&self) -> bool {
        matches!(self, Step::Stop)
    }
}

/// A single-agent board snapshot for exercising the evaluation functions. Threats never move,
/// and stepping onto food eats one pellet there for 10 points
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Snapshot {
    score: f64,
    position: Position,
    threats: Vec<Threat>,
    food: Vec<Position>,
    capsules: usize,
    outcome: Option<Outcome>,
    actions: Vec<Step>,
}

impl Snapshot {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            score: 0.0,
            position,
            threats: vec![],
            food: vec![],
            capsules: 0,
            outcome: None,
            actions: vec![
                Step::Move(0, 1),
                Step::Move(0, -1),
                Step::Move(1, 0),
                Step::Move(-1, 0),
                Step::Stop,
            ],
        }
    }

    pub(crate) fn with_score(self, score: f64) -> Self {
        Self { score, ..self }
    }

    pub(crate) fn with_threats(self, threats: Vec<Threat>) -> Self {
        Self { threats, ..self }
    }

    pub(crate) fn with_food(self, food: Vec<Position>) -> Self {
        Self { food, ..self }
    }

    pub(crate) fn with_capsules(self, capsules: usize) -> Self {
        Self { capsules, ..self }
    }

    pub(crate) fn with_actions(self, actions: Vec<Step>) -> Self {
        Self { actions, ..self }
    }

    pub(crate) fn won(self) -> Self {
        Self {
            outcome: Some(Outcome::Win),
            ..self
        }
    }

    pub(crate) fn lost(self) -> Self {
        Self {
            outcome: Some(Outcome::Lose),
            ..self
        }
    }
}

impl LegalActionGame for Snapshot {
    type Action = Step;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Step> {
        self.actions.clone()
    }
}

impl SimulableGame for Snapshot {
    fn successor(&self, _agent: AgentIndex, action: &Step) -> Self {
        let mut next = self.clone();

        if let Step::Move(dx, dy) = action {
            next.position = Position::new(self.position.x + dx, self.position.y + dy);

            if let Some(eaten) = next.food.iter().position(|food| *food == next.position) {
                next.food.remove(eaten);
                next.score += 10.0;
            }
        }

        next
    }
}

impl VictorDeterminableGame for Snapshot {
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }
}

impl ScoreGettableGame for Snapshot {
    fn score(&self) -> f64 {
        self.score
    }
}

impl PositionGettableGame for Snapshot {
    fn agent_zero_position(&self) -> Position {
        self.position
    }
}

impl ThreatGettableGame for Snapshot {
    fn threats(&self) -> Vec<Threat> {
        self.threats.clone()
    }
}

impl PickupGettableGame for Snapshot {
    fn pickup_positions(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn special_pickup_count(&self) -> usize {
        self.capsules
    }
}
