use std::{fmt::Display, str::FromStr, sync::Arc};

use itertools::Itertools;
use multiagent_minimax::{
    AgentCountableGame, AgentIndex, LegalActionGame, PickupGettableGame, Position,
    PositionGettableGame, ScoreGettableGame, SimulableGame, Threat, ThreatGettableGame,
    VictorDeterminableGame, MAXIMIZER,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    direction::Direction,
    grid::Grid,
    layout::{parse_layout, Layout, LayoutError},
};

/// Points lost by pacman on every move
pub const TIME_PENALTY: i64 = 1;
/// Points for eating a food pellet
pub const FOOD_SCORE: i64 = 10;
/// Bonus for eating the last food pellet
pub const WIN_BONUS: i64 = 500;
/// Points lost when a ghost catches pacman
pub const LOSE_PENALTY: i64 = 500;
/// Points for eating a scared ghost
pub const GHOST_EAT_SCORE: i64 = 200;
/// How many ghost moves a capsule keeps the ghosts scared for
pub const SCARED_TIME: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ghost {
    pub position: Position,
    /// Where the ghost goes back to after being eaten
    pub spawn: Position,
    pub scared_timer: u32,
    /// The last direction the ghost moved in
    pub facing: Direction,
}

impl Ghost {
    fn new(spawn: Position) -> Self {
        Self {
            position: spawn,
            spawn,
            scared_timer: 0,
            facing: Direction::Stop,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// A pacman board: one pacman (agent zero) trying to eat all the food, and any number of ghosts
/// (agents one and up) trying to catch it
///
/// The walls never change, so they are shared between every state of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    walls: Arc<Grid<bool>>,
    food: Grid<bool>,
    food_remaining: usize,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<Ghost>,
    score: i64,
    outcome: Option<Outcome>,
}

impl From<Layout> for GridWorld {
    fn from(layout: Layout) -> Self {
        Self {
            food_remaining: layout.food.count(),
            walls: Arc::new(layout.walls),
            food: layout.food,
            capsules: layout.capsules,
            pacman: layout.pacman,
            ghosts: layout.ghosts.into_iter().map(Ghost::new).collect(),
            score: 0,
            outcome: None,
        }
    }
}

impl FromStr for GridWorld {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_layout(s).map(Self::from)
    }
}

impl GridWorld {
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    pub fn pacman(&self) -> Position {
        self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn food_remaining(&self) -> usize {
        self.food_remaining
    }

    pub fn has_food(&self, position: Position) -> bool {
        self.food.is_set(position)
    }

    /// Anything off the board counts as a wall
    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.get(position).copied().unwrap_or(true)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn points(&self) -> i64 {
        self.score
    }

    fn open_directions(&self, from: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|d| *d != Direction::Stop)
            .filter(move |d| !self.is_wall(d.apply(from)))
    }

    fn pacman_actions(&self) -> Vec<Direction> {
        self.open_directions(self.pacman)
            .chain(std::iter::once(Direction::Stop))
            .collect_vec()
    }

    /// Ghosts keep moving: they only stop when boxed in, and only turn around at a dead end
    fn ghost_actions(&self, ghost: &Ghost) -> Vec<Direction> {
        let mut actions = self.open_directions(ghost.position).collect_vec();

        if actions.is_empty() {
            return vec![Direction::Stop];
        }

        let reverse = ghost.facing.reverse();
        if actions.len() > 1 {
            actions.retain(|d| *d != reverse);
        }

        actions
    }

    fn move_pacman(&mut self, direction: Direction) {
        let target = direction.apply(self.pacman);
        if !self.is_wall(target) {
            self.pacman = target;
        }

        self.score -= TIME_PENALTY;

        if self.food.is_set(self.pacman) {
            self.food.set(self.pacman, false);
            self.food_remaining -= 1;
            self.score += FOOD_SCORE;

            if self.food_remaining == 0 {
                trace!(score = self.score, "pacman ate the last food");
                self.score += WIN_BONUS;
                self.outcome = Some(Outcome::Win);
            }
        }

        if let Some(i) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(i);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }

        for i in 0..self.ghosts.len() {
            self.check_collision(i);
        }
    }

    fn move_ghost(&mut self, index: usize, direction: Direction) {
        let target = direction.apply(self.ghosts[index].position);
        let blocked = self.is_wall(target);

        let ghost = &mut self.ghosts[index];
        if !blocked {
            ghost.position = target;
        }
        ghost.facing = direction;
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.check_collision(index);
    }

    fn check_collision(&mut self, index: usize) {
        let ghost = &mut self.ghosts[index];
        if ghost.position != self.pacman {
            return;
        }

        if ghost.is_scared() {
            trace!(ghost = index + 1, "pacman ate a scared ghost");
            self.score += GHOST_EAT_SCORE;
            *ghost = Ghost::new(ghost.spawn);
        } else if self.outcome.is_none() {
            trace!(ghost = index + 1, "pacman was caught");
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

impl AgentCountableGame for GridWorld {
    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }
}

impl LegalActionGame for GridWorld {
    type Action = Direction;

    /// Nobody can move once the game is over
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.outcome.is_some() {
            return vec![];
        }

        match agent {
            MAXIMIZER => self.pacman_actions(),
            ghost => self
                .ghosts
                .get(ghost - 1)
                .map(|g| self.ghost_actions(g))
                .unwrap_or_default(),
        }
    }
}

impl SimulableGame for GridWorld {
    fn successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let mut next = self.clone();
        if self.outcome.is_some() {
            return next;
        }

        match agent {
            MAXIMIZER => next.move_pacman(*action),
            ghost if ghost <= self.ghosts.len() => next.move_ghost(ghost - 1, *action),
            _ => {}
        }

        next
    }
}

impl VictorDeterminableGame for GridWorld {
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }
}

impl ScoreGettableGame for GridWorld {
    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl PositionGettableGame for GridWorld {
    fn agent_zero_position(&self) -> Position {
        self.pacman
    }
}

impl ThreatGettableGame for GridWorld {
    fn threats(&self) -> Vec<Threat> {
        self.ghosts
            .iter()
            .map(|g| Threat {
                position: g.position,
                scared_timer: g.scared_timer,
            })
            .collect()
    }
}

impl PickupGettableGame for GridWorld {
    fn pickup_positions(&self) -> Vec<Position> {
        self.food.set_positions()
    }

    fn special_pickup_count(&self) -> usize {
        self.capsules.len()
    }
}

impl Display for GridWorld {
    /// Renders the board in the layout format. Scared ghosts show as `S`, and a caught pacman as
    /// `X`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = (0..self.height()).rev().map(|y| {
            (0..self.width())
                .map(|x| {
                    let position = Position::new(x as i32, y as i32);
                    let ghost = self.ghosts.iter().find(|g| g.position == position);

                    match (position == self.pacman, ghost) {
                        (true, Some(_)) => 'X',
                        (true, None) => 'P',
                        (false, Some(g)) if g.is_scared() => 'S',
                        (false, Some(_)) => 'G',
                        (false, None) if self.is_wall(position) => '%',
                        (false, None) if self.has_food(position) => '.',
                        (false, None) if self.capsules.contains(&position) => 'o',
                        (false, None) => ' ',
                    }
                })
                .collect::<String>()
        });

        write!(f, "{}", rows.format("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn world(layout: &str) -> GridWorld {
        layout.parse().unwrap()
    }

    #[test]
    fn legal_actions_respect_walls() {
        let state = world("%%%%%\n%P.G%\n%o  %\n%%%%%");

        assert_eq!(state.num_agents(), 2);
        assert_eq!(state.legal_actions(0), vec![South, East, Stop]);
        assert_eq!(state.legal_actions(1), vec![South, West]);
        assert_eq!(state.legal_actions(2), vec![]);
    }

    #[test]
    fn eating_food_and_winning() {
        let start = world("%%%%%%%\n%P.. G%\n%%%%%%%");

        let first = start.successor(0, &East);
        assert_eq!(first.score(), 9.0);
        assert_eq!(first.food_remaining(), 1);
        assert!(!first.is_over());

        let second = first.successor(0, &East);
        assert_eq!(second.score(), 518.0);
        assert!(second.is_win());
        assert_eq!(second.legal_actions(0), vec![]);

        // The state we started from is untouched
        assert_eq!(start.score(), 0.0);
        assert_eq!(start.food_remaining(), 2);
    }

    #[test]
    fn capsules_scare_the_ghosts() {
        let start = world("%%%%%%\n%Po G%\n%%%%%%");

        let powered = start.successor(0, &East);
        assert_eq!(powered.special_pickup_count(), 0);
        assert_eq!(powered.ghosts()[0].scared_timer, SCARED_TIME);

        let approached = powered.successor(1, &West);
        assert_eq!(approached.ghosts()[0].scared_timer, SCARED_TIME - 1);
        assert_eq!(approached.ghosts()[0].position, Position::new(3, 1));

        let eaten = approached.successor(0, &East);
        assert_eq!(eaten.score(), 198.0);
        assert!(!eaten.is_over());
        assert_eq!(eaten.ghosts()[0].position, Position::new(4, 1));
        assert_eq!(eaten.ghosts()[0].scared_timer, 0);
    }

    #[test]
    fn ghosts_catch_pacman() {
        let start = world("%%%%%\n%P G%\n%%%%%");

        let caught = start.successor(0, &East).successor(1, &West);

        assert_eq!(caught.score(), -501.0);
        assert!(caught.is_lose());
        assert_eq!(caught.legal_actions(1), vec![]);
        assert_eq!(caught.successor(0, &West), caught);
        assert_eq!(caught.to_string(), "%%%%%\n% X %\n%%%%%");
    }

    #[test]
    fn ghosts_only_reverse_at_dead_ends() {
        let start = world("%%%%%%\n%P G %\n%%%%%%");
        assert_eq!(start.legal_actions(1), vec![East, West]);

        let heading_west = start.successor(1, &West);
        assert_eq!(heading_west.legal_actions(1), vec![West]);

        let dead_end = start.successor(1, &East);
        assert_eq!(dead_end.ghosts()[0].facing, East);
        assert_eq!(dead_end.legal_actions(1), vec![West]);
    }

    #[test]
    fn boxed_in_ghosts_stop() {
        let state = world("%%%%%\n%P%G%\n%%%%%");

        assert_eq!(state.legal_actions(1), vec![Stop]);
    }

    #[test]
    fn capabilities() {
        let state = world("%%%%%%\n%.P o%\n%. G.%\n%%%%%%");

        assert_eq!(state.agent_zero_position(), Position::new(2, 2));
        assert_eq!(
            state.threats(),
            vec![Threat {
                position: Position::new(3, 1),
                scared_timer: 0
            }]
        );
        assert_eq!(
            state.pickup_positions(),
            vec![Position::new(1, 1), Position::new(4, 1), Position::new(1, 2)]
        );
        assert_eq!(state.special_pickup_count(), 1);
    }

    #[test]
    fn displays_as_a_layout() {
        let layout = "%%%%%%%\n%.P o.%\n% %%% %\n%. G .%\n%%%%%%%";

        assert_eq!(world(layout).to_string(), layout);
    }
}
