use std::{path::PathBuf, str::FromStr};

use color_eyre::eyre::{bail, Result};
use gridworld::{Direction, GridWorld, Outcome};
use multiagent_minimax::{
    AdversarialSearch, AgentCountableGame, ConfigError, Evaluation, LegalActionGame,
    MultiAgentSearcher, ReflexAgent, SearchConfig, SimulableGame, Strategy,
    VictorDeterminableGame, DEFAULT_DEPTH, MAXIMIZER,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::info;

/// Who is playing pacman
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    Search(Strategy),
    Reflex,
}

impl FromStr for Player {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reflex" | "reflexagent" => Ok(Player::Reflex),
            _ => s.parse().map(Player::Search),
        }
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Layout file to start from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// minimax, alphabeta, expectimax or reflex
    #[clap(short, long, value_parser, default_value = "alphabeta")]
    strategy: Player,

    /// Evaluation function for the states where the search stops: score or better
    #[clap(short, long, value_parser, default_value = "score")]
    eval_fn: Evaluation,

    /// Number of plies to look ahead
    #[clap(short, long, value_parser, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Give up after this many pacman moves
    #[clap(short, long, value_parser, default_value_t = 500)]
    max_turns: usize,

    /// Seed for the ghosts (and the reflex agent's tie breaks)
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Pacman moves to play before the agent takes over, e.g. `east,east,north`
    #[clap(short, long, value_parser, value_delimiter = ',')]
    opening: Vec<Direction>,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let mut world = super::load_layout(&self.layout)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let searcher = match self.strategy {
            Player::Search(strategy) => Some(MultiAgentSearcher::new(
                strategy,
                SearchConfig::new(self.eval_fn, self.depth),
                "seer-play",
            )),
            Player::Reflex => None,
        };

        println!("{world}");
        println!();

        let mut opening = self.opening.into_iter();
        let mut turns = 0;
        while !world.is_over() && turns < self.max_turns {
            let action = match (opening.next(), &searcher) {
                (Some(scripted), _) => check_scripted(&world, scripted)?,
                (None, Some(searcher)) => searcher.best_action(&world)?,
                (None, None) => ReflexAgent.select_action(&world, &mut rng)?,
            };

            world = world.successor(MAXIMIZER, &action);
            world = move_ghosts(world, &mut rng);
            turns += 1;

            info!(turns, %action, score = world.points(), "played a turn");
            println!("Turn {turns}: {action}, score {}", world.points());
            println!("{world}");
            println!();
        }

        match world.outcome() {
            Some(Outcome::Win) => println!("Pacman emerges victorious! Score: {}", world.points()),
            Some(Outcome::Lose) => println!("Pacman died! Score: {}", world.points()),
            None => println!("Out of turns after {turns}. Score: {}", world.points()),
        }

        Ok(())
    }
}

/// Opening moves are only played if pacman could have chosen them
fn check_scripted(world: &GridWorld, action: Direction) -> Result<Direction> {
    if !world.legal_actions(MAXIMIZER).contains(&action) {
        bail!("opening move {action} is not legal here\n{world}");
    }

    Ok(action)
}

/// Every ghost takes a uniformly random legal move, in index order
fn move_ghosts<R: Rng + ?Sized>(mut world: GridWorld, rng: &mut R) -> GridWorld {
    for ghost in 1..world.num_agents() {
        if world.is_over() {
            break;
        }

        let actions: Vec<Direction> = world.legal_actions(ghost);
        if let Some(action) = actions.choose(rng) {
            world = world.successor(ghost, action);
        }
    }

    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_names() {
        assert_eq!("reflex".parse(), Ok(Player::Reflex));
        assert_eq!("ReflexAgent".parse(), Ok(Player::Reflex));
        assert_eq!("expectimax".parse(), Ok(Player::Search(Strategy::Expectimax)));
        assert_eq!(
            "random".parse::<Player>(),
            Err(ConfigError::UnknownStrategy("random".to_owned()))
        );
    }

    #[test]
    fn opening_moves_must_be_legal() {
        let world: GridWorld = "%%%%%\n%P G%\n%%%%%".parse().unwrap();
        let opening: Direction = "e".parse().unwrap();

        assert_eq!(check_scripted(&world, opening).unwrap(), Direction::East);
        assert!(check_scripted(&world, "north".parse().unwrap()).is_err());
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn ghosts_move_until_the_game_ends() {
        let world: GridWorld = "%%%%%\n%P G%\n%%%%%".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let moved = move_ghosts(world.successor(MAXIMIZER, &Direction::East), &mut rng);

        assert!(moved.is_lose());
    }
}
