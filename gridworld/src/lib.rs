//! A small pacman board to run the searchers in `multiagent-minimax` against.
//!
//! Pacman is agent zero. Every ghost is an adversary, numbered from one in the order they appear
//! in the layout. The rules are the classic ones: a point lost every pacman move, ten for each
//! food pellet, five hundred for clearing the board and five hundred lost when a ghost catches
//! pacman. Eating a capsule scares every ghost for forty of their moves, and a scared ghost is
//! worth two hundred points and goes back to where it started.
//!
//! ```
//! use gridworld::{Direction, GridWorld};
//! use multiagent_minimax::{LegalActionGame, SimulableGame, VictorDeterminableGame};
//!
//! let world: GridWorld = "%%%%%\n%P. %\n%%%%%".parse().unwrap();
//! assert_eq!(world.legal_actions(0), vec![Direction::East, Direction::Stop]);
//!
//! let next = world.successor(0, &Direction::East);
//! assert!(next.is_win());
//! assert_eq!(next.points(), 509);
//! ```

mod direction;
pub use direction::{Direction, UnknownDirection};

mod grid;
pub use grid::Grid;

mod layout;
pub use layout::LayoutError;

mod random;
pub use random::random_world;

mod world;
pub use world::{
    Ghost, GridWorld, Outcome, FOOD_SCORE, GHOST_EAT_SCORE, LOSE_PENALTY, SCARED_TIME,
    TIME_PENALTY, WIN_BONUS,
};
