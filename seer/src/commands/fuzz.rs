use color_eyre::eyre::{bail, Result};
use gridworld::{random_world, GridWorld};
use multiagent_minimax::{
    AdversarialSearch, AgentCountableGame, Evaluation, LegalActionGame, MultiAgentSearcher,
    SearchConfig, SimulableGame, Strategy, VictorDeterminableGame,
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

#[derive(clap::Args, Debug)]
pub(crate) struct Fuzz {
    /// How many random positions to check
    #[clap(short, long, value_parser, default_value_t = 1_000)]
    rounds: usize,

    /// Seed for the random layouts. A random one is picked and printed if not given
    #[clap(short, long, value_parser)]
    seed: Option<u64>,

    /// Number of plies to look ahead
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,
}

impl Fuzz {
    pub(crate) fn run(self) -> Result<()> {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        println!("Fuzzing with seed {seed}");

        let mut rng = StdRng::seed_from_u64(seed);

        for round in 1..=self.rounds {
            let world = random_position(&mut rng);
            let evaluation = *[Evaluation::Score, Evaluation::Better]
                .choose(&mut rng)
                .unwrap_or(&Evaluation::Score);

            check_position(&world, evaluation, self.depth)?;

            if round % 100 == 0 {
                println!("Rounds: {round}");
            }
        }

        println!("All {} rounds agreed", self.rounds);

        Ok(())
    }
}

/// A random layout, played forward a few random moves so ghosts are facing somewhere
fn random_position(rng: &mut StdRng) -> GridWorld {
    let mut world = random_world(rng);

    for _ in 0..rng.gen_range(0..6) {
        for agent in 0..world.num_agents() {
            if world.is_over() {
                return world;
            }

            if let Some(action) = world.legal_actions(agent).choose(rng) {
                world = world.successor(agent, action);
            }
        }
    }

    world
}

fn check_position(world: &GridWorld, evaluation: Evaluation, depth: usize) -> Result<()> {
    if world.is_over() {
        return Ok(());
    }

    let search = |strategy| {
        MultiAgentSearcher::new(strategy, SearchConfig::new(evaluation, depth), "seer-fuzz")
            .select_action(world)
    };

    let minimax = search(Strategy::Minimax)?;
    let alpha_beta = search(Strategy::AlphaBeta)?;
    let expectimax = search(Strategy::Expectimax)?;

    debug!(
        minimax_nodes = minimax.stats.nodes_visited,
        alpha_beta_nodes = alpha_beta.stats.nodes_visited,
        cutoffs = alpha_beta.stats.cutoffs,
        "checked a position"
    );

    if alpha_beta.action != minimax.action || alpha_beta.value != minimax.value {
        bail!(
            "alpha-beta chose {} ({}) but minimax chose {} ({}) with {evaluation} at depth {depth}\n{world}",
            alpha_beta.action,
            alpha_beta.value,
            minimax.action,
            minimax.value
        );
    }

    if alpha_beta.stats.nodes_visited > minimax.stats.nodes_visited {
        bail!(
            "alpha-beta visited {} nodes but minimax only {} with {evaluation} at depth {depth}\n{world}",
            alpha_beta.stats.nodes_visited,
            minimax.stats.nodes_visited
        );
    }

    if expectimax.value < minimax.value - 1e-9 {
        bail!(
            "expectimax valued the position at {} below minimax's {} with {evaluation} at depth {depth}\n{world}",
            expectimax.value,
            minimax.value
        );
    }

    Ok(())
}
