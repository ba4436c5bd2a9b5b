use std::cmp::Reverse;

use itertools::Itertools;
use multiagent_minimax::Position;
use rand::{seq::IteratorRandom, Rng};

use crate::{grid::Grid, layout::Layout, world::GridWorld};

/// Builds a random walled board with at least one food pellet, one or two ghosts and maybe a
/// capsule. Interior walls are sprinkled at random, so parts of the board may be unreachable.
pub fn random_world<R: Rng + ?Sized>(rng: &mut R) -> GridWorld {
    loop {
        let width = rng.gen_range(5..=9);
        let height = rng.gen_range(4..=7);
        let ghost_count = rng.gen_range(1..=2);
        let capsule_count = rng.gen_range(0..=1);

        let mut walls = Grid::new(width, height, false);
        let mut food = Grid::new(width, height, false);
        let mut open = vec![];

        for position in walls.positions().collect_vec() {
            let border = position.x == 0
                || position.y == 0
                || position.x as usize == width - 1
                || position.y as usize == height - 1;

            if border || rng.gen_bool(0.2) {
                walls.set(position, true);
            } else {
                open.push(position);
            }
        }

        // Pacman, ghosts and capsules each get their own cell, plus one for food
        let needed = 1 + ghost_count + capsule_count + 1;
        if open.len() < needed {
            continue;
        }

        let mut picked = open.iter().copied().choose_multiple(rng, needed - 1);
        let pacman = picked.remove(0);
        let mut ghosts: Vec<Position> = picked.drain(..ghost_count).collect();
        let mut capsules = picked;

        // Same order the layout parser would give them
        ghosts.sort_by_key(|p| (Reverse(p.y), p.x));
        capsules.sort_by_key(|p| (Reverse(p.y), p.x));

        let taken = |p: &Position| *p == pacman || ghosts.contains(p) || capsules.contains(p);
        for position in open.iter().filter(|p| !taken(*p)) {
            if rng.gen_bool(0.4) {
                food.set(*position, true);
            }
        }

        if food.count() == 0 {
            if let Some(position) = open.iter().filter(|p| !taken(*p)).choose(rng) {
                food.set(*position, true);
            }
        }

        return GridWorld::from(Layout {
            walls,
            food,
            capsules,
            pacman,
            ghosts,
        });
    }
}
