use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{Difficulty, Grid, TargetingEngine, FLEET, GRID_SIZE};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn random_grid(rng: &mut SmallRng) -> Grid {
    let mut grid = Grid::new();
    for &len in FLEET.iter() {
        let _ = grid.place_random(rng, len);
    }
    grid
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_never_repeats_a_cell(seed in any::<u64>(), level in difficulty()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = random_grid(&mut rng);
        let mut engine = TargetingEngine::new(level, &mut rng);
        let mut fired = HashSet::new();

        while !grid.all_sunk() {
            prop_assert!(fired.len() < GRID_SIZE * GRID_SIZE, "ran past the grid");
            let (coord, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
            prop_assert!(fired.insert(coord), "cell {:?} fired twice", coord);
            prop_assert!(outcome.is_resolved());
        }
    }

    #[test]
    fn purged_cells_are_never_occupied(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = random_grid(&mut rng);
        let mut engine = TargetingEngine::new(Difficulty::Hard, &mut rng);

        while !grid.all_sunk() {
            engine.next_move(&mut rng, &mut grid).unwrap();
            // anything neither fired at nor untried was ruled out as water
            let ruled_out = !engine.untried() & !(grid.hits() | grid.misses());
            prop_assert!((ruled_out & grid.occupied()).is_empty());
        }
    }
}
