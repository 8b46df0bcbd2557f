use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use seabattle::{AttackOutcome, Grid, Orientation, FLEET, GRID_SIZE, MAX_HULL_LENGTH};

fn random_grid(seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new();
    for &len in FLEET.iter() {
        // a boxed-in hull is fine here; the grid simply holds fewer vessels
        let _ = grid.place_random(&mut rng, len);
    }
    grid
}

fn chebyshev(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vessels_never_touch(seed in any::<u64>()) {
        let grid = random_grid(seed);
        let vessels = grid.vessels();
        for (i, a) in vessels.iter().enumerate() {
            prop_assert!(a.length() <= MAX_HULL_LENGTH);
            for b in &vessels[i + 1..] {
                for &ca in a.cells() {
                    for &cb in b.cells() {
                        prop_assert!(chebyshev(ca, cb) >= 2);
                    }
                }
            }
        }
    }

    #[test]
    fn arbitrary_placements_keep_gap(
        attempts in prop::collection::vec(
            (1usize..=7, 0..GRID_SIZE, 0..GRID_SIZE, any::<bool>()),
            1..40,
        ),
    ) {
        let mut grid = Grid::new();
        for (len, r, c, horizontal) in attempts {
            let orient = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
            let before = grid.occupied();
            if grid.place_vessel(len, (r, c), orient).is_err() {
                prop_assert_eq!(grid.occupied(), before);
            }
        }
        let vessels = grid.vessels();
        for (i, a) in vessels.iter().enumerate() {
            for b in &vessels[i + 1..] {
                prop_assert!((a.mask().neighborhood() & b.mask()).is_empty());
            }
        }
    }

    #[test]
    fn attack_idempotent(seed in any::<u64>(), row in 0..GRID_SIZE, col in 0..GRID_SIZE) {
        let mut grid = random_grid(seed);
        let first = grid.attack((row, col));
        prop_assert!(first.is_resolved());
        let hits_after: Vec<_> = grid.vessels().iter().map(|v| v.hits()).collect();
        prop_assert_eq!(grid.attack((row, col)), AttackOutcome::AlreadyAttacked);
        let hits_again: Vec<_> = grid.vessels().iter().map(|v| v.hits()).collect();
        prop_assert_eq!(hits_after, hits_again);
    }

    #[test]
    fn sunk_after_length_distinct_hits(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = random_grid(seed);
        let targets: Vec<Vec<(usize, usize)>> =
            grid.vessels().iter().map(|v| v.cells().to_vec()).collect();
        for (idx, cells) in targets.iter().enumerate() {
            for (k, &cell) in cells.iter().enumerate() {
                // sprinkle repeat shots at cells already struck
                if k > 0 && rng.random_bool(0.5) {
                    prop_assert_eq!(grid.attack(cells[k - 1]), AttackOutcome::AlreadyAttacked);
                }
                let sunk = matches!(grid.attack(cell), AttackOutcome::Hit { sunk: true, .. });
                prop_assert_eq!(sunk, k + 1 == cells.len());
                prop_assert_eq!(grid.vessels()[idx].hit_count(), k + 1);
            }
        }
        prop_assert!(grid.all_sunk());
    }

    #[test]
    fn all_sunk_matches_hit_sets(
        seed in any::<u64>(),
        shots in prop::collection::vec((0..GRID_SIZE, 0..GRID_SIZE), 0..100),
    ) {
        let mut grid = random_grid(seed);
        for shot in shots {
            grid.attack(shot);
        }
        let expected = grid.vessels().iter().all(|v| v.hits() == v.mask());
        prop_assert_eq!(grid.all_sunk(), expected);
    }
}
