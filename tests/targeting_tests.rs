use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    AttackOutcome, Difficulty, Direction, EngineError, Grid, Intent, Mode, Orientation,
    TargetingEngine, VesselId,
};

fn hard_engine(seed: u64) -> (TargetingEngine, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let engine = TargetingEngine::new(Difficulty::Hard, &mut rng);
    (engine, rng)
}

#[test]
fn test_direction_step_and_reverse() {
    assert_eq!(Direction::RIGHT.step((5, 5)), Some((5, 6)));
    assert_eq!(Direction::UP.step((0, 3)), None);
    assert_eq!(Direction::DOWN.step((9, 3)), None);
    assert_eq!(Direction::LEFT.step((4, 0)), None);
    assert_eq!(Direction::RIGHT.reversed(), Direction::LEFT);
    assert_eq!(Direction::DOWN.reversed(), Direction::UP);
}

#[test]
fn test_miss_on_locked_direction_reverses_from_anchor() {
    let (mut engine, mut rng) = hard_engine(1);
    engine.pursue((5, 5), VesselId(0)).unwrap();
    engine.lock_direction(Direction::RIGHT);

    let (coord, intent) = engine.select(&mut rng).unwrap();
    assert_eq!(coord, (5, 6));
    engine.record(coord, intent, AttackOutcome::Miss, &[]);

    assert_eq!(
        engine.mode(),
        Mode::Pursue {
            anchor: (5, 5),
            direction: Some(Direction::LEFT)
        }
    );
    let (next, intent) = engine.select(&mut rng).unwrap();
    assert_eq!(next, (5, 4));
    assert_eq!(intent, Intent::Extend(Direction::LEFT));
}

#[test]
fn test_lone_anchor_cycles_directions_in_order() {
    let (mut engine, mut rng) = hard_engine(2);
    engine.pursue((5, 5), VesselId(3)).unwrap();

    let (coord, intent) = engine.select(&mut rng).unwrap();
    assert_eq!((coord, intent), ((6, 5), Intent::Probe(Direction::DOWN)));
    engine.record(coord, intent, AttackOutcome::Miss, &[]);
    // no direction locked after a miss
    assert_eq!(
        engine.mode(),
        Mode::Pursue {
            anchor: (5, 5),
            direction: None
        }
    );

    let (coord, intent) = engine.select(&mut rng).unwrap();
    assert_eq!((coord, intent), ((5, 6), Intent::Probe(Direction::RIGHT)));
    let hit = AttackOutcome::Hit {
        vessel: VesselId(3),
        length: 3,
        sunk: false,
    };
    engine.record(coord, intent, hit, &[]);
    assert_eq!(engine.streak(), &[(5, 5), (5, 6)]);

    let (coord, intent) = engine.select(&mut rng).unwrap();
    assert_eq!((coord, intent), ((5, 7), Intent::Extend(Direction::RIGHT)));
}

#[test]
fn test_blocked_direction_reverses_within_same_turn() {
    let (mut engine, mut rng) = hard_engine(3);
    engine.pursue((9, 9), VesselId(0)).unwrap();
    engine.lock_direction(Direction::DOWN);
    let (coord, intent) = engine.select(&mut rng).unwrap();
    assert_eq!((coord, intent), ((8, 9), Intent::Extend(Direction::UP)));
}

#[test]
fn test_off_grid_anchor_is_refused() {
    let (mut engine, mut rng) = hard_engine(5);
    assert_eq!(
        engine.pursue((10, 5), VesselId(0)).unwrap_err(),
        EngineError::OffGrid((10, 5))
    );
    assert_eq!(engine.mode(), Mode::Seek);
    assert_eq!(engine.untried().count_ones(), 100);
    let (_, intent) = engine.select(&mut rng).unwrap();
    assert_eq!(intent, Intent::Seek);
}

#[test]
fn test_exhausted_anchor_falls_back_to_seek() {
    let (mut engine, mut rng) = hard_engine(4);
    engine.pursue((0, 0), VesselId(0)).unwrap();
    for _ in 0..2 {
        let (coord, intent) = engine.select(&mut rng).unwrap();
        assert!(matches!(intent, Intent::Probe(_)));
        engine.record(coord, intent, AttackOutcome::Miss, &[]);
    }
    // both in-grid neighbors of the corner missed
    let (_, intent) = engine.select(&mut rng).unwrap();
    assert_eq!(intent, Intent::Seek);
    assert_eq!(engine.mode(), Mode::Seek);
    assert!(engine.streak().is_empty());
}

#[test]
fn test_vertical_hull_hunted_down_both_ways() {
    let (mut engine, mut rng) = hard_engine(5);
    let mut grid = Grid::new();
    let id = grid
        .place_vessel(4, (2, 6), Orientation::Vertical)
        .unwrap();
    assert!(grid.attack((4, 6)).is_hit());
    engine.pursue((4, 6), id).unwrap();

    let mut shots = Vec::new();
    while engine.mode() != Mode::Seek {
        let (coord, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
        shots.push((coord, outcome.is_hit()));
    }
    assert_eq!(
        shots,
        vec![
            ((5, 6), true),
            ((6, 6), false),
            ((3, 6), true),
            ((2, 6), true),
        ]
    );
    assert!(grid.all_sunk());
}

#[test]
fn test_sinking_purges_surrounding_cells() {
    let (mut engine, mut rng) = hard_engine(6);
    let mut grid = Grid::new();
    let id = grid
        .place_vessel(2, (3, 3), Orientation::Horizontal)
        .unwrap();
    assert!(grid.attack((3, 3)).is_hit());
    engine.pursue((3, 3), id).unwrap();

    let (first, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
    assert_eq!((first, outcome), ((4, 3), AttackOutcome::Miss));
    let (second, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
    assert_eq!(second, (3, 4));
    assert_eq!(outcome.sunk_vessel(), Some(id));

    assert_eq!(engine.mode(), Mode::Seek);
    for r in 2..=4 {
        for c in 2..=5 {
            assert!(!engine.is_untried((r, c)), "({}, {}) still untried", r, c);
        }
    }
    assert!(engine.is_untried((5, 5)));
    assert_eq!(engine.untried().count_ones(), 100 - 12);
}

#[test]
fn test_patrol_boat_sunk_from_seek_stays_in_seek() {
    let (mut engine, mut rng) = hard_engine(7);
    let mut grid = Grid::new();
    let id = grid
        .place_vessel(1, (0, 0), Orientation::Horizontal)
        .unwrap();
    let outcome = grid.attack((0, 0));
    engine.record((0, 0), Intent::Seek, outcome, grid.vessel(id).unwrap().cells());

    assert_eq!(engine.mode(), Mode::Seek);
    for cell in [(0, 1), (1, 0), (1, 1)] {
        assert!(!engine.is_untried(cell));
    }
    let (coord, _) = engine.select(&mut rng).unwrap();
    assert!(![(0, 0), (0, 1), (1, 0), (1, 1)].contains(&coord));
}

#[test]
fn test_empty_pool_reports_no_moves() {
    let (mut engine, mut rng) = hard_engine(8);
    let mut grid = Grid::new();
    for _ in 0..100 {
        let (_, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
        assert_eq!(outcome, AttackOutcome::Miss);
    }
    assert_eq!(
        engine.next_move(&mut rng, &mut grid).unwrap_err(),
        EngineError::NoMovesAvailable
    );
}

#[test]
fn test_randomized_seek_keeps_streak() {
    let mut seeks = 0;
    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut engine = TargetingEngine::new(Difficulty::Easy, &mut rng);
        engine.pursue((5, 5), VesselId(0)).unwrap();
        engine.lock_direction(Direction::RIGHT);
        let (coord, intent) = engine.select(&mut rng).unwrap();
        if intent == Intent::Seek {
            seeks += 1;
            engine.record(coord, intent, AttackOutcome::Miss, &[]);
            assert_eq!(
                engine.mode(),
                Mode::Pursue {
                    anchor: (5, 5),
                    direction: Some(Direction::RIGHT)
                }
            );
        } else {
            assert_eq!(coord, (5, 6));
        }
    }
    assert!(seeks > 0, "easy engine never strayed from its streak");
}

#[test]
fn test_backlog_hit_becomes_next_anchor() {
    let (mut engine, mut rng) = hard_engine(9);
    let mut grid = Grid::new();
    let chased = grid
        .place_vessel(2, (1, 1), Orientation::Horizontal)
        .unwrap();
    let stray = grid
        .place_vessel(3, (6, 6), Orientation::Vertical)
        .unwrap();

    assert!(grid.attack((1, 1)).is_hit());
    engine.pursue((1, 1), chased).unwrap();
    // a randomized seek lands on the other hull mid-streak
    let outcome = grid.attack((7, 6));
    engine.record((7, 6), Intent::Seek, outcome, &[]);
    assert_eq!(engine.streak(), &[(1, 1)]);

    while engine.mode() != Mode::Seek {
        let (_, outcome) = engine.next_move(&mut rng, &mut grid).unwrap();
        if outcome.sunk_vessel() == Some(chased) {
            break;
        }
    }
    assert_eq!(
        engine.mode(),
        Mode::Pursue {
            anchor: (7, 6),
            direction: None
        }
    );
    while engine.mode() != Mode::Seek {
        engine.next_move(&mut rng, &mut grid).unwrap();
    }
    assert!(grid.vessel(stray).unwrap().is_sunk());
}
