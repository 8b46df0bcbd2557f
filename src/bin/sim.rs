use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{AiPlayer, Difficulty, Match, Participant, Side};
use serde_json::json;

const TURN_LIMIT: usize = 400;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut p1 = AiPlayer::new("player1", Difficulty::Hard, &mut rng1);
    let mut p2 = AiPlayer::new("player2", Difficulty::Hard, &mut rng2);
    let mut game = Match::new();
    p1.place_fleet(&mut rng1, game.grid_mut(Side::First))?;
    p2.place_fleet(&mut rng2, game.grid_mut(Side::Second))?;

    while !game.is_over() {
        if game.turns() >= TURN_LIMIT {
            anyhow::bail!("no winner after {} shots", game.turns());
        }
        match game.turn() {
            Side::First => game.play_turn(&mut p1, &mut rng1)?,
            Side::Second => game.play_turn(&mut p2, &mut rng2)?,
        };
    }

    let winner = match game.winner() {
        Some(Side::First) => Some("player1"),
        Some(Side::Second) => Some("player2"),
        None => None,
    };
    let first = game.tally(Side::First);
    let second = game.tally(Side::Second);

    let result = json!({
        "player1": {"shots": first.shots, "hits": first.hits, "score": first.score},
        "player2": {"shots": second.shots, "hits": second.hits, "score": second.score},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
