#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{init_logging, AiPlayer, Difficulty, Match, MatchSummary, Participant, Side};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Pit two automated fleets against each other on this machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        first: Difficulty,
        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        second: Difficulty,
        #[arg(long, help = "Wait the difficulty's pacing delay before each shot")]
        pace: bool,
        #[arg(long, help = "Append match summaries as JSON lines to this file")]
        history: Option<PathBuf>,
        #[arg(long, default_value_t = 400)]
        turn_limit: usize,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn append_history(path: &Path, summaries: &[MatchSummary]) -> anyhow::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for summary in summaries {
        writeln!(file, "{}", serde_json::to_string(summary)?)?;
    }
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            first,
            second,
            pace,
            history,
            turn_limit,
        } => {
            if let Some(s) = seed {
                info!("using fixed seed {} (game will be reproducible)", s);
            }
            let mut rng1 = seeded_rng(seed, 0);
            let mut rng2 = seeded_rng(seed, 1);

            let mut ai1 = AiPlayer::new("player1", first, &mut rng1);
            let mut ai2 = AiPlayer::new("player2", second, &mut rng2);
            let mut game = Match::new();
            ai1.place_fleet(&mut rng1, game.grid_mut(Side::First))?;
            ai2.place_fleet(&mut rng2, game.grid_mut(Side::Second))?;

            while !game.is_over() {
                if game.turns() >= turn_limit {
                    anyhow::bail!("no winner after {} shots", game.turns());
                }
                let report = match game.turn() {
                    Side::First => {
                        if pace {
                            tokio::time::sleep(first.pacing()).await;
                        }
                        game.play_turn(&mut ai1, &mut rng1)?
                    }
                    Side::Second => {
                        if pace {
                            tokio::time::sleep(second.pacing()).await;
                        }
                        game.play_turn(&mut ai2, &mut rng2)?
                    }
                };
                info!(
                    "{:?} -> ({}, {}): {:?}",
                    report.attacker, report.coord.0, report.coord.1, report.outcome
                );
            }

            let winner = game.winner().map(|side| match side {
                Side::First => ai1.name(),
                Side::Second => ai2.name(),
            });
            info!("winner: {}", winner.unwrap_or("none"));

            let summaries = [
                MatchSummary::now(ai1.name(), game.tally(Side::First)),
                MatchSummary::now(ai2.name(), game.tally(Side::Second)),
            ];
            for s in &summaries {
                println!(
                    "{}: {} shots, {} hits, {:.1}% accuracy, {} sunk, score {}",
                    s.name, s.shots, s.hits, s.accuracy, s.vessels_sunk, s.score
                );
            }
            if let Some(path) = history {
                append_history(&path, &summaries)?;
            }
        }
    }
    Ok(())
}
