//! Self-play game generation CLI.
//!
//! Plays games between automated players and writes one JSON record per
//! game (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use blocky::game::GameConfig;
use blocky::selfplay::{self, SelfPlayConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    version,
    about = "Play automated Blocky games and write JSONL records"
)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Maximum board depth (2-6)
    #[arg(long, default_value_t = 3)]
    max_depth: u8,
    /// Turns per game (8-60)
    #[arg(long, default_value_t = 20)]
    max_turns: u32,
    /// Random AI seats
    #[arg(long, default_value_t = 1)]
    random: usize,
    /// Sampled-search ("Smart") AI seats
    #[arg(long, default_value_t = 1)]
    smart: usize,
    /// Exhaustive-search AI seats
    #[arg(long, default_value_t = 1)]
    exhaustive: usize,
    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,
    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output file path (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SelfPlayConfig {
        num_games: cli.games,
        game: GameConfig {
            max_depth: cli.max_depth,
            max_turns: cli.max_turns,
            humans: 0,
            random_ais: cli.random,
            sampled_ais: cli.smart,
            exhaustive_ais: cli.exhaustive,
            ..GameConfig::default()
        },
        threads: cli.threads,
        seed: cli.seed,
        quiet: cli.quiet,
    };

    if !cli.quiet {
        eprintln!(
            "Self-play: {} games, depth {}, {} turns, {} random / {} smart / {} exhaustive, {} threads",
            config.num_games,
            config.game.max_depth,
            config.game.max_turns,
            config.game.random_ais,
            config.game.sampled_ais,
            config.game.exhaustive_ais,
            config.threads
        );
    }

    let mut writer: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let start = Instant::now();
    let mut games = Vec::with_capacity(config.num_games);
    let mut write_result = Ok(());
    selfplay::run_self_play_with_callback(&config, |game| {
        if write_result.is_ok() {
            write_result = selfplay::write_game_json(&game, &mut writer);
        }
        games.push(game);
    })?;
    write_result?;
    writer.flush()?;
    let elapsed = start.elapsed();

    if !cli.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
        if let Some(path) = &cli.output {
            eprintln!("Wrote {} games to {}", games.len(), path.display());
        }
    }
    Ok(())
}
