//! Self-play game generation.
//!
//! Plays full games between automated players only, recording every
//! committed move and the scores after it. Records are written as JSONL for
//! comparing strategies offline.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::board::Action;
use crate::game::{ConfigError, Game, GameConfig, GameState};
use crate::player::PlayerSummary;
use crate::protocol::notation;

/// Consecutive failed turns after which a game is abandoned.
const MAX_STALLED_TURNS: usize = 16;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Board and seat configuration shared by every game. Must have no humans.
    pub game: GameConfig,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` uses `seed + i`.
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            game: GameConfig {
                humans: 0,
                random_ais: 1,
                sampled_ais: 1,
                exhaustive_ais: 1,
                ..GameConfig::default()
            },
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.humans > 0 {
            return Err(ConfigError::HumanSeats(self.game.humans));
        }
        self.game.validate()
    }

    fn game_config(&self, game_id: usize) -> GameConfig {
        let seed = if self.seed != 0 {
            self.seed.wrapping_add(game_id as u64)
        } else {
            0
        };
        GameConfig {
            seed,
            ..self.game.clone()
        }
    }
}

/// A single committed move from a self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub player: String,
    pub action: Action,
    pub x: u32,
    pub y: u32,
    pub level: u8,
    /// Every player's score after the move, in seat order.
    pub scores: Vec<u32>,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub max_depth: u8,
    /// Players with their goals and final scores.
    pub players: Vec<PlayerSummary>,
    pub turns: Vec<TurnRecord>,
    /// Name of the winning player; `None` if the game was abandoned.
    pub winner: Option<String>,
    pub winner_score: Option<u32>,
    /// Final board in notation.
    pub final_board: String,
    /// Whether the game was abandoned after repeated failed turns.
    pub stalled: bool,
}

/// Plays a single self-play game and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, ConfigError> {
    let mut game = Game::new(&config.game_config(game_id))?;
    game.start();

    let mut turns = Vec::with_capacity(game.max_turns() as usize);
    let mut failures = 0;

    while game.state() == GameState::InProgress {
        let player = match game.current_player() {
            Some(p) => p.name.clone(),
            None => break,
        };
        if !game.play_automated_turn() {
            failures += 1;
            if failures >= MAX_STALLED_TURNS {
                log::warn!("game {}: {} stalled, abandoning", game_id, player);
                break;
            }
            continue;
        }
        failures = 0;
        if let Some(m) = game.last_move() {
            turns.push(TurnRecord {
                turn: game.turn(),
                player,
                action: m.action,
                x: m.x,
                y: m.y,
                level: m.level,
                scores: game.scores(),
            });
        }
    }

    let stalled = game.state() != GameState::Completed;
    let winner = if stalled { None } else { game.winner() };

    Ok(GameRecord {
        game_id,
        max_depth: game.board().max_depth(),
        players: game.player_summaries(),
        turns,
        winner: winner.map(|(i, _)| game.players()[i].name.clone()),
        winner_score: winner.map(|(_, s)| s),
        final_board: notation::encode(game.board()),
        stalled,
    })
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish. Parallel runs deliver games
/// in completion order.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), ConfigError>
where
    F: FnMut(GameRecord) + Send,
{
    config.validate()?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
    Ok(())
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, start: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match (&game.winner, game.winner_score) {
        (Some(name), Some(score)) => format!("{} wins with {}", name, score),
        _ => "stalled".to_string(),
    };
    log::info!(
        "Game {}/{}: {} after {} turns ({:.2}s)",
        n,
        config.num_games,
        outcome,
        game.turns.len(),
        start.elapsed().as_secs_f64(),
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        match play_game(config, i) {
            Ok(game) => {
                report(config, i + 1, &game, game_start);
                on_game(game);
            }
            Err(e) => log::error!("game {}: {}", i, e),
        }
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("failed to build thread pool ({}), running sequentially", e);
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let game_start = Instant::now();
                        match play_game(config, i) {
                            Ok(game) => {
                                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                                report(config, n, &game, game_start);
                                let _ = tx.send(game);
                            }
                            Err(e) => log::error!("game {}: {}", i, e),
                        }
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut stalled = 0usize;
    let mut total_turns = 0usize;
    // Wins keyed by strategy label, since seat names embed the seat number.
    let mut wins: Vec<(String, usize)> = Vec::new();

    for game in games {
        total_turns += game.turns.len();
        if game.stalled {
            stalled += 1;
        }
        if let Some(name) = &game.winner {
            let label = name.rsplit_once(' ').map_or(name.as_str(), |(l, _)| l);
            match wins.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => wins.push((label.to_string(), 1)),
            }
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg turns/game: {:.1}",
        total_turns as f64 / total.max(1) as f64
    );
    eprintln!("Stalled: {}", stalled);
    eprintln!("Win distribution:");
    wins.sort_by(|a, b| b.1.cmp(&a.1));
    for (label, n) in wins {
        let pct = 100.0 * n as f64 / total.max(1) as f64;
        eprintln!("  {:>14}: {} ({:.1}%)", label, n, pct);
    }
}
