//! Blocky -- a quadtree tile-puzzle engine driven over a text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr (`RUST_LOG=info` to see turns).

use std::io::{self, BufRead};

use blocky::engine::Engine;
use blocky::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    log::warn!("{}", e);
                }
            }
            Command::NewGame => {
                if let Err(e) = engine.new_game() {
                    log::warn!("newgame: {}", e);
                }
                engine.handle_status(&mut out)?;
            }
            Command::Position { notation } => {
                if let Err(e) = engine.set_position(&notation) {
                    log::warn!("{}", e);
                }
            }
            Command::Select { x, y, level } => engine.handle_select(x, y, level, &mut out)?,
            Command::Action(action) => engine.handle_action(action, &mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::Board => engine.handle_board(&mut out)?,
            Command::Status => engine.handle_status(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
