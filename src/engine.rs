//! Engine state management.
//!
//! Holds the engine options and the current game, and answers the commands
//! of the presentation layer. Every handler ends by writing what the
//! presentation needs to redraw: a status line, and for board queries the
//! flattened grid and its notation.

use std::io::{self, Write};

use crate::board::Action;
use crate::game::{ConfigError, Game, GameConfig};
use crate::protocol::notation;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub options: GameConfig,
    game: Option<Game>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a new engine with default options and no game.
    pub fn new() -> Self {
        Engine {
            options: GameConfig::default(),
            game: None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Sets an engine option. Takes effect at the next `newgame`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), String> {
        let value = value.ok_or_else(|| format!("option {} needs a value", name))?;
        let bad = |_: std::num::ParseIntError| {
            format!("invalid value '{}' for option {}", value, name)
        };
        match name {
            "MaxDepth" => self.options.max_depth = value.parse().map_err(bad)?,
            "MaxTurns" => self.options.max_turns = value.parse().map_err(bad)?,
            "Humans" => self.options.humans = value.parse().map_err(bad)?,
            "RandomAI" => self.options.random_ais = value.parse().map_err(bad)?,
            "SmartAI" => self.options.sampled_ais = value.parse().map_err(bad)?,
            "ExhaustiveAI" => self.options.exhaustive_ais = value.parse().map_err(bad)?,
            "BoardSize" => self.options.board_size = value.parse().map_err(bad)?,
            "Seed" => self.options.seed = value.parse().map_err(bad)?,
            other => return Err(format!("unknown option: {}", other)),
        }
        Ok(())
    }

    /// Creates and starts a game from the current options.
    pub fn new_game(&mut self) -> Result<(), ConfigError> {
        let mut game = Game::new(&self.options)?;
        game.start();
        self.game = Some(game);
        Ok(())
    }

    /// Replaces the live board with one given in notation.
    pub fn set_position(&mut self, text: &str) -> Result<(), String> {
        let game = self.game.as_mut().ok_or("position: no game in progress")?;
        let (size, max_depth) = (game.board().size(), game.board().max_depth());
        match notation::parse(text, size, max_depth) {
            Ok(board) => {
                game.set_board(board);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse board notation: {}", e)),
        }
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `select <x> <y> <level>`.
    pub fn handle_select<W: Write>(
        &mut self,
        x: u32,
        y: u32,
        level: u8,
        out: &mut W,
    ) -> io::Result<()> {
        if let Some(game) = self.game.as_mut() {
            game.select(x, y, level);
        }
        self.write_status_line(out)
    }

    /// Handles `action <name>`.
    pub fn handle_action<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        if let Some(game) = self.game.as_mut() {
            game.apply_selected(action);
        }
        self.write_status_line(out)
    }

    /// Handles `go`: the current automated player takes its turn.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(game) = self.game.as_mut() {
            game.play_automated_turn();
        }
        self.write_status_line(out)
    }

    /// Handles `board`: one `grid` line per row, then the notation.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return self.write_status_line(out);
        };
        for row in game.grid().render_rows() {
            writeln!(out, "grid {}", row)?;
        }
        writeln!(out, "board {}", notation::encode(game.board()))?;
        out.flush()
    }

    /// Handles `status`: status line, turn counter, players, and whether
    /// actions are enabled.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return self.write_status_line(out);
        };
        writeln!(out, "status {}", game.status())?;
        writeln!(out, "turn {} of {}", game.turn(), game.max_turns())?;
        for p in game.player_summaries() {
            writeln!(out, "player {}|{}|{}", p.name, p.goal, p.score)?;
        }
        let enabled = if game.actions_enabled() { "enabled" } else { "disabled" };
        writeln!(out, "actions {}", enabled)?;
        out.flush()
    }

    fn write_status_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.game {
            Some(game) => writeln!(out, "status {}", game.status())?,
            None => writeln!(out, "status No game")?,
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn seeded_engine() -> Engine {
        let mut engine = Engine::new();
        engine.set_option("Seed", Some("7")).unwrap();
        engine.set_option("MaxDepth", Some("2")).unwrap();
        engine.set_option("BoardSize", Some("128")).unwrap();
        engine
    }

    #[test]
    fn new_engine_has_no_game() {
        let engine = Engine::new();
        assert!(engine.game().is_none());
        assert_eq!(engine.options, GameConfig::default());
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine.set_option("MaxTurns", Some("30")).unwrap();
        engine.set_option("SmartAI", Some("2")).unwrap();
        assert_eq!(engine.options.max_turns, 30);
        assert_eq!(engine.options.sampled_ais, 2);
    }

    #[test]
    fn set_option_rejects_bad_input() {
        let mut engine = Engine::new();
        assert!(engine.set_option("MaxDepth", Some("deep")).is_err());
        assert!(engine.set_option("MaxDepth", None).is_err());
        assert!(engine.set_option("Threads", Some("8")).is_err());
        assert_eq!(engine.options.max_depth, 3);
    }

    #[test]
    fn new_game_validates_options() {
        let mut engine = Engine::new();
        engine.set_option("MaxDepth", Some("9")).unwrap();
        assert_eq!(engine.new_game(), Err(ConfigError::MaxDepth(9)));
        assert!(engine.game().is_none());
    }

    #[test]
    fn new_game_starts() {
        let mut engine = seeded_engine();
        engine.new_game().unwrap();
        let game = engine.game().unwrap();
        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.status(), "Game start! First: Human 1");
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|o| engine.handle_isready(o)).trim(), "readyok");
    }

    #[test]
    fn commands_without_game_report_it() {
        let mut engine = Engine::new();
        assert_eq!(output_of(|o| engine.handle_go(o)).trim(), "status No game");
        assert_eq!(output_of(|o| engine.handle_board(o)).trim(), "status No game");
        assert!(engine.set_position("r").is_err());
    }

    #[test]
    fn position_then_board() {
        let mut engine = seeded_engine();
        engine.new_game().unwrap();
        engine.set_position("(rp(prod)d)").unwrap();
        let out = output_of(|o| engine.handle_board(o));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["grid pprr", "grid pprr", "grid rpdd", "grid oddd", "board (rp(prod)d)"]);
        assert!(engine.set_position("(rpo").is_err());
    }

    #[test]
    fn select_and_action_report_status() {
        let mut engine = seeded_engine();
        engine.new_game().unwrap();
        engine.set_position("(rpod)").unwrap();
        let out = output_of(|o| engine.handle_action(Action::SwapVertical, o));
        assert_eq!(out.trim(), "status Select a block first!");
        output_of(|o| engine.handle_select(64, 64, 0, o));
        let out = output_of(|o| engine.handle_action(Action::SwapVertical, o));
        assert_eq!(out.trim(), "status Turn: Human 2");
        let out = output_of(|o| engine.handle_board(o));
        assert!(out.ends_with("board (dopr)\n"));
    }

    #[test]
    fn status_lists_players() {
        let mut engine = seeded_engine();
        engine.set_option("RandomAI", Some("1")).unwrap();
        engine.new_game().unwrap();
        let out = output_of(|o| engine.handle_status(o));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "status Game start! First: Human 1");
        assert_eq!(lines[1], "turn 0 of 20");
        assert!(lines[2].starts_with("player Human 1|"));
        assert!(lines[4].starts_with("player Random AI 3|"));
        assert_eq!(lines[5], "actions enabled");
    }

    #[test]
    fn go_plays_automated_turn() {
        let mut engine = Engine::new();
        engine.set_option("Humans", Some("0")).unwrap();
        engine.set_option("SmartAI", Some("2")).unwrap();
        engine.set_option("Seed", Some("11")).unwrap();
        engine.new_game().unwrap();
        let out = output_of(|o| engine.handle_go(o));
        assert_eq!(out.trim(), "status Turn: Smart AI 2");
        assert_eq!(engine.game().unwrap().turn(), 1);
    }
}
