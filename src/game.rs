//! Turn orchestration.
//!
//! Owns the live board, the players, and the undo history. A turn snapshots
//! the board, applies one committed move, and passes play to the next seat.
//! The game ends after a fixed number of turns and the highest score wins.
//!
//! Nothing here fails hard: rejected requests leave the game untouched,
//! return `false`, and leave a message in `status()` for the presentation layer.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::{Action, BoardNode, Grid, PALETTE};
use crate::goal::{Goal, GoalKind};
use crate::player::{Player, PlayerSummary};
use crate::search::{Move, Strategy};

pub const MIN_DEPTH: u8 = 2;
pub const MAX_DEPTH: u8 = 6;
pub const MIN_TURNS: u32 = 8;
pub const MAX_TURNS: u32 = 60;

/// Default side length of the root, in board units.
pub const DEFAULT_BOARD_SIZE: u32 = 768;

/// Times an automated player may re-run its strategy when its chosen move
/// turns out to be invalid on the live board.
const AUTOMATED_ATTEMPTS: usize = 8;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    NotStarted,
    InProgress,
    Completed,
}

/// Errors rejected when building a game from a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max depth {0} is outside 2..=6")]
    MaxDepth(u8),

    #[error("max turns {0} is outside 8..=60")]
    MaxTurns(u32),

    #[error("board size {size} is not divisible by 2^{max_depth}")]
    BoardSize { size: u32, max_depth: u8 },

    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("self-play seats must all be automated, got {0} human(s)")]
    HumanSeats(usize),
}

/// Start-of-game parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub max_depth: u8,
    pub max_turns: u32,
    pub humans: usize,
    pub random_ais: usize,
    pub sampled_ais: usize,
    pub exhaustive_ais: usize,
    pub board_size: u32,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_depth: 3,
            max_turns: 20,
            humans: 2,
            random_ais: 0,
            sampled_ais: 0,
            exhaustive_ais: 0,
            board_size: DEFAULT_BOARD_SIZE,
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn player_count(&self) -> usize {
        self.humans + self.random_ais + self.sampled_ais + self.exhaustive_ais
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::MaxDepth(self.max_depth));
        }
        if !(MIN_TURNS..=MAX_TURNS).contains(&self.max_turns) {
            return Err(ConfigError::MaxTurns(self.max_turns));
        }
        let cells = 1u32 << self.max_depth;
        if self.board_size == 0 || self.board_size % cells != 0 {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
                max_depth: self.max_depth,
            });
        }
        if self.player_count() == 0 {
            return Err(ConfigError::NoPlayers);
        }
        Ok(())
    }

    /// Seats players in order: humans, random, sampled, exhaustive. Targets
    /// cycle through the palette by seat; goal kinds are drawn at random.
    fn seat_players(&self, rng: &mut SmallRng) -> Vec<Player> {
        let strategies = std::iter::repeat(Strategy::Human)
            .take(self.humans)
            .chain(std::iter::repeat(Strategy::random()).take(self.random_ais))
            .chain(std::iter::repeat(Strategy::sampled()).take(self.sampled_ais))
            .chain(std::iter::repeat(Strategy::exhaustive()).take(self.exhaustive_ais));

        strategies
            .enumerate()
            .map(|(i, strategy)| {
                let goal = Goal::new(GoalKind::random(rng), PALETTE[i % PALETTE.len()]);
                Player::new(i + 1, goal, strategy)
            })
            .collect()
    }
}

/// The node the human player has pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub x: u32,
    pub y: u32,
    pub level: u8,
}

/// A game in progress.
pub struct Game {
    board: BoardNode,
    players: Vec<Player>,
    state: GameState,
    max_turns: u32,
    turns_played: u32,
    current: usize,
    history: Vec<BoardNode>,
    selection: Option<Selection>,
    last_move: Option<Move>,
    status: String,
    rng: SmallRng,
}

impl Game {
    /// Builds a game from a validated configuration: a random root, smashed
    /// once, and the configured seats.
    pub fn new(config: &GameConfig) -> Result<Game, ConfigError> {
        config.validate()?;
        let mut rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        let mut board = BoardNode::random_root(config.board_size, config.max_depth, &mut rng);
        board.subdivide(&mut rng);
        let players = config.seat_players(&mut rng);
        Ok(Game::with_board(board, players, config.max_turns, rng))
    }

    /// Builds a game around an existing board and seats.
    pub fn with_board(board: BoardNode, players: Vec<Player>, max_turns: u32, rng: SmallRng) -> Game {
        Game {
            board,
            players,
            state: GameState::NotStarted,
            max_turns,
            turns_played: 0,
            current: 0,
            history: Vec::new(),
            selection: None,
            last_move: None,
            status: String::new(),
            rng,
        }
    }

    pub fn board(&self) -> &BoardNode {
        &self.board
    }

    /// The flattened board, for rendering.
    pub fn grid(&self) -> Grid {
        self.board.flatten()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Completed turns so far.
    pub fn turn(&self) -> u32 {
        self.turns_played
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The most recent committed move.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Message for the status line after the latest request.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Action controls are disabled once the game is over.
    pub fn actions_enabled(&self) -> bool {
        self.state != GameState::Completed
    }

    pub fn scores(&self) -> Vec<u32> {
        let grid = self.board.flatten();
        self.players.iter().map(|p| p.goal.score(&grid)).collect()
    }

    /// Seat index and score of the leader. The earliest seat wins ties.
    pub fn winner(&self) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32)> = None;
        for (i, score) in self.scores().into_iter().enumerate() {
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        best
    }

    pub fn player_summaries(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .zip(self.scores())
            .map(|(p, score)| PlayerSummary {
                name: p.name.clone(),
                goal: p.goal.description(),
                score,
            })
            .collect()
    }

    /// Replaces the live board. History and selection are cleared; turn
    /// count and seat are kept.
    pub fn set_board(&mut self, board: BoardNode) {
        self.board = board;
        self.history.clear();
        self.selection = None;
        self.last_move = None;
    }

    /// Moves the game from not-started to in-progress.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::NotStarted {
            self.status = "Game already started".to_string();
            return false;
        }
        if self.players.is_empty() {
            self.status = "No players".to_string();
            return false;
        }
        self.state = GameState::InProgress;
        self.turns_played = 0;
        self.current = 0;
        self.status = format!("Game start! First: {}", self.players[0].name);
        log::info!("{}", self.status);
        true
    }

    /// Selects the node at (`x`, `y`) on `level` for the next human action.
    pub fn select(&mut self, x: u32, y: u32, level: u8) -> bool {
        if self.board.locate(x, y, level).is_some() {
            self.selection = Some(Selection { x, y, level });
            self.status = format!("Selected level {} block at ({}, {})", level, x, y);
            true
        } else {
            self.selection = None;
            self.status = format!(
                "couldn't activate a block at that location and level({})",
                level
            );
            false
        }
    }

    /// The currently selected node, if the selection still resolves.
    pub fn selected_node(&self) -> Option<&BoardNode> {
        let s = self.selection?;
        self.board.locate(s.x, s.y, s.level)
    }

    /// Applies a presentation-layer action to the selected node. `Undo`
    /// needs no selection.
    pub fn apply_selected(&mut self, action: Action) -> bool {
        if action == Action::Undo {
            return self.undo();
        }
        if !self.accepting_moves() {
            return false;
        }
        let Some(sel) = self.selection else {
            self.status = "Select a block first!".to_string();
            return false;
        };
        self.commit(Move {
            x: sel.x,
            y: sel.y,
            level: sel.level,
            action,
            score: None,
        })
    }

    /// Lets the current automated player choose and play its move.
    pub fn play_automated_turn(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let (name, goal, strategy) = {
            let p = &self.players[self.current];
            (p.name.clone(), p.goal, p.strategy)
        };
        if !strategy.is_automated() {
            self.status = format!("Waiting for {}", name);
            return false;
        }
        for _ in 0..AUTOMATED_ATTEMPTS {
            let Some(chosen) = strategy.choose(&self.board, &goal, &mut self.rng) else {
                continue;
            };
            if self.commit(chosen) {
                return true;
            }
        }
        self.status = format!("{} found no move", name);
        log::warn!("{}", self.status);
        false
    }

    /// Restores the board from before the last committed move and hands
    /// the turn back. Rejected once the game is over.
    pub fn undo(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let Some(previous) = self.history.pop() else {
            self.status = "Nothing to undo".to_string();
            return false;
        };
        self.board = previous;
        self.turns_played -= 1;
        self.current = (self.current + self.players.len() - 1) % self.players.len();
        self.last_move = None;
        self.status = format!("Undid last move. Turn: {}", self.players[self.current].name);
        log::info!("undo to turn {}", self.turns_played);
        true
    }

    fn accepting_moves(&mut self) -> bool {
        match self.state {
            GameState::InProgress => true,
            GameState::NotStarted => {
                self.status = "Game has not started".to_string();
                false
            }
            GameState::Completed => {
                self.status = "Game over".to_string();
                false
            }
        }
    }

    /// Snapshots the board, applies `m`, and ends the turn. A move that
    /// does not apply leaves board, history, and turn untouched.
    fn commit(&mut self, m: Move) -> bool {
        let snapshot = self.board.clone();
        if !m.apply(&mut self.board, &mut self.rng) {
            self.status = format!("Cannot {} that block", m.action);
            return false;
        }
        self.history.push(snapshot);
        self.last_move = Some(m);
        log::info!(
            "turn {}: {} plays {} at ({}, {}) level {}",
            self.turns_played + 1,
            self.players[self.current].name,
            m.action,
            m.x,
            m.y,
            m.level
        );
        self.end_turn();
        true
    }

    fn end_turn(&mut self) {
        self.turns_played += 1;
        if self.turns_played >= self.max_turns {
            self.end_game();
            return;
        }
        self.current = (self.current + 1) % self.players.len();
        self.status = format!("Turn: {}", self.players[self.current].name);
    }

    fn end_game(&mut self) {
        self.state = GameState::Completed;
        if let Some((i, score)) = self.winner() {
            self.status = format!("Winner: {}  Score: {}", self.players[i].name, score);
        }
        log::info!("game over after {} turns: {}", self.turns_played, self.status);
    }
}
