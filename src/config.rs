use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};
use crate::snake::Direction;
use crate::{Coord, Coords};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Largest grid a board may have on either axis.
pub const MAX_GRID_SIDE: Coord = 500;

/// Playing field, in pixel units. Every valid position is a multiple of
/// `cell_size` inside `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: Coord,
    pub height: Coord,
    pub cell_size: Coord,
}

impl Board {
    pub fn new(width: Coord, height: Coord, cell_size: Coord) -> Self {
        Board { width, height, cell_size }
    }

    pub fn columns(&self) -> Coord {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> Coord {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns().max(0) as usize).saturating_mul(self.rows().max(0) as usize)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0) && (0..self.height).contains(&pos.1)
    }

    pub fn is_aligned(&self, pos: Coords) -> bool {
        pos.0 % self.cell_size == 0 && pos.1 % self.cell_size == 0
    }

    /// Grid column and row of a position.
    pub fn cell_of(&self, pos: Coords) -> (Coord, Coord) {
        (pos.0 / self.cell_size, pos.1 / self.cell_size)
    }

    /// All cell positions, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| (col * self.cell_size, row * self.cell_size))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(580, 380, 20)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: Board,
    /// Head first.
    pub initial_snake: Vec<Coords>,
    pub initial_heading: Direction,
    pub tick_interval_ms: u64,
    pub food_reward: u32,
    pub leaderboard_capacity: usize,
    pub game_over_delay_ms: u64,
    pub leaderboard_path: PathBuf,
    pub default_player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: Board::default(),
            initial_snake: vec![(100, 100), (80, 100), (60, 100)],
            initial_heading: Direction::Right,
            tick_interval_ms: 200,
            food_reward: 10,
            leaderboard_capacity: 5,
            game_over_delay_ms: 3000,
            leaderboard_path: PathBuf::from("highscores.json"),
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl GameConfig {
    /// Reads a JSON config. Fields left out keep their default value.
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |reason: String| SnakeError::Config { path: path.to_path_buf(), reason };

        let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config: GameConfig = serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;

        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        let board = &self.board;

        if board.cell_size <= 0 {
            return Err(format!("cell size must be positive, got {}", board.cell_size));
        }
        if board.width <= 0 || board.height <= 0 {
            return Err(format!("board {}x{} is empty", board.width, board.height));
        }
        if board.width % board.cell_size != 0 || board.height % board.cell_size != 0 {
            return Err(format!(
                "board {}x{} is not a multiple of cell size {}",
                board.width, board.height, board.cell_size
            ));
        }
        if board.columns() > MAX_GRID_SIDE || board.rows() > MAX_GRID_SIDE {
            return Err(format!(
                "board of {}x{} cells is larger than {}x{}",
                board.columns(),
                board.rows(),
                MAX_GRID_SIDE,
                MAX_GRID_SIDE
            ));
        }
        if self.initial_snake.is_empty() {
            return Err("initial snake has no segments".to_string());
        }
        if self.initial_snake.len() >= board.cell_count() {
            return Err(format!(
                "board of {} cells has no room for a snake of {}",
                board.cell_count(),
                self.initial_snake.len()
            ));
        }

        let mut seen = HashSet::new();
        for &pos in &self.initial_snake {
            if !board.contains(pos) || !board.is_aligned(pos) {
                return Err(format!("initial segment {:?} is not a cell of the board", pos));
            }
            if !seen.insert(pos) {
                return Err(format!("initial segment {:?} appears twice", pos));
            }
        }

        if let [head, neck, ..] = self.initial_snake[..] {
            let (dx, dy) = self.initial_heading.delta();
            if (head.0 + dx * board.cell_size, head.1 + dy * board.cell_size) == neck {
                return Err(format!(
                    "initial heading {:?} points back into the body",
                    self.initial_heading
                ));
            }
        }

        if self.leaderboard_capacity == 0 {
            return Err("leaderboard capacity must be at least 1".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("tick interval must be at least 1ms".to_string());
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }

    /// Trimmed player name, or the default when nothing usable was typed.
    pub fn player_name(&self, typed: &str) -> String {
        let name = typed.trim();
        if name.is_empty() {
            self.default_player_name.clone()
        } else {
            name.to_string()
        }
    }
}
