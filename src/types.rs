//! Core types shared across the application
//!
//! This module contains pure data types and constants with no external
//! dependencies, usable from the game core, the terminal view, and the
//! remote-control adapter alike.

/// Grid dimensions (columns x rows). Row 0 is the topmost row.
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Horizontal spawn origin: centers the 4-wide mask reference box.
pub const SPAWN_X: i8 = GRID_WIDTH as i8 / 2 - 2;

/// Driver poll granularity in milliseconds (the gravity interval itself is
/// part of the game state and changes with level).
pub const TICK_MS: u64 = 16;

/// Color identifier for a locked cell (catalog index + 1; 0 is reserved for
/// "empty" in exported grids).
pub type ColorId = u8;

/// Cell on the board (None = empty, Some = filled with a color id)
pub type Cell = Option<ColorId>;

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn dx(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Game actions as delivered by an input driver.
///
/// `Pause` is a driver-level action: the core has no pause operation, the
/// driver simply stops forwarding gravity ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse an action from its wire/debug name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameAction::MoveLeft),
            "right" => Some(GameAction::MoveRight),
            "down" => Some(GameAction::SoftDrop),
            "drop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_name(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "left",
            GameAction::MoveRight => "right",
            GameAction::SoftDrop => "down",
            GameAction::HardDrop => "drop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "reset",
        }
    }
}
