//! Wire protocol for the remote-control adapter.
//!
//! Line-delimited JSON: each request line carries exactly one action, each
//! response line carries the full game state. The action vocabulary and
//! response payload match the original HTTP API of the served variant
//! (`left`/`right`/`down`/`rotate`/`drop`/`tick`/`reset`, plus `state` as a
//! pure query).

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, GameState, PieceSnapshot};
use crate::types::Direction;

/// One remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireAction {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
    Tick,
    Reset,
    /// Query only: returns the snapshot without mutating anything.
    State,
}

/// Client -> server request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: WireAction,
}

/// A piece on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePiece {
    pub shape: u8,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: u8,
}

impl From<PieceSnapshot> for WirePiece {
    fn from(piece: PieceSnapshot) -> Self {
        Self {
            shape: piece.shape,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            color: piece.color,
        }
    }
}

/// Server -> client response: the full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub board: Vec<Vec<u8>>,
    pub current_piece: WirePiece,
    pub next_piece: WirePiece,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
}

impl StateMessage {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            board: snapshot.board.iter().map(|row| row.to_vec()).collect(),
            current_piece: WirePiece::from(snapshot.active),
            next_piece: WirePiece::from(snapshot.next),
            score: snapshot.score,
            level: snapshot.level,
            lines_cleared: snapshot.lines_cleared,
            game_over: snapshot.game_over,
        }
    }
}

/// Server -> client error reply (the request never reaches the core).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

/// Dispatch one wire action against the game.
///
/// Mirrors the original route handlers: `tick` is the client-driven gravity
/// step, `state` touches nothing.
pub fn apply_action(state: &mut GameState, action: WireAction) {
    match action {
        WireAction::Left => {
            state.shift(Direction::Left);
        }
        WireAction::Right => {
            state.shift(Direction::Right);
        }
        WireAction::Down => {
            state.soft_drop_step();
        }
        WireAction::Rotate => {
            state.rotate();
        }
        WireAction::Drop => {
            state.hard_drop();
        }
        WireAction::Tick => {
            state.tick();
        }
        WireAction::Reset => state.reset(),
        WireAction::State => {}
    }
}
