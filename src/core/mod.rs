//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, networking, or I/O.

pub mod board;
pub mod catalog;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use catalog::{RotationMask, ShapeCatalog, ShapeDef};
pub use game_state::{FallingPiece, GameConfig, GameState, LockOutcome, MoveOutcome};
pub use rng::SimpleRng;
pub use scoring::GravityCurve;
pub use snapshot::{GameSnapshot, PieceSnapshot};
