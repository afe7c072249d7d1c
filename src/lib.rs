//! tui-blockfall: a terminal falling-block puzzle game.
//!
//! The crate is split into a pure rule engine and thin replaceable shells:
//!
//! - [`core`]: the deterministic game-state machine (board, shape catalog,
//!   movement/rotation legality, gravity, line clears, scoring/leveling).
//!   No I/O, no timing — drivers invoke one operation per discrete input
//!   and render the resulting snapshot.
//! - [`term`]: crossterm framebuffer renderer and the snapshot view.
//! - [`input`]: key-event to action mapping.
//! - [`adapter`]: line-delimited JSON TCP server for remote control.
//! - [`types`]: shared constants and dependency-free data types.
//!
//! # Example
//!
//! ```
//! use tui_blockfall::core::GameState;
//! use tui_blockfall::types::Direction;
//!
//! let mut game = GameState::new(12345);
//! game.shift(Direction::Right);
//! game.rotate();
//! game.hard_drop();
//! assert!(game.score() > 0); // hard drops award descent points
//! ```

pub mod adapter;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
