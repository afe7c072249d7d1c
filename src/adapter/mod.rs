//! Remote-control adapter - JSON line protocol over TCP
//!
//! Replaces the original served variant's HTTP routes: one action per
//! request line, the full state snapshot per response line. The session's
//! `GameState` is owned by the server (no process-wide singleton), so
//! multiple sessions are representable without cross-talk.

pub mod protocol;
pub mod server;

pub use protocol::{apply_action, ActionRequest, ErrorMessage, StateMessage, WireAction, WirePiece};
pub use server::{run, serve_on, shared_game, ServerConfig, SharedGame};
