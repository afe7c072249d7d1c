//! Terminal presentation layer: framebuffer, renderer, and game view.
//!
//! The view is a pure snapshot-to-framebuffer mapping; only the renderer
//! touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
