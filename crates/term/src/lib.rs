//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple framebuffer
//! that is diffed and flushed to the terminal with `crossterm`.
//!
//! Cells are drawn 2 columns wide by default to compensate for glyph aspect ratio.
//! The [`sfx`] module maps game notifications to sound cues.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sfx;

pub use ar_tetris_core as core;
pub use ar_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
pub use sfx::{cues_for, BellSink, SoundCue};
