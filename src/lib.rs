//! Falling-block puzzle (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof: `ar_tetris::{core, engine, input,
//! term, types}`. The rules live in `core`; everything else drives or displays them.

pub use ar_tetris_core as core;
pub use ar_tetris_engine as engine;
pub use ar_tetris_input as input;
pub use ar_tetris_term as term;
pub use ar_tetris_types as types;
