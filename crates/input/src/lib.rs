//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. It holds no state:
//! terminals repeat held keys on their own and the engine rejects anything that does
//! not fit, so every press is forwarded as is.

pub mod map;

pub use ar_tetris_types as types;

pub use map::{handle_key_event, should_quit};
