//! Core rule engine - pure, deterministic, and testable
//!
//! This crate owns every rule of the game: the 10x20 well, the seven tetromino shapes
//! and their rotation table, the 7-bag randomizer, line clearing, scoring and the
//! gravity speed curve. It performs no I/O and owns no clock; a driver calls
//! [`GameState::tick`] whenever gravity fires and forwards player commands.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 well with collision checks, locking and row compaction
//! - [`pieces`]: shape table, spawn anchor and the one-left/one-right rotation kick
//! - [`rng`]: seeded 7-bag randomizer
//! - [`scoring`]: line clear points and the drop interval curve
//! - [`game_state`]: the `Idle -> Playing -> GameOver` state machine
//! - [`events`]: notification sink seam (sound cues, logs)
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Rules in brief
//!
//! - Pieces spawn at column 3, row 0 in their first rotation state.
//! - Left/right moves and rotations either fit entirely or change nothing.
//! - Rotation tries in place, then one column left, then one column right.
//! - Hard drop falls as far as possible and locks at once.
//! - Clearing 1/2/3/4 lines scores 100/300/500/800.
//! - Gravity runs every `max(100, 800 - score / 5)` milliseconds.
//! - A spawn that collides ends the game.
//!
//! # Example
//!
//! ```
//! use ar_tetris_core::{GameState, GameEvent};
//! use ar_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! let events: Vec<GameEvent> = game.drain_events().collect();
//! assert_eq!(events.first(), Some(&GameEvent::Started));
//! assert!(events.contains(&GameEvent::HardDropped));
//! ```

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use ar_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use events::{dispatch, EventSink, FnSink, NullSink};
pub use game_state::{GameState, TickOutcome, MAX_PENDING_EVENTS};
pub use pieces::{get_shape, get_spawn_shape, try_rotate, PieceShape, Tetromino, SHAPES};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_line_score, drop_interval_secs, get_drop_interval_ms};
pub use snapshot::{ActiveSnapshot, BoardGrid, GameSnapshot};
pub use types::{GameEvent, GamePhase, PieceKind, Rotation};
