//! Engine runtime: tick source, command queue and notification sinks.
//!
//! The rule engine in `ar-tetris-core` is synchronous and clockless. This crate drives
//! it: one async loop applies queued player commands and fires the gravity tick at the
//! game's current speed, so the two never interleave. Notifications are forwarded to
//! an [`EventSink`](crate::core::EventSink) and snapshots are published over a
//! `watch` channel for renderers.
//!
//! # Environment Variables
//!
//! - `TETRIS_SEED`: piece bag seed (default: derived from the clock)
//! - `TETRIS_MAX_PENDING`: command queue capacity (default: 32)
//! - `TETRIS_EVENT_LOG`: append notifications to this file as JSON lines
//! - `TETRIS_SOUND`: set to "0" or "false" to silence the terminal bell

pub mod clock;
pub mod config;
pub mod runtime;
pub mod sinks;

pub use ar_tetris_core as core;
pub use ar_tetris_types as types;

pub use clock::GravityClock;
pub use config::EngineConfig;
pub use runtime::{run_engine, spawn_engine, EngineCommand, EngineHandle, EngineRuntime};
pub use sinks::{ChannelSink, FanoutSink, JsonLinesSink, TracingSink};
