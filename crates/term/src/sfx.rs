//! Sound cues for game notifications, and a terminal-bell sink that plays them.
//!
//! Volumes are in `0.0..=1.0`. A real audio backend would play each cue at its
//! volume; the terminal can only ring its bell, so [`BellSink`] rings for cues at or
//! above a threshold and skips the rest.

use std::io::{self, Write};

use tracing::warn;

use crate::core::EventSink;
use crate::types::GameEvent;

pub const MOVE_PIECE_SFX_VOLUME: f32 = 0.25;
pub const ACTION_SFX_VOLUME: f32 = 0.35;
pub const LINE_CLEAR_SFX_VOLUME: f32 = 0.45;

/// Background music sits under the gameplay effects.
pub const MUSIC_VOLUME: f32 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    LineClear,
    GameOver,
    StartMusic,
    StopMusic,
}

impl SoundCue {
    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Move => MOVE_PIECE_SFX_VOLUME,
            SoundCue::Rotate | SoundCue::Drop => ACTION_SFX_VOLUME,
            SoundCue::LineClear | SoundCue::GameOver => LINE_CLEAR_SFX_VOLUME,
            SoundCue::StartMusic | SoundCue::StopMusic => MUSIC_VOLUME,
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, SoundCue::StartMusic | SoundCue::StopMusic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Rotate => "rotate",
            SoundCue::Drop => "drop",
            SoundCue::LineClear => "clear",
            SoundCue::GameOver => "gameover",
            SoundCue::StartMusic => "bgm-start",
            SoundCue::StopMusic => "bgm-stop",
        }
    }
}

/// Cues for one notification, in play order.
///
/// Game over stops the music before the game-over effect.
pub fn cues_for(event: &GameEvent) -> &'static [SoundCue] {
    match event {
        GameEvent::Started => &[SoundCue::StartMusic],
        GameEvent::Moved { .. } => &[SoundCue::Move],
        GameEvent::Rotated => &[SoundCue::Rotate],
        GameEvent::HardDropped => &[SoundCue::Drop],
        GameEvent::LinesCleared { .. } => &[SoundCue::LineClear],
        GameEvent::GameOver { .. } => &[SoundCue::StopMusic, SoundCue::GameOver],
    }
}

/// Rings the terminal bell (BEL) for loud enough effect cues.
pub struct BellSink<W: Write = io::Stdout> {
    out: Option<W>,
    threshold: f32,
    rung: u32,
}

impl BellSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellSink<W> {
    /// Rings for line clears and game over by default.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            threshold: LINE_CLEAR_SFX_VOLUME,
            rung: 0,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Bells written so far
    pub fn rung(&self) -> u32 {
        self.rung
    }

    fn ring(&mut self) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let res = out.write_all(b"\x07").and_then(|_| out.flush());
        match res {
            Ok(()) => self.rung += 1,
            Err(err) => {
                warn!(error = %err, "terminal bell failed; disabling sound");
                self.out = None;
            }
        }
    }
}

impl<W: Write> EventSink for BellSink<W> {
    fn notify(&mut self, event: &GameEvent) {
        let loud = cues_for(event)
            .iter()
            .any(|cue| !cue.is_music() && cue.volume() >= self.threshold);
        if loud {
            self.ring();
        }
    }
}
