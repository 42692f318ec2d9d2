//! Game state module - the rule engine's state machine
//!
//! Ties together board, pieces, randomizer and scoring. A game moves through
//! `Idle -> Playing -> GameOver`; `start` re-enters `Playing` from either resting
//! phase and `reset` returns to `Idle` from anywhere.
//!
//! Two kinds of triggers mutate the state: the gravity tick ([`GameState::tick`]) and
//! player commands. Both are synchronous and must not overlap. Rejected attempts leave
//! the state untouched and queue no event.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::PieceBag;
use crate::scoring::{calculate_line_score, drop_interval_secs, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, GamePhase, PieceKind, BASE_DROP_MS};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Ignored,
    /// Active piece fell one row
    Fell,
    /// Active piece could not fall and was locked
    Locked,
}

/// Undrained notifications kept before the oldest are discarded.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete game state
///
/// Every successful transition queues a [`GameEvent`]. Whoever drives the game is
/// expected to call [`GameState::drain_events`] after each step, as the engine loop does;
/// a driver that never drains only keeps the newest [`MAX_PENDING_EVENTS`].
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    bag: PieceBag,
    score: u32,
    drop_interval_ms: u32,
    phase: GamePhase,
    /// Monotonic count of successful spawns in the current game.
    pieces_spawned: u32,
    /// Notifications not yet drained by the driver, capped at [`MAX_PENDING_EVENTS`].
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with the given RNG seed. The next piece is already drawn.
    pub fn new(seed: u32) -> Self {
        let mut bag = PieceBag::new(seed);
        let next = bag.draw();

        Self {
            board: Board::new(),
            active: None,
            next,
            bag,
            score: 0,
            drop_interval_ms: BASE_DROP_MS,
            phase: GamePhase::Idle,
            pieces_spawned: 0,
            events: Vec::with_capacity(8),
        }
    }

    /// Start a game on an empty board.
    ///
    /// Returns false (and does nothing) while a game is already in progress.
    pub fn start(&mut self) -> bool {
        self.start_with_board(Board::new())
    }

    /// Start a game on a prepared board.
    ///
    /// Identical to [`GameState::start`] except the board is taken as given, so the
    /// very first spawn may already be blocked.
    pub fn start_with_board(&mut self, board: Board) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.board = board;
        self.score = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.bag.reset();
        self.next = self.bag.draw();
        self.active = None;
        self.pieces_spawned = 0;
        self.phase = GamePhase::Playing;

        info!(seed = self.bag.seed(), "game started");
        self.emit(GameEvent::Started);
        self.spawn_piece();
        true
    }

    /// Abandon any game and return to idle with an empty board.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.bag.reset();
        self.next = self.bag.draw();
        self.active = None;
        self.pieces_spawned = 0;
        self.phase = GamePhase::Idle;
        info!("game reset");
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Gravity interval in milliseconds per row
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Gravity interval in seconds per row
    pub fn speed_secs(&self) -> f64 {
        drop_interval_secs(self.drop_interval_ms)
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.score = self.score;
        out.drop_interval_ms = self.drop_interval_ms;
        out.phase = self.phase;
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to active at the spawn anchor and refill the preview.
    ///
    /// A blocked spawn ends the game.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = self.bag.draw();
        let piece = Tetromino::new(kind);

        if !self.board.is_valid(&piece) {
            self.active = None;
            self.phase = GamePhase::GameOver;
            info!(score = self.score, ?kind, "spawn blocked, game over");
            self.emit(GameEvent::GameOver { score: self.score });
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(?kind, next = ?self.next, "spawned piece");
        true
    }

    /// Try to move the active piece; commits only if the target is valid
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(dx, dy);
        if self.board.is_valid(&candidate) {
            self.active = Some(candidate);
            return true;
        }

        false
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        if !self.is_playing() || !self.try_move(dx, 0) {
            return false;
        }
        self.emit(GameEvent::Moved { dx });
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Rotate clockwise, kicking one column left then one column right.
    ///
    /// If nothing fits the piece keeps its previous rotation and position.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, |p| self.board.is_valid(p)) {
            Some(rotated) => {
                self.active = Some(rotated);
                self.emit(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes and lock it immediately.
    ///
    /// Returns false when there is nothing to drop.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_playing() || self.active.is_none() {
            return false;
        }

        let mut distance: u32 = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }

        debug!(distance, "hard drop");
        self.emit(GameEvent::HardDropped);
        self.lock_and_advance();
        true
    }

    /// One gravity step: fall a row, or lock when the piece rests on something.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing() || self.active.is_none() {
            return TickOutcome::Ignored;
        }

        if self.try_move(0, 1) {
            TickOutcome::Fell
        } else {
            self.lock_and_advance();
            TickOutcome::Locked
        }
    }

    /// Lock the active piece, clear lines, update score and speed, spawn the next piece
    fn lock_and_advance(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active);

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        if lines_cleared > 0 {
            let points = calculate_line_score(lines_cleared);
            self.score = self.score.saturating_add(points);
            let interval = get_drop_interval_ms(self.score);
            if interval != self.drop_interval_ms {
                debug!(from = self.drop_interval_ms, to = interval, "gravity interval changed");
            }
            self.drop_interval_ms = interval;

            debug!(lines = lines_cleared, points, score = self.score, "lines cleared");
            self.emit(GameEvent::LinesCleared {
                lines: lines_cleared as u8,
                points,
            });
        }

        self.spawn_piece();
    }

    /// Apply a game action, returning whether it was accepted
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
