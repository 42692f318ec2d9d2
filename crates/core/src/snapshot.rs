use crate::pieces::Tetromino;
use crate::scoring::drop_interval_secs;
use crate::types::{Cell, GamePhase, PieceKind, Rotation, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major copy of the locked cells
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute cells, possibly above the board (negative y)
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub drop_interval_ms: u32,
    pub phase: GamePhase,
    pub pieces_spawned: u32,
}

impl GameSnapshot {
    pub fn playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Gravity interval in seconds per row
    pub fn speed_secs(&self) -> f64 {
        drop_interval_secs(self.drop_interval_ms)
    }

    /// Kind occupying (x, y) counting the active piece, for drawing
    pub fn visible_cell(&self, x: i8, y: i8) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(active.kind);
            }
        }
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        self.board[y as usize][x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            score: 0,
            drop_interval_ms: BASE_DROP_MS,
            phase: GamePhase::Idle,
            pieces_spawned: 0,
        }
    }
}
