//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (negative y) are legal for a falling piece but never stored.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear, bottom to top
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a falling mino may sit at (x, y).
    ///
    /// The column must be on the board and the row above the floor. Rows above the
    /// top edge are open regardless of what lies below them.
    #[inline]
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check if every cell of the piece is open
    pub fn is_valid(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_open(x, y))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`, or `None` if `y` is off the board
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Write the piece's cells into the grid with its kind.
    ///
    /// Cells outside the board (above the top edge) are silently dropped.
    /// Nothing is validated; callers lock only pieces that passed `is_valid`.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Surviving rows keep their relative order and the same number of empty rows
    /// appear at the top. Uses a two-pointer compaction with zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array (snapshot form)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (row, cells) in out.iter_mut().zip(self.cells.chunks_exact(BOARD_WIDTH as usize)) {
            row.copy_from_slice(cells);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// Each row is 10 characters; `.` or space is empty, a piece letter locks that
    /// kind and any other character locks an `I`. Rows missing at the top are empty.
    /// Intended for puzzle setups and tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, text) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in text.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;
    use proptest::prelude::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_open_above_top_edge() {
        let board = Board::new();
        assert!(board.is_open(0, -1));
        assert!(board.is_open(9, -3));
        assert!(!board.is_open(-1, -1));
        assert!(!board.is_open(10, -1));
        assert!(!board.is_open(0, 20));
    }

    #[test]
    fn test_lock_drops_cells_above_board() {
        let mut board = Board::new();
        // Vertical I with its top two minos above the board.
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 0,
            y: -2,
        };
        assert!(board.is_valid(&piece));

        board.lock(&piece);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.get(2, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(2, 1), Some(Some(PieceKind::I)));
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let board = Board::from_rows(&["T.........", "IIIIIIIII."]);
        assert_eq!(board.get(0, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(8, 19), Some(Some(PieceKind::I)));
        assert_eq!(board.get(9, 19), Some(None));
        assert_eq!(board.occupied_count(), 10);
    }

    #[test]
    fn test_clear_more_than_four_rows() {
        let rows = ["##########"; 6];
        let mut board = Board::from_rows(&rows);
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), 6);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_row_off_board_is_none() {
        let board = Board::from_rows(&["##########"]);
        assert_eq!(board.row(19).map(|row| row.len()), Some(BOARD_WIDTH as usize));
        assert!(board.row(BOARD_HEIGHT as usize).is_none());
        assert!(board.row(usize::MAX).is_none());
        assert!(!board.is_row_full(BOARD_HEIGHT as usize));
    }

    fn kind_strategy() -> impl Strategy<Value = PieceKind> {
        prop::sample::select(PieceKind::ALL.to_vec())
    }

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        (0usize..4).prop_map(Rotation::from_index)
    }

    proptest! {
        #[test]
        fn lock_touches_only_piece_cells(
            kind in kind_strategy(),
            rotation in rotation_strategy(),
            x in -2i8..10,
            y in -3i8..20,
            filled in prop::collection::vec(any::<bool>(), BOARD_SIZE),
        ) {
            let mut board = Board::new();
            for (i, on) in filled.iter().enumerate() {
                if *on {
                    board.set((i % BOARD_WIDTH as usize) as i8, (i / BOARD_WIDTH as usize) as i8, Some(PieceKind::Z));
                }
            }
            // Placement is not validated; off-board cells are just dropped.
            let piece = Tetromino { kind, rotation, x, y };

            let before = board.clone();
            board.lock(&piece);

            let cells = piece.cells();
            for yy in 0..BOARD_HEIGHT as i8 {
                for xx in 0..BOARD_WIDTH as i8 {
                    if cells.contains(&(xx, yy)) {
                        prop_assert_eq!(board.get(xx, yy), Some(Some(kind)));
                    } else {
                        prop_assert_eq!(board.get(xx, yy), before.get(xx, yy));
                    }
                }
            }
        }
    }
}
