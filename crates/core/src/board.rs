//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{cell_code, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Rows that trigger game over when anything is locked into them
const TOP_OUT_ROWS: usize = 2;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
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
    ///
    /// Returns `None` for coordinates outside the grid, so renderers can probe
    /// speculatively.
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

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether every cell of `piece` is inside the grid and empty
    pub fn can_place(&self, piece: &Tetromino) -> bool {
        piece.cells().all(|(x, y)| self.is_valid(x, y))
    }

    /// Write the piece's kind into every cell it occupies.
    ///
    /// Callers must check [`Board::can_place`] first; overlapping cells are
    /// overwritten and cells outside the grid are skipped.
    pub fn place(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Indices of the currently full rows, top to bottom
    pub fn full_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned top to bottom. A removed row is replaced by shifting
    /// everything above it down one row and emptying row 0; the scan index is
    /// not advanced after a removal.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Remove row `y`, shift the rows above it down and empty row 0
    fn clear_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// True when anything is locked into the top two rows
    ///
    /// The controller ends a game when a spawned piece does not fit, which
    /// implies this; this check alone does not decide game over.
    pub fn is_game_over(&self) -> bool {
        let end = TOP_OUT_ROWS * BOARD_WIDTH as usize;
        self.cells[..end].iter().any(|cell| cell.is_some())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Row `y` as a slice, if in range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Fill a row with `kind`, leaving the given columns empty
    pub fn fill_row_except(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Write the grid as snapshot codes (see [`crate::types::cell_code`])
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            for (x, code) in row.iter_mut().enumerate() {
                *code = cell_code(self.cells[start + x]);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
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
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_can_place_rejects_walls_and_floor() {
        let board = Board::new();
        let mut piece = Tetromino::new(PieceKind::O);
        assert!(board.can_place(&piece));

        // O occupies mask columns 1-2, so x = -1 is still legal, x = -2 is not.
        piece.x = -1;
        assert!(board.can_place(&piece));
        piece.x = -2;
        assert!(!board.can_place(&piece));

        piece.x = 3;
        piece.y = 18;
        assert!(board.can_place(&piece));
        piece.y = 19;
        assert!(!board.can_place(&piece));
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let mut board = Board::new();
        board.set(4, 1, Some(PieceKind::Z));
        let piece = Tetromino::new(PieceKind::I);
        assert!(!board.can_place(&piece));
    }

    #[test]
    fn test_place_writes_kind() {
        let mut board = Board::new();
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 0,
            y: 17,
        };
        board.place(&piece);

        assert_eq!(board.get(0, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(1, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(1, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_clear_lines_non_contiguous() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::I, &[]);
        board.fill_row_except(18, PieceKind::J, &[4]);
        board.fill_row_except(17, PieceKind::L, &[]);
        board.set(0, 16, Some(PieceKind::O));

        assert_eq!(board.full_rows().as_slice(), &[17, 19]);
        assert_eq!(board.clear_lines(), 2);

        // The partial row and the lone block drop by exactly the rows cleared below them.
        assert_eq!(board.get(4, 19), Some(None));
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
        assert_eq!(board.get(0, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.filled_count(), 10);
    }

    #[test]
    fn test_clear_lines_four_at_once() {
        let mut board = Board::new();
        for y in 16..20 {
            board.fill_row_except(y, PieceKind::I, &[]);
        }
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.to_cells().len(), BOARD_HEIGHT as usize);
    }

    #[test]
    fn test_is_game_over_checks_top_two_rows() {
        let mut board = Board::new();
        board.set(9, 2, Some(PieceKind::S));
        assert!(!board.is_game_over());

        board.set(9, 1, Some(PieceKind::S));
        assert!(board.is_game_over());

        board.clear();
        board.set(0, 0, Some(PieceKind::S));
        assert!(board.is_game_over());
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(2, 19, Some(PieceKind::I));
        board.set(3, 0, Some(PieceKind::L));

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][2], 1);
        assert_eq!(grid[0][3], 7);
        assert_eq!(grid.iter().flatten().filter(|&&c| c != 0).count(), 2);
    }
}
