//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind (and
//! therefore the color id) of the piece that locked there.
//! Uses a flat array for cache locality and zero-allocation copies; the autoplay
//! search clones boards freely.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::piece::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Rows removed by a single [`Board::clear_full_rows`] call, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
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
        Some((y as usize) * WIDTH + (x as usize))
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

    #[inline(always)]
    fn filled(&self, x: usize, y: usize) -> bool {
        self.cells[y * WIDTH + x].is_some()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Number of rows that are currently full.
    pub fn full_row_count(&self) -> u32 {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).count() as u32
    }

    /// Remove every full row, shifting the rows above down and inserting empty
    /// rows at the top. Returns the original indices of the removed rows,
    /// bottom to top.
    ///
    /// Two-pointer compaction: remaining rows keep their relative order, and
    /// contiguous or scattered full rows are removed in the same pass.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared_rows
    }

    /// Write the piece's color into every board cell covered by a nonzero shape
    /// cell. Cells above the visible board (negative row) are skipped; cells
    /// outside the board horizontally or below it are never written.
    pub fn lock(&mut self, piece: &Tetromino) {
        let kind = piece.kind;
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Column height: `BOARD_HEIGHT - first occupied row`, or 0 for an empty column.
    pub fn column_height(&self, x: usize) -> u32 {
        if x >= WIDTH {
            return 0;
        }
        (0..HEIGHT)
            .find(|&y| self.filled(x, y))
            .map_or(0, |y| (HEIGHT - y) as u32)
    }

    /// Heights of every column, left to right.
    pub fn column_heights(&self) -> [u32; WIDTH] {
        let mut heights = [0u32; WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            *h = self.column_height(x);
        }
        heights
    }

    /// Sum of all column heights.
    pub fn aggregate_height(&self) -> u32 {
        self.column_heights().iter().sum()
    }

    /// Empty cells with at least one occupied cell above them in the same column.
    pub fn count_holes(&self) -> u32 {
        let mut holes = 0;
        for x in 0..WIDTH {
            let mut covered = false;
            for y in 0..HEIGHT {
                if self.filled(x, y) {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Sum of absolute height differences between adjacent columns.
    pub fn bumpiness(&self) -> u32 {
        let heights = self.column_heights();
        heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
    }

    /// Occupied/empty flips scanning each row left to right.
    ///
    /// Both side walls count as occupied, so an empty row contributes 2 and a
    /// gap against a wall is counted.
    pub fn row_transitions(&self) -> u32 {
        let mut transitions = 0;
        for y in 0..HEIGHT {
            let mut prev = true;
            for x in 0..WIDTH {
                let cur = self.filled(x, y);
                if cur != prev {
                    transitions += 1;
                }
                prev = cur;
            }
            if !prev {
                transitions += 1;
            }
        }
        transitions
    }

    /// Occupied/empty flips scanning each column top to bottom.
    ///
    /// The space above row 0 counts as empty and the floor as occupied.
    pub fn col_transitions(&self) -> u32 {
        let mut transitions = 0;
        for x in 0..WIDTH {
            let mut prev = false;
            for y in 0..HEIGHT {
                let cur = self.filled(x, y);
                if cur != prev {
                    transitions += 1;
                }
                prev = cur;
            }
            if !prev {
                transitions += 1;
            }
        }
        transitions
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < HEIGHT).then(|| &self.cells[y * WIDTH..(y + 1) * WIDTH])
    }

    /// Write the board as color ids (0 = empty) into a row-major grid.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map_or(0, PieceKind::color_id);
            }
        }
    }

    /// Build a board from a color id grid (0 = empty, unknown ids are empty).
    pub fn from_u8_grid(grid: &[[u8; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = PieceKind::from_color_id(v);
            }
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
