//! Pieces module - tetromino shape matrices and rotation
//!
//! A shape is a small square or rectangular matrix (at most 4x4) whose nonzero
//! cells hold the piece's color id. Rotation produces a new matrix; shapes are
//! `Copy`, so the current piece and any search candidates never share storage.

use serde::Serialize;

use crate::types::{PieceKind, SPAWN_COLUMN};

/// Largest matrix side of any shape (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Shape matrix of a piece. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    rows: u8,
    cols: u8,
}

impl Shape {
    /// Build a shape from rows of color ids. Rows beyond 4 and columns beyond
    /// 4 are ignored; the width is taken from the first row.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let n_rows = rows.len().min(MAX_SHAPE_SIZE);
        let n_cols = rows.first().map_or(0, |r| r.len().min(MAX_SHAPE_SIZE));
        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().take(n_rows).enumerate() {
            for (x, &v) in row.iter().take(n_cols).enumerate() {
                cells[y][x] = v;
            }
        }
        Self {
            cells,
            rows: n_rows as u8,
            cols: n_cols as u8,
        }
    }

    /// Spawn orientation of a piece kind.
    pub fn spawn(kind: PieceKind) -> Self {
        let c = kind.color_id();
        match kind {
            PieceKind::I => Self::from_rows(&[
                &[0, 0, 0, 0],
                &[c, c, c, c],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            PieceKind::J => Self::from_rows(&[&[c, 0, 0], &[c, c, c], &[0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, c], &[c, c, c], &[0, 0, 0]]),
            PieceKind::O => Self::from_rows(&[&[c, c], &[c, c]]),
            PieceKind::S => Self::from_rows(&[&[0, c, c], &[c, c, 0], &[0, 0, 0]]),
            PieceKind::T => Self::from_rows(&[&[0, c, 0], &[c, c, c], &[0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[&[c, c, 0], &[0, c, c], &[0, 0, 0]]),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell value at (row, col), 0 outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.rows as usize && col < self.cols as usize {
            self.cells[row][col]
        } else {
            0
        }
    }

    /// 90° clockwise rotation: an R×C matrix becomes C×R with
    /// `new[x][R - 1 - y] = old[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..rows {
            for x in 0..cols {
                cells[x][rows - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            cells,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Offsets `(dx, dy)` of every nonzero cell, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |y| {
            (0..self.cols as usize)
                .filter(move |&x| self.cells[y][x] != 0)
                .map(move |x| (x as i8, y as i8))
        })
    }
}

/// A piece on (or above) the board: shape, color and anchor of the shape's
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position (centered, row 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
            x: SPAWN_COLUMN,
            y: 0,
        }
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Absolute board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy shifted by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy rotated 90° clockwise about the unchanged anchor.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.shape, Shape::spawn(PieceKind::T));
    }

    #[test]
    fn test_every_shape_has_four_cells_in_its_color() {
        for kind in PieceKind::ALL {
            let shape = Shape::spawn(kind);
            let filled: Vec<_> = shape.filled().collect();
            assert_eq!(filled.len(), 4, "{:?}", kind);
            for (dx, dy) in filled {
                assert_eq!(shape.get(dy as usize, dx as usize), kind.color_id());
            }
        }
    }

    #[test]
    fn test_rotate_rectangular_matrix_swaps_dimensions() {
        let shape = Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]);
        let r = shape.rotated_cw();
        assert_eq!((r.rows(), r.cols()), (3, 2));
        // new[x][R-1-y] = old[y][x]
        assert_eq!(r.get(0, 0), 1);
        assert_eq!(r.get(0, 1), 1);
        assert_eq!(r.get(1, 0), 0);
        assert_eq!(r.get(1, 1), 1);
        assert_eq!(r.get(2, 0), 0);
        assert_eq!(r.get(2, 1), 1);
        assert_eq!(r.rotated_cw().rotated_cw().rotated_cw(), shape);
    }

    #[test]
    fn test_i_piece_rotates_to_vertical_column_two() {
        let vertical = Shape::spawn(PieceKind::I).rotated_cw();
        let filled: Vec<_> = vertical.filled().collect();
        assert_eq!(filled, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = Shape::spawn(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_tetromino_cells_are_absolute() {
        let piece = Tetromino::new(PieceKind::O).shifted(2, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 5), (6, 5), (5, 6), (6, 6)]);
    }
}
