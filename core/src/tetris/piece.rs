use rand::Rng;
use serde::{Deserialize, Serialize};

/// Side of the largest shape matrix (the `I` piece).
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a cell inside the board, may point above or left of it while validating.
pub type Offset = (i16, i16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Uniform draw over the seven kinds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Non-zero identifier stored for locked cells.
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::I => "piece-i",
            Self::J => "piece-j",
            Self::L => "piece-l",
            Self::O => "piece-o",
            Self::S => "piece-s",
            Self::T => "piece-t",
            Self::Z => "piece-z",
        }
    }

    /// Spawn orientation.
    pub fn shape(self) -> Shape {
        match self {
            Self::I => Shape::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
            Self::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            Self::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
            Self::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            Self::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            Self::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            Self::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        }
    }
}

/// Square boolean matrix of a piece in its current orientation, indexed `[row][col]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    dim: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                cells[r][c] = value != 0;
            }
        }
        Self {
            dim: rows.len() as u8,
            cells,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim.into()
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.dim() && col < self.dim() && self.cells[row][col]
    }

    /// Quarter turn clockwise: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.dim();
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - c][r];
            }
        }
        Self {
            dim: self.dim,
            cells,
        }
    }

    /// Filled cells as `(dx, dy)` offsets from the top-left corner.
    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        let n = self.dim();
        (0..n).flat_map(move |r| {
            (0..n)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i16, r as i16))
        })
    }
}

/// The falling piece: kind, top-left anchor and current orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: Tetromino,
    pub position: Offset,
    pub shape: Shape,
}

impl ActivePiece {
    pub fn spawn(kind: Tetromino, position: Offset) -> Self {
        Self {
            kind,
            position,
            shape: kind.shape(),
        }
    }

    pub fn shifted(&self, (dx, dy): Offset) -> Self {
        let (x, y) = self.position;
        Self {
            position: (x + dx, y + dy),
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Absolute board cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = Offset> + '_ {
        let (x, y) = self.position;
        self.shape.offsets().map(move |(dx, dy)| (x + dx, y + dy))
    }
}
