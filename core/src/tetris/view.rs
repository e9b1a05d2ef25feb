use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TetrisCell {
    #[default]
    Empty,
    Locked(Tetromino),
    /// Part of the falling piece.
    Active(Tetromino),
}

impl TetrisCell {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Locked(kind) | Self::Active(kind) => kind.class_name(),
        }
    }

    pub const fn kind(self) -> Option<Tetromino> {
        match self {
            Self::Empty => None,
            Self::Locked(kind) | Self::Active(kind) => Some(kind),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TetrisView {
    pub size: Coord2,
    pub cells: Array2<TetrisCell>,
    pub next: Tetromino,
    pub next_shape: Shape,
    pub score: u32,
    pub high_score: u32,
    pub run_state: RunState,
}

impl TetrisView {
    pub fn from_engine(engine: &TetrisEngine) -> Self {
        let board = engine.board();
        let size = board.size();
        let mut cells: Array2<TetrisCell> = Array2::default(size.to_nd_index());

        for (coords, cell) in board.iter() {
            if let Some(kind) = cell {
                cells[coords.to_nd_index()] = TetrisCell::Locked(kind);
            }
        }

        let active = engine.active();
        for (x, y) in active.cells() {
            // rows above the visible board are not drawn
            let (Ok(x), Ok(y)) = (Coord::try_from(x), Coord::try_from(y)) else {
                continue;
            };
            if x < size.0 && y < size.1 {
                cells[(x, y).to_nd_index()] = TetrisCell::Active(active.kind);
            }
        }

        Self {
            size,
            cells,
            next: engine.next(),
            next_shape: engine.next().shape(),
            score: engine.score(),
            high_score: engine.high_score(),
            run_state: engine.run_state(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> TetrisCell {
        self.cells[coords.to_nd_index()]
    }

    pub fn overlay(&self) -> Option<&'static str> {
        match self.run_state {
            RunState::Running => None,
            RunState::Paused => Some("Paused"),
            RunState::Over => Some("Game over!"),
        }
    }
}
