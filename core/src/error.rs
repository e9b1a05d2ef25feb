use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Two pieces of state occupy the same cell")]
    OverlappingCells,
    #[error("Grid must have at least one cell")]
    EmptyGrid,
}

pub type Result<T> = core::result::Result<T, GameError>;
