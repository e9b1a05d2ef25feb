use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

pub use board::*;
pub use piece::*;
pub use view::*;

mod board;
mod piece;
mod view;

pub const DEFAULT_TETRIS_TICK_MS: u32 = 1000;

/// Points per cleared row, no combo multiplier.
pub const LINE_SCORE: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TetrisConfig {
    pub width: Coord,
    pub height: Coord,
    /// Anchor of every freshly spawned piece.
    pub spawn: Offset,
    /// Gravity interval.
    pub tick_ms: u32,
}

impl TetrisConfig {
    pub fn validated(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::EmptyGrid);
        }
        let (x, y) = self.spawn;
        if x < 0 || x >= i16::from(self.width) || y >= i16::from(self.height) {
            return Err(GameError::InvalidCoords);
        }
        Ok(self)
    }
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            spawn: (3, 0),
            tick_ms: DEFAULT_TETRIS_TICK_MS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TetrisStep {
    /// Paused or already over.
    Idle,
    Moved,
    Locked { lines: u8, new_high_score: bool },
    /// The piece locked and the next one had no room to spawn.
    GameOver { new_high_score: bool },
}

impl TetrisStep {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub const fn new_high_score(self) -> bool {
        match self {
            Self::Locked { new_high_score, .. } | Self::GameOver { new_high_score } => {
                new_high_score
            }
            Self::Idle | Self::Moved => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// Falling-block game: one active piece, one queued piece, a well of locked cells.
#[derive(Clone, Debug)]
pub struct TetrisEngine {
    config: TetrisConfig,
    board: Board,
    active: ActivePiece,
    next: Tetromino,
    score: u32,
    high_score: u32,
    lines_cleared: u32,
    run_state: RunState,
    rng: SmallRng,
}

impl TetrisEngine {
    pub fn new(config: TetrisConfig, seed: u64, high_score: u32) -> Result<Self> {
        let config = config.validated()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let first = Tetromino::random(&mut rng);
        let next = Tetromino::random(&mut rng);
        let board = Board::new(config.width, config.height);
        Ok(Self::assemble(config, board, first, next, high_score, rng))
    }

    /// Starts from an existing well with `active` spawning at the configured anchor.
    pub fn from_parts(
        config: TetrisConfig,
        board: Board,
        active: Tetromino,
        next: Tetromino,
        seed: u64,
    ) -> Result<Self> {
        let config = config.validated()?;
        if board.size() != (config.width, config.height) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::assemble(
            config,
            board,
            active,
            next,
            0,
            SmallRng::seed_from_u64(seed),
        ))
    }

    fn assemble(
        config: TetrisConfig,
        board: Board,
        active: Tetromino,
        next: Tetromino,
        high_score: u32,
        rng: SmallRng,
    ) -> Self {
        let active = ActivePiece::spawn(active, config.spawn);
        let run_state = if board.fits(&active) {
            RunState::Running
        } else {
            log::debug!("no room to spawn {:?}", active.kind);
            RunState::Over
        };
        Self {
            config,
            board,
            active,
            next,
            score: 0,
            high_score,
            lines_cleared: 0,
            run_state,
            rng,
        }
    }

    pub fn config(&self) -> TetrisConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Replaces the active piece with `candidate` when it fits.
    fn try_place(&mut self, candidate: ActivePiece) -> MoveOutcome {
        if !self.run_state.is_running() || !self.board.fits(&candidate) {
            return MoveOutcome::Blocked;
        }
        self.active = candidate;
        MoveOutcome::Moved
    }

    pub fn move_horizontal(&mut self, dx: i16) -> MoveOutcome {
        self.try_place(self.active.shifted((dx, 0)))
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.move_horizontal(1)
    }

    /// Clockwise turn in place, no wall kicks.
    pub fn rotate(&mut self) -> MoveOutcome {
        self.try_place(self.active.rotated())
    }

    /// Moves the piece down one row, locking it when it cannot go further.
    pub fn soft_drop(&mut self) -> TetrisStep {
        if !self.run_state.is_running() {
            return TetrisStep::Idle;
        }

        match self.try_place(self.active.shifted((0, 1))) {
            MoveOutcome::Moved => TetrisStep::Moved,
            MoveOutcome::Blocked => self.lock_active(),
        }
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        log::debug!("tetris {:?}", self.run_state);
        self.run_state
    }

    fn lock_active(&mut self) -> TetrisStep {
        self.board.lock(&self.active);
        log::debug!("locked {:?} at {:?}", self.active.kind, self.active.position);

        let lines = self.board.clear_lines();
        let mut new_high_score = false;
        if lines > 0 {
            self.lines_cleared += u32::from(lines);
            self.score += LINE_SCORE * u32::from(lines);
            log::debug!("cleared {} lines, score {}", lines, self.score);
            if self.score > self.high_score {
                self.high_score = self.score;
                new_high_score = true;
            }
        }

        let kind = self.next;
        self.next = Tetromino::random(&mut self.rng);
        self.active = ActivePiece::spawn(kind, self.config.spawn);

        if self.board.fits(&self.active) {
            TetrisStep::Locked {
                lines,
                new_high_score,
            }
        } else {
            self.run_state = RunState::Over;
            log::debug!("tetris over with score {}", self.score);
            TetrisStep::GameOver { new_high_score }
        }
    }
}

impl Simulation for TetrisEngine {
    type Step = TetrisStep;

    /// Gravity.
    fn step(&mut self) -> TetrisStep {
        self.soft_drop()
    }

    fn reset(&mut self) {
        let first = Tetromino::random(&mut self.rng);
        let next = Tetromino::random(&mut self.rng);
        let board = Board::new(self.config.width, self.config.height);
        *self = Self::assemble(
            self.config,
            board,
            first,
            next,
            self.high_score,
            self.rng.clone(),
        );
        log::debug!("tetris reset");
    }

    fn is_over(&self) -> bool {
        self.run_state.is_over()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms.into())
    }
}
