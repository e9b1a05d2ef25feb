use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

pub use view::*;

mod view;

pub const DEFAULT_SNAKE_TICK_MS: u32 = 150;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    /// Side of the square, wrapping grid.
    pub grid_size: Coord,
    pub start: Coord2,
    pub direction: Direction,
    pub tick_ms: u32,
}

impl SnakeConfig {
    pub fn validated(self) -> Result<Self> {
        if self.grid_size == 0 {
            return Err(GameError::EmptyGrid);
        }
        if !self.contains(self.start) {
            return Err(GameError::InvalidCoords);
        }
        Ok(self)
    }

    pub const fn grid(&self) -> Coord2 {
        (self.grid_size, self.grid_size)
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        x < self.grid_size && y < self.grid_size
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            start: (10, 10),
            direction: Direction::Right,
            tick_ms: DEFAULT_SNAKE_TICK_MS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SnakeStep {
    /// Paused or already over, nothing moved.
    Idle,
    Moved,
    Ate,
    GameOver { new_high_score: bool },
}

impl SnakeStep {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DirectionOutcome {
    Buffered,
    Rejected,
}

/// Snake on a toroidal grid, one cell per tick.
#[derive(Clone, Debug)]
pub struct SnakeEngine {
    config: SnakeConfig,
    /// Head first.
    body: VecDeque<Coord2>,
    food: Option<Coord2>,
    direction: Direction,
    next_direction: Direction,
    score: u32,
    high_score: u32,
    run_state: RunState,
    rng: SmallRng,
}

impl SnakeEngine {
    /// Fresh game with a single segment at the configured start and random food.
    pub fn new(config: SnakeConfig, seed: u64, high_score: u32) -> Result<Self> {
        let config = config.validated()?;
        let mut engine = Self {
            config,
            body: VecDeque::from([config.start]),
            food: None,
            direction: config.direction,
            next_direction: config.direction,
            score: 0,
            high_score,
            run_state: RunState::Running,
            rng: SmallRng::seed_from_u64(seed),
        };
        engine.food = engine.spawn_food();
        Ok(engine)
    }

    /// Builds a game in progress from a head-first body and a food position.
    pub fn from_parts(
        config: SnakeConfig,
        body: &[Coord2],
        food: Coord2,
        direction: Direction,
        seed: u64,
    ) -> Result<Self> {
        let config = config.validated()?;
        if body.is_empty() {
            return Err(GameError::EmptyGrid);
        }
        if !body.iter().chain([&food]).all(|&coords| config.contains(coords)) {
            return Err(GameError::InvalidCoords);
        }

        let mut occupied: Array2<bool> = Array2::default(config.grid().to_nd_index());
        for &segment in body {
            if occupied[segment.to_nd_index()] {
                return Err(GameError::OverlappingCells);
            }
            occupied[segment.to_nd_index()] = true;
        }
        if occupied[food.to_nd_index()] {
            return Err(GameError::OverlappingCells);
        }

        Ok(Self {
            config,
            body: body.iter().copied().collect(),
            food: Some(food),
            direction,
            next_direction: direction,
            score: body.len() as u32 - 1,
            high_score: 0,
            run_state: RunState::Running,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> SnakeConfig {
        self.config
    }

    pub fn body(&self) -> &VecDeque<Coord2> {
        &self.body
    }

    pub fn head(&self) -> Coord2 {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Option<Coord2> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Buffers a heading for the next tick, refusing a turn straight back into the body.
    pub fn set_direction(&mut self, direction: Direction) -> DirectionOutcome {
        if !self.run_state.is_running() || direction == self.direction.opposite() {
            log::trace!("rejected turn {:?} while heading {:?}", direction, self.direction);
            return DirectionOutcome::Rejected;
        }
        self.next_direction = direction;
        DirectionOutcome::Buffered
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        log::debug!("snake {:?}", self.run_state);
        self.run_state
    }

    fn spawn_food(&mut self) -> Option<Coord2> {
        let mut occupied: Array2<bool> = Array2::default(self.config.grid().to_nd_index());
        for segment in &self.body {
            occupied[segment.to_nd_index()] = true;
        }

        let free: Vec<Coord2> = occupied
            .indexed_iter()
            .filter(|&(_, &taken)| !taken)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect();

        let food = free.choose(&mut self.rng).copied();
        log::trace!("food at {:?}", food);
        food
    }

    fn game_over(&mut self) -> SnakeStep {
        self.run_state = RunState::Over;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        log::debug!(
            "snake over with score {} (new high score: {})",
            self.score,
            new_high_score
        );
        SnakeStep::GameOver { new_high_score }
    }
}

impl Simulation for SnakeEngine {
    type Step = SnakeStep;

    fn step(&mut self) -> SnakeStep {
        if !self.run_state.is_running() {
            return SnakeStep::Idle;
        }

        self.direction = self.next_direction;
        let head = self.direction.step_wrapping(self.head(), self.config.grid());

        if self.body.contains(&head) {
            return self.game_over();
        }

        self.body.push_front(head);

        if self.food == Some(head) {
            self.score += 1;
            self.food = self.spawn_food();
            if self.food.is_none() {
                log::warn!("no room left for food");
                return self.game_over();
            }
            SnakeStep::Ate
        } else {
            self.body.pop_back();
            SnakeStep::Moved
        }
    }

    fn reset(&mut self) {
        let config = self.config;
        self.body = VecDeque::from([config.start]);
        self.direction = config.direction;
        self.next_direction = config.direction;
        self.score = 0;
        self.run_state = RunState::Running;
        self.food = self.spawn_food();
        log::debug!("snake reset");
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
