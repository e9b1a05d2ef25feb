use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeCell {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

impl SnakeCell {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Head => "snake head",
            Self::Body => "snake",
            Self::Food => "food",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    pub size: Coord2,
    pub cells: Array2<SnakeCell>,
    pub score: u32,
    pub high_score: u32,
    pub run_state: RunState,
}

impl SnakeView {
    pub fn from_engine(engine: &SnakeEngine) -> Self {
        let size = engine.config().grid();
        let mut cells: Array2<SnakeCell> = Array2::default(size.to_nd_index());

        if let Some(food) = engine.food() {
            cells[food.to_nd_index()] = SnakeCell::Food;
        }
        for (i, segment) in engine.body().iter().enumerate() {
            cells[segment.to_nd_index()] = if i == 0 {
                SnakeCell::Head
            } else {
                SnakeCell::Body
            };
        }

        Self {
            size,
            cells,
            score: engine.score(),
            high_score: engine.high_score(),
            run_state: engine.run_state(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> SnakeCell {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_marks_head_body_and_food() {
        let engine = SnakeEngine::from_parts(
            SnakeConfig::default(),
            &[(3, 3), (2, 3)],
            (7, 1),
            Direction::Right,
            0,
        )
        .unwrap();

        let view = SnakeView::from_engine(&engine);

        assert_eq!(view.cell_at((3, 3)), SnakeCell::Head);
        assert_eq!(view.cell_at((2, 3)), SnakeCell::Body);
        assert_eq!(view.cell_at((7, 1)), SnakeCell::Food);
        assert_eq!(view.cell_at((0, 0)), SnakeCell::Empty);
        assert_eq!(view.cells.iter().filter(|c| **c != SnakeCell::Empty).count(), 3);
        assert_eq!(view.score, 1);
        assert_eq!(view.overlay(), None);
    }

    #[test]
    fn overlay_follows_run_state() {
        let mut engine = SnakeEngine::new(SnakeConfig::default(), 3, 0).unwrap();
        engine.toggle_pause();

        assert_eq!(SnakeView::from_engine(&engine).overlay(), Some("Paused"));
    }
}
