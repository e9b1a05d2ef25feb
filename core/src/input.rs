use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeIntent {
    SetDirection(Direction),
    TogglePause,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TetrisIntent {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    TogglePause,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MinesweeperIntent {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

fn arrow_direction(key: &str) -> Option<Direction> {
    [
        ("ArrowUp", Direction::Up),
        ("ArrowDown", Direction::Down),
        ("ArrowLeft", Direction::Left),
        ("ArrowRight", Direction::Right),
    ]
    .into_iter()
    .find(|(name, _)| key.eq_ignore_ascii_case(name))
    .map(|(_, direction)| direction)
}

/// Maps a `KeyboardEvent.key` value to a snake intent.
pub fn snake_intent_for_key(key: &str) -> Option<SnakeIntent> {
    if key == " " {
        return Some(SnakeIntent::TogglePause);
    }
    arrow_direction(key).map(SnakeIntent::SetDirection)
}

/// Maps a `KeyboardEvent.key` value to a tetris intent.
pub fn tetris_intent_for_key(key: &str) -> Option<TetrisIntent> {
    if key == " " {
        return Some(TetrisIntent::TogglePause);
    }
    arrow_direction(key).map(|direction| match direction {
        Direction::Left => TetrisIntent::MoveLeft,
        Direction::Right => TetrisIntent::MoveRight,
        Direction::Up => TetrisIntent::Rotate,
        Direction::Down => TetrisIntent::SoftDrop,
    })
}

impl SnakeEngine {
    /// Returns whether the intent changed anything worth redrawing.
    pub fn apply(&mut self, intent: SnakeIntent) -> bool {
        match intent {
            SnakeIntent::SetDirection(direction) => {
                self.set_direction(direction);
                false
            }
            SnakeIntent::TogglePause => {
                let before = self.run_state();
                self.toggle_pause() != before
            }
        }
    }
}

impl TetrisEngine {
    /// Applies one intent, reporting it as a tick-sized step.
    pub fn apply(&mut self, intent: TetrisIntent) -> TetrisStep {
        let moved = |outcome: MoveOutcome| {
            if outcome.has_update() {
                TetrisStep::Moved
            } else {
                TetrisStep::Idle
            }
        };
        match intent {
            TetrisIntent::MoveLeft => moved(self.move_left()),
            TetrisIntent::MoveRight => moved(self.move_right()),
            TetrisIntent::Rotate => moved(self.rotate()),
            TetrisIntent::SoftDrop => self.soft_drop(),
            TetrisIntent::TogglePause => {
                let before = self.run_state();
                if self.toggle_pause() != before {
                    TetrisStep::Moved
                } else {
                    TetrisStep::Idle
                }
            }
        }
    }
}

impl MinesweeperEngine {
    pub fn apply(&mut self, intent: MinesweeperIntent) -> bool {
        match intent {
            MinesweeperIntent::Reveal(coords) => self.reveal(coords).has_update(),
            MinesweeperIntent::ToggleFlag(coords) => self.toggle_flag(coords).has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_keys() {
        assert_eq!(
            snake_intent_for_key("ArrowUp"),
            Some(SnakeIntent::SetDirection(Direction::Up))
        );
        assert_eq!(
            snake_intent_for_key("arrowleft"),
            Some(SnakeIntent::SetDirection(Direction::Left))
        );
        assert_eq!(snake_intent_for_key(" "), Some(SnakeIntent::TogglePause));
        assert_eq!(snake_intent_for_key("w"), None);
        assert_eq!(snake_intent_for_key("Enter"), None);
    }

    #[test]
    fn tetris_keys() {
        assert_eq!(tetris_intent_for_key("ArrowLeft"), Some(TetrisIntent::MoveLeft));
        assert_eq!(tetris_intent_for_key("ARROWRIGHT"), Some(TetrisIntent::MoveRight));
        assert_eq!(tetris_intent_for_key("ArrowUp"), Some(TetrisIntent::Rotate));
        assert_eq!(tetris_intent_for_key("ArrowDown"), Some(TetrisIntent::SoftDrop));
        assert_eq!(tetris_intent_for_key(" "), Some(TetrisIntent::TogglePause));
        assert_eq!(tetris_intent_for_key("Space"), None);
    }

    #[test]
    fn snake_apply_buffers_turns_and_pauses() {
        let mut engine = SnakeEngine::from_parts(
            SnakeConfig::default(),
            &[(10, 10), (9, 10)],
            (0, 0),
            Direction::Right,
            0,
        )
        .unwrap();

        assert!(!engine.apply(SnakeIntent::SetDirection(Direction::Left)));
        assert_eq!(engine.next_direction(), Direction::Right);
        engine.apply(SnakeIntent::SetDirection(Direction::Down));
        assert_eq!(engine.next_direction(), Direction::Down);

        assert!(engine.apply(SnakeIntent::TogglePause));
        assert_eq!(engine.run_state(), RunState::Paused);
    }

    #[test]
    fn tetris_apply_reports_movement() {
        let mut engine = TetrisEngine::from_parts(
            TetrisConfig::default(),
            Board::new(10, 20),
            Tetromino::O,
            Tetromino::O,
            0,
        )
        .unwrap();

        assert_eq!(engine.apply(TetrisIntent::MoveLeft), TetrisStep::Moved);
        assert_eq!(engine.apply(TetrisIntent::SoftDrop), TetrisStep::Moved);
        assert_eq!(engine.active().position, (2, 1));
        assert_eq!(engine.apply(TetrisIntent::TogglePause), TetrisStep::Moved);
        assert_eq!(engine.apply(TetrisIntent::MoveLeft), TetrisStep::Idle);
    }

    #[test]
    fn minesweeper_apply_routes_coords() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let mut engine = MinesweeperEngine::with_layout(layout, 0);

        assert!(engine.apply(MinesweeperIntent::ToggleFlag((2, 2))));
        assert_eq!(engine.tile_at((2, 2)), Tile::Flagged);
        assert!(engine.apply(MinesweeperIntent::Reveal((1, 1))));
        assert_eq!(engine.tile_at((1, 1)), Tile::Revealed(1));
        assert!(!engine.apply(MinesweeperIntent::Reveal((1, 1))));
    }
}
