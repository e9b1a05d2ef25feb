use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

const DIGITS: [&str; 9] = ["", "1", "2", "3", "4", "5", "6", "7", "8"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
}

impl TileView {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Hidden => "closed",
            Self::Flagged => "closed flag",
            Self::Revealed(0) => "open empty",
            Self::Revealed(1) => "open num-1",
            Self::Revealed(2) => "open num-2",
            Self::Revealed(3) => "open num-3",
            Self::Revealed(4) => "open num-4",
            Self::Revealed(5) => "open num-5",
            Self::Revealed(6) => "open num-6",
            Self::Revealed(7) => "open num-7",
            Self::Revealed(_) => "open num-8",
            Self::Mine => "open mine",
            Self::TriggeredMine => "open mine exploded",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Flagged => "🚩",
            Self::Revealed(count) => DIGITS.get(usize::from(count)).copied().unwrap_or(""),
            Self::Mine | Self::TriggeredMine => "💣",
        }
    }
}

/// Read-only projection of a [`MinesweeperEngine`] for a render surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesweeperView {
    pub size: Coord2,
    pub tiles: Array2<TileView>,
    pub flags_left: CellCount,
    pub elapsed_secs: u32,
    pub state: MinesweeperState,
}

impl MinesweeperView {
    pub fn from_engine(engine: &MinesweeperEngine) -> Self {
        let size = engine.size();
        let mut tiles = Array2::from_elem(size.to_nd_index(), TileView::Hidden);

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                tiles[coords.to_nd_index()] = match engine.tile_at(coords) {
                    Tile::Hidden => TileView::Hidden,
                    Tile::Flagged => TileView::Flagged,
                    Tile::Revealed(count) => TileView::Revealed(count),
                    Tile::Mine if engine.triggered_mine() == Some(coords) => {
                        TileView::TriggeredMine
                    }
                    Tile::Mine => TileView::Mine,
                };
            }
        }

        Self {
            size,
            tiles,
            flags_left: engine.flags_left(),
            elapsed_secs: engine.elapsed_secs(),
            state: engine.state(),
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> TileView {
        self.tiles[coords.to_nd_index()]
    }

    pub fn overlay(&self) -> Option<&'static str> {
        match self.state {
            MinesweeperState::Won => Some("You won!"),
            MinesweeperState::Lost => Some("Game over!"),
            MinesweeperState::Unstarted | MinesweeperState::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_maps_triggered_mine_and_flags() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (0, 1)]).unwrap();
        let mut engine = MinesweeperEngine::with_layout(layout, 0);

        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(engine.toggle_flag((1, 0)), FlagOutcome::Changed);
        let view = MinesweeperView::from_engine(&engine);

        assert_eq!(view.tile_at((1, 1)), TileView::Revealed(2));
        assert_eq!(view.tile_at((1, 0)), TileView::Flagged);
        assert_eq!(view.flags_left, 1);
        assert_eq!(view.overlay(), None);

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::HitMine);
        let view = MinesweeperView::from_engine(&engine);

        assert_eq!(view.tile_at((0, 0)), TileView::TriggeredMine);
        assert_eq!(view.tile_at((0, 1)), TileView::Mine);
        assert_eq!(view.overlay(), Some("Game over!"));
    }

    #[test]
    fn display_hints() {
        assert_eq!(TileView::Revealed(3).class_name(), "open num-3");
        assert_eq!(TileView::Revealed(3).glyph(), "3");
        assert_eq!(TileView::Revealed(0).glyph(), "");
        assert_eq!(TileView::Flagged.glyph(), "🚩");
        assert_eq!(TileView::TriggeredMine.glyph(), "💣");
    }
}
