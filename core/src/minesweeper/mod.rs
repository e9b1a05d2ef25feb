use alloc::vec::Vec;
use core::time::Duration;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

pub use layout::*;
pub use view::*;

mod layout;
mod view;

pub const DEFAULT_CLOCK_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesweeperConfig {
    pub size: Coord2,
    pub mines: CellCount,
    /// Interval of the elapsed-time clock.
    pub clock_ms: u32,
}

impl MinesweeperConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            clock_ms: DEFAULT_CLOCK_MS,
        }
    }

    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validated(self) -> Result<Self> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyGrid);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10)
    }
}

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Hidden,
    Flagged,
    /// Safe cell with its adjacent mine count.
    Revealed(u8),
    /// Mine uncovered when the game was lost.
    Mine,
}

impl Tile {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Valid transitions:
/// - Unstarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperState {
    #[default]
    Unstarted,
    InProgress,
    Won,
    Lost,
}

impl MinesweeperState {
    pub const fn is_unstarted(self) -> bool {
        matches!(self, Self::Unstarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClockOutcome {
    Idle,
    Ticked,
}

/// Minesweeper game from the blank board to a win or a loss.
///
/// Mines are placed on the first reveal so that the revealed cell and its
/// neighbors are always safe.
#[derive(Clone, Debug)]
pub struct MinesweeperEngine {
    config: MinesweeperConfig,
    layout: Option<MineLayout>,
    board: Array2<Tile>,
    revealed_count: CellCount,
    flags_left: CellCount,
    elapsed_secs: u32,
    state: MinesweeperState,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl MinesweeperEngine {
    pub fn new(config: MinesweeperConfig, seed: u64) -> Self {
        Self {
            config,
            layout: None,
            board: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flags_left: config.mines,
            elapsed_secs: 0,
            state: MinesweeperState::Unstarted,
            triggered_mine: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Starts from a known layout instead of placing mines on the first reveal.
    ///
    /// [`MinesweeperEngine::reset`] goes back to random placement.
    pub fn with_layout(layout: MineLayout, seed: u64) -> Self {
        let config = MinesweeperConfig {
            size: layout.size(),
            mines: layout.mine_count(),
            ..Default::default()
        };
        let mut engine = Self::new(config, seed);
        engine.layout = Some(layout);
        engine
    }

    pub fn config(&self) -> MinesweeperConfig {
        self.config
    }

    pub fn state(&self) -> MinesweeperState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_left(&self) -> CellCount {
        self.flags_left
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.board[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }

    /// Always false until mines have been placed.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Number of mines around `coords`, unknown until mines have been placed.
    pub fn neighbor_mines(&self, coords: Coord2) -> Option<u8> {
        self.layout
            .as_ref()
            .map(|layout| layout.adjacent_mine_count(coords))
    }

    fn contains(&self, (x, y): Coord2) -> bool {
        x < self.config.size.0 && y < self.config.size.1
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.contains(coords) || self.state.is_finished() {
            return RevealOutcome::NoChange;
        }

        if !matches!(self.board[coords.to_nd_index()], Tile::Hidden) {
            return RevealOutcome::NoChange;
        }

        if self.state.is_unstarted() {
            self.start(coords);
        }

        let Some(layout) = self.layout.as_ref() else {
            return RevealOutcome::NoChange;
        };

        if layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            for mine in layout.iter_mines() {
                self.board[mine.to_nd_index()] = Tile::Mine;
            }
            self.state = MinesweeperState::Lost;
            log::debug!("hit mine at {:?} after {}s", coords, self.elapsed_secs);
            return RevealOutcome::HitMine;
        }

        self.revealed_count += flood_reveal(layout, &mut self.board, coords);

        if self.revealed_count == layout.safe_cell_count() {
            self.state = MinesweeperState::Won;
            log::debug!("won after {}s", self.elapsed_secs);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use FlagOutcome::*;

        if !self.contains(coords) || self.state.is_finished() {
            return NoChange;
        }

        match self.board[coords.to_nd_index()] {
            Tile::Hidden if self.flags_left == 0 => NoChange,
            Tile::Hidden => {
                self.board[coords.to_nd_index()] = Tile::Flagged;
                self.flags_left -= 1;
                Changed
            }
            Tile::Flagged => {
                self.board[coords.to_nd_index()] = Tile::Hidden;
                self.flags_left += 1;
                Changed
            }
            Tile::Revealed(_) | Tile::Mine => NoChange,
        }
    }

    /// Places mines if needed and starts the clock.
    fn start(&mut self, first: Coord2) {
        if self.layout.is_none() {
            self.layout = Some(MineLayout::generate(
                self.config,
                first,
                SafeOpening::AlwaysZero,
                &mut self.rng,
            ));
        }
        self.state = MinesweeperState::InProgress;
        log::debug!("started with first reveal at {:?}", first);
    }
}

/// Reveals `start` and cascades through connected zero cells, returning how many cells opened.
fn flood_reveal(layout: &MineLayout, board: &mut Array2<Tile>, start: Coord2) -> CellCount {
    let mut opened = 0;
    let mut to_visit: Vec<Coord2> = Vec::from([start]);

    while let Some(coords) = to_visit.pop() {
        // flagged and already opened cells stay as they are
        if !matches!(board[coords.to_nd_index()], Tile::Hidden) {
            continue;
        }

        let count = layout.adjacent_mine_count(coords);
        board[coords.to_nd_index()] = Tile::Revealed(count);
        opened += 1;
        log::trace!("opened {:?}, mine count: {}", coords, count);

        if count == 0 {
            to_visit.extend(
                layout
                    .iter_neighbors(coords)
                    .filter(|&pos| matches!(board[pos.to_nd_index()], Tile::Hidden)),
            );
        }
    }

    opened
}

impl Simulation for MinesweeperEngine {
    type Step = ClockOutcome;

    /// Advances the elapsed-time clock by one second while a game is in progress.
    fn step(&mut self) -> ClockOutcome {
        if matches!(self.state, MinesweeperState::InProgress) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            ClockOutcome::Ticked
        } else {
            ClockOutcome::Idle
        }
    }

    fn reset(&mut self) {
        let config = self.config;
        self.layout = None;
        self.board = Array2::default(config.size.to_nd_index());
        self.revealed_count = 0;
        self.flags_left = config.mines;
        self.elapsed_secs = 0;
        self.state = MinesweeperState::Unstarted;
        self.triggered_mine = None;
        log::debug!("minesweeper reset");
    }

    fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    fn score(&self) -> u32 {
        self.revealed_count.into()
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.clock_ms.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn cells(size: Coord2) -> impl Iterator<Item = Coord2> {
        (0..size.0).flat_map(move |x| (0..size.1).map(move |y| (x, y)))
    }

    #[test]
    fn config_validation() {
        assert_eq!(
            MinesweeperConfig::new_unchecked((3, 3), 10).validated(),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            MinesweeperConfig::new_unchecked((0, 3), 1).validated(),
            Err(GameError::EmptyGrid)
        );
        assert!(MinesweeperConfig::default().validated().is_ok());
        assert_eq!(MinesweeperConfig::new((0, 4), 99).mines, 4);
    }

    #[test]
    fn first_reveal_on_default_board_never_loses() {
        for seed in 0..100 {
            let mut engine = MinesweeperEngine::new(MinesweeperConfig::default(), seed);

            let outcome = engine.reveal((5, 5));

            assert_ne!(outcome, RevealOutcome::HitMine);
            assert!(matches!(outcome, RevealOutcome::Revealed | RevealOutcome::Won));
            assert_eq!(engine.tile_at((5, 5)), Tile::Revealed(0));
            for pos in NeighborIter::new((5, 5), engine.size()) {
                assert!(!engine.has_mine_at(pos));
            }
        }
    }

    #[test]
    fn neighbor_counts_match_placed_mines() {
        let mut engine = MinesweeperEngine::new(MinesweeperConfig::default(), 42);
        engine.reveal((0, 0));
        let size = engine.size();

        for coords in cells(size).filter(|&c| !engine.has_mine_at(c)) {
            let expected = NeighborIter::new(coords, size)
                .filter(|&pos| engine.has_mine_at(pos))
                .count() as u8;
            assert_eq!(engine.neighbor_mines(coords), Some(expected));
            if let Tile::Revealed(count) = engine.tile_at(coords) {
                assert_eq!(count, expected);
            }
        }
    }

    #[test]
    fn mines_are_unknown_before_first_reveal() {
        let engine = MinesweeperEngine::new(MinesweeperConfig::default(), 1);

        assert_eq!(engine.state(), MinesweeperState::Unstarted);
        assert_eq!(engine.neighbor_mines((0, 0)), None);
        assert!(engine.mine_layout().is_none());
    }

    #[test]
    fn reveal_hits_mine_and_uncovers_every_mine() {
        let mines = [(0, 0), (2, 2), (0, 2)];
        let mut engine = MinesweeperEngine::with_layout(layout((3, 3), &mines), 0);
        engine.toggle_flag((2, 2));

        assert_eq!(engine.reveal((1, 0)), RevealOutcome::Revealed);
        let outcome = engine.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.state(), MinesweeperState::Lost);
        assert_eq!(engine.triggered_mine(), Some((0, 0)));
        for mine in mines {
            assert_eq!(engine.tile_at(mine), Tile::Mine);
        }
        assert_eq!(engine.tile_at((1, 1)), Tile::Hidden);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut engine = MinesweeperEngine::with_layout(layout((3, 3), &[(2, 2)]), 0);

        let outcome = engine.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.tile_at((0, 0)), Tile::Revealed(0));
        assert_eq!(engine.tile_at((1, 1)), Tile::Revealed(1));
        assert_eq!(engine.tile_at((2, 2)), Tile::Hidden);
    }

    #[test]
    fn flood_fill_stops_at_flags_and_numbers() {
        // column x = 2 is a wall of mines, the left side opens in one go
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3)];
        let mut engine = MinesweeperEngine::with_layout(layout((4, 4), &mines), 0);
        engine.toggle_flag((0, 3));

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);

        assert_eq!(engine.tile_at((0, 0)), Tile::Revealed(0));
        assert_eq!(engine.tile_at((0, 2)), Tile::Revealed(0));
        assert_eq!(engine.tile_at((1, 1)), Tile::Revealed(3));
        assert_eq!(engine.tile_at((0, 3)), Tile::Flagged);
        assert_eq!(engine.tile_at((3, 0)), Tile::Hidden);
        assert_eq!(engine.revealed_count(), 7);
    }

    #[test]
    fn won_only_when_every_safe_cell_is_revealed() {
        let mut engine = MinesweeperEngine::with_layout(layout((3, 1), &[(1, 0)]), 0);

        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(engine.state(), MinesweeperState::InProgress);
        assert_eq!(engine.reveal((2, 0)), RevealOutcome::Won);
        assert_eq!(engine.state(), MinesweeperState::Won);
        assert!(engine.is_finished());
    }

    #[test]
    fn reveal_is_noop_on_flagged_revealed_and_finished() {
        let mut engine = MinesweeperEngine::with_layout(layout((3, 1), &[(1, 0)]), 0);

        engine.toggle_flag((0, 0));
        assert_eq!(engine.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.state(), MinesweeperState::Unstarted);

        engine.toggle_flag((0, 0));
        assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((0, 0)), RevealOutcome::NoChange);

        assert_eq!(engine.reveal((1, 0)), RevealOutcome::HitMine);
        assert_eq!(engine.reveal((2, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((2, 0)), FlagOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_is_noop() {
        let mut engine = MinesweeperEngine::new(MinesweeperConfig::default(), 3);

        assert_eq!(engine.reveal((10, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((0, 10)), FlagOutcome::NoChange);
        assert_eq!(engine.state(), MinesweeperState::Unstarted);
    }

    #[test]
    fn flag_budget_is_enforced() {
        let config = MinesweeperConfig::new((4, 4), 2);
        let mut engine = MinesweeperEngine::new(config, 9);

        assert_eq!(engine.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert_eq!(engine.toggle_flag((1, 0)), FlagOutcome::Changed);
        assert_eq!(engine.flags_left(), 0);
        assert_eq!(engine.toggle_flag((2, 0)), FlagOutcome::NoChange);
        assert_eq!(engine.tile_at((2, 0)), Tile::Hidden);

        assert_eq!(engine.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert_eq!(engine.flags_left(), 1);
        assert_eq!(engine.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert_eq!(engine.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert_eq!(engine.flags_left(), 1);
    }

    #[test]
    fn flag_refused_on_revealed_cell() {
        let mut engine = MinesweeperEngine::with_layout(layout((3, 3), &[(2, 2)]), 0);
        assert_eq!(engine.reveal((1, 1)), RevealOutcome::Revealed);

        assert_eq!(engine.toggle_flag((1, 1)), FlagOutcome::NoChange);
        assert_eq!(engine.tile_at((1, 1)), Tile::Revealed(1));
        assert_eq!(engine.flags_left(), 1);
    }

    #[test]
    fn clock_runs_only_while_in_progress() {
        let mut engine = MinesweeperEngine::with_layout(layout((3, 1), &[(1, 0)]), 0);

        assert_eq!(engine.step(), ClockOutcome::Idle);
        engine.reveal((0, 0));
        assert_eq!(engine.step(), ClockOutcome::Ticked);
        assert_eq!(engine.step(), ClockOutcome::Ticked);
        engine.reveal((2, 0));
        assert_eq!(engine.step(), ClockOutcome::Idle);
        assert_eq!(engine.elapsed_secs(), 2);
        assert_eq!(engine.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn reset_returns_to_blank_board() {
        let mut engine = MinesweeperEngine::new(MinesweeperConfig::default(), 5);
        engine.reveal((3, 3));
        engine.toggle_flag((9, 9));
        engine.step();

        engine.reset();

        assert_eq!(engine.state(), MinesweeperState::Unstarted);
        assert_eq!(engine.flags_left(), 10);
        assert_eq!(engine.elapsed_secs(), 0);
        assert!(engine.mine_layout().is_none());
        assert!(cells(engine.size()).all(|c| engine.tile_at(c) == Tile::Hidden));
    }

    #[test]
    fn revealed_and_flagged_are_exclusive() {
        let mut engine = MinesweeperEngine::new(MinesweeperConfig::default(), 11);
        engine.toggle_flag((0, 9));
        engine.reveal((0, 0));

        for coords in cells(engine.size()) {
            let tile = engine.tile_at(coords);
            assert!(!(tile.is_revealed() && tile.is_flagged()));
        }
    }

    #[test]
    fn only_no_change_skips_redraw() {
        use RevealOutcome::*;

        assert!(!NoChange.has_update());
        assert!([Revealed, HitMine, Won].iter().all(|outcome| outcome.has_update()));
    }
}
