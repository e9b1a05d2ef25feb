use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::*;

/// How much of the first revealed cell's surroundings mine placement keeps clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeOpening {
    Random,
    SimpleSafe,
    AlwaysZero,
}

impl SafeOpening {
    /// Downgrades the requested opening until `mines` still fit outside it.
    ///
    /// `opening_cells` is the clicked cell plus its in-bounds neighbors, so
    /// edge and corner clicks keep fewer cells clear than interior ones.
    fn fitting(self, mines: CellCount, total_cells: CellCount, opening_cells: CellCount) -> Self {
        use SafeOpening::*;
        match self {
            Random => Random,
            SimpleSafe | AlwaysZero if mines.saturating_add(1) > total_cells => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if mines.saturating_add(opening_cells) > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Places `config.mines` uniformly at random, keeping `start` clear according to `opening`.
    pub fn generate<R: Rng + ?Sized>(
        config: MinesweeperConfig,
        start: Coord2,
        opening: SafeOpening,
        rng: &mut R,
    ) -> Self {
        let total_cells = config.total_cells();
        let opening_cells = 1 + NeighborIter::new(start, config.size).count() as CellCount;
        let opening = opening.fitting(config.mines, total_cells, opening_cells);

        let mut excluded: Array2<bool> = Array2::default(config.size.to_nd_index());
        match opening {
            SafeOpening::Random => {}
            SafeOpening::SimpleSafe => {
                excluded[start.to_nd_index()] = true;
            }
            SafeOpening::AlwaysZero => {
                excluded[start.to_nd_index()] = true;
                for coords in excluded.iter_neighbors(start) {
                    excluded[coords.to_nd_index()] = true;
                }
            }
        }

        let (x_end, y_end) = config.size;
        let candidates: Vec<Coord2> = (0..x_end)
            .flat_map(|x| (0..y_end).map(move |y| (x, y)))
            .filter(|&coords| !excluded[coords.to_nd_index()])
            .collect();

        let wanted = usize::from(config.mines);
        if wanted > candidates.len() {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                wanted,
                candidates.len()
            );
        }
        let amount = wanted.min(candidates.len());

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for i in index::sample(rng, candidates.len(), amount) {
            mine_mask[candidates[i].to_nd_index()] = true;
        }

        log::debug!(
            "placed {} mines on {:?} avoiding {:?} ({:?})",
            amount,
            config.size,
            start,
            opening
        );
        Self::from_mine_mask(mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}
