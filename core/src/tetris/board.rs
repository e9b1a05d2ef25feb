use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Locked cells of the well, indexed `[x, y]` with `y = 0` at the top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Option<Tetromino>>,
}

impl Board {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            cells: Array2::from_elem((width, height).to_nd_index(), None),
        }
    }

    pub fn width(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn size(&self) -> Coord2 {
        (self.width(), self.height())
    }

    fn index(&self, (x, y): Offset) -> Option<[usize; 2]> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let (width, height) = self.cells.dim();
        (x < width && y < height).then_some([x, y])
    }

    /// Cell content, `None` when `coords` is outside the board.
    pub fn get(&self, coords: Offset) -> Option<Option<Tetromino>> {
        self.index(coords).map(|index| self.cells[index])
    }

    /// Returns false when `coords` is outside the board.
    pub fn set(&mut self, coords: Offset, cell: Option<Tetromino>) -> bool {
        match self.index(coords) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, coords: Offset) -> bool {
        matches!(self.get(coords), Some(Some(_)))
    }

    /// Whether `piece` sits inside the side and bottom walls without overlapping locked cells.
    ///
    /// Cells above the top edge are allowed.
    pub fn fits(&self, piece: &ActivePiece) -> bool {
        let width = i16::from(self.width());
        let height = i16::from(self.height());
        piece.cells().all(|(x, y)| {
            (0..width).contains(&x) && y < height && (y < 0 || !self.is_occupied((x, y)))
        })
    }

    /// Writes the piece into the board, skipping cells above the top edge.
    pub fn lock(&mut self, piece: &ActivePiece) {
        for coords in piece.cells().filter(|&(_, y)| y >= 0) {
            self.set(coords, Some(piece.kind));
        }
    }

    pub fn is_row_full(&self, y: Coord) -> bool {
        (0..self.width()).all(|x| self.cells[(x, y).to_nd_index()].is_some())
    }

    /// Drops row `y` and shifts everything above it down, leaving an empty top row.
    fn remove_row(&mut self, y: Coord) {
        let width = self.width();
        for row in (1..=y).rev() {
            for x in 0..width {
                self.cells[(x, row).to_nd_index()] = self.cells[(x, row - 1).to_nd_index()];
            }
        }
        for x in 0..width {
            self.cells[(x, 0).to_nd_index()] = None;
        }
    }

    /// Removes every full row, bottom to top, returning how many went.
    pub fn clear_lines(&mut self) -> u8 {
        let mut cleared = 0;
        let mut y = i16::from(self.height()) - 1;
        while y >= 0 {
            let row = y as Coord;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
                log::trace!("cleared row {}", row);
                // the row above now sits at `y`, check it again
            } else {
                y -= 1;
            }
        }
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Option<Tetromino>)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i16, except: &[i16]) {
        for x in 0..i16::from(board.width()) {
            if !except.contains(&x) {
                board.set((x, y), Some(Tetromino::Z));
            }
        }
    }

    fn filled_cells(board: &Board) -> usize {
        board.iter().filter(|(_, cell)| cell.is_some()).count()
    }

    #[test]
    fn clear_lines_removes_only_full_rows() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19, &[]);
        fill_row(&mut board, 18, &[0]);
        fill_row(&mut board, 17, &[]);
        fill_row(&mut board, 16, &[]);
        board.set((5, 15), Some(Tetromino::T));

        assert_eq!(board.clear_lines(), 3);

        assert_eq!(board.get((0, 19)), Some(None));
        assert_eq!(board.get((1, 19)), Some(Some(Tetromino::Z)));
        assert_eq!(board.get((5, 18)), Some(Some(Tetromino::T)));
        assert_eq!(filled_cells(&board), 10);
        assert!((0..20).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn clear_lines_without_full_rows_is_noop() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19, &[9]);
        let before = board.clone();

        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn fits_checks_walls_floor_and_stack() {
        let mut board = Board::new(10, 20);
        board.set((4, 19), Some(Tetromino::L));

        let o = ActivePiece::spawn(Tetromino::O, (0, -1));
        assert!(board.fits(&o));
        assert!(!board.fits(&o.shifted((-1, 0))));
        assert!(!board.fits(&o.shifted((9, 0))));
        assert!(!board.fits(&ActivePiece::spawn(Tetromino::O, (3, 18))));
        assert!(!board.fits(&ActivePiece::spawn(Tetromino::O, (0, 19))));
        assert!(board.fits(&ActivePiece::spawn(Tetromino::O, (2, 18))));
    }

    #[test]
    fn lock_skips_cells_above_the_top() {
        let mut board = Board::new(10, 20);

        board.lock(&ActivePiece::spawn(Tetromino::O, (3, -1)));

        assert_eq!(filled_cells(&board), 2);
        assert!(board.is_occupied((3, 0)));
        assert!(board.is_occupied((4, 0)));
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let mut board = Board::new(10, 20);

        assert_eq!(board.get((-1, 0)), None);
        assert_eq!(board.get((10, 0)), None);
        assert_eq!(board.get((0, 20)), None);
        assert!(!board.set((0, -1), Some(Tetromino::I)));
    }
}
