//! Board module - manages the grid of locked cells
//!
//! The board is `width` columns by `height + buffer` rows. The top `buffer`
//! rows are hidden: pieces spawn there and can lock there, but snapshots only
//! export the visible `height` rows.
//!
//! Storage is a flat row-major vector (`y * width + x`) allocated once per
//! session. Row 0 is the bottom of the well.
//!
//! Queries that take a single coordinate (`is_occupied`, `set_cell`) treat an
//! out-of-range coordinate as a caller bug and panic. Placement checks go
//! through [`Board::is_valid_placement`], which never panics.

use crate::pieces::PieceInstance;
use crate::types::{CellValue, Tile, EMPTY_CELL};

/// The grid of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    buffer: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellValue>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, or if `height + buffer`
    /// overflows `u16`.
    pub fn new(width: u16, height: u16, buffer: u16) -> Self {
        assert!(width > 0 && height > 0, "board must be at least 1x1");
        assert!(
            height.checked_add(buffer).is_some(),
            "{height} visible + {buffer} hidden rows exceed {} rows",
            u16::MAX
        );
        let rows = height as usize + buffer as usize;
        Self {
            width,
            height,
            buffer,
            cells: vec![EMPTY_CELL; width as usize * rows],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.is_inside_grid(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn index_or_panic(&self, x: i32, y: i32) -> usize {
        match self.index(x, y) {
            Some(idx) => idx,
            None => panic!(
                "cell ({x}, {y}) is outside the {}x{} board",
                self.width,
                self.total_height()
            ),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Visible height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Hidden rows above the visible region
    pub fn buffer(&self) -> u16 {
        self.buffer
    }

    /// Addressable rows, visible plus buffer
    pub fn total_height(&self) -> u16 {
        self.height + self.buffer
    }

    /// True iff `0 <= x < width` and `0 <= y < height + buffer`
    pub fn is_inside_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.total_height() as i32
    }

    /// Cell value at (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellValue> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True iff the cell holds a locked tile.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cells[self.index_or_panic(x, y)] != EMPTY_CELL
    }

    /// Overwrite a single cell. Test scaffolding only; gameplay writes go
    /// through [`Board::lock_piece`].
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn set_cell(&mut self, x: i32, y: i32, value: CellValue) {
        let idx = self.index_or_panic(x, y);
        self.cells[idx] = value;
    }

    /// True iff every tile is inside the grid and empty
    pub fn is_valid_placement(&self, tiles: &[Tile]) -> bool {
        tiles
            .iter()
            .all(|&(x, y)| matches!(self.get(x, y), Some(EMPTY_CELL)))
    }

    /// Write the piece's value into its four current tiles.
    ///
    /// # Panics
    ///
    /// Panics if any tile is outside the grid or already occupied.
    pub fn lock_piece(&mut self, piece: &PieceInstance) {
        let tiles = piece.tiles();
        assert!(
            self.is_valid_placement(&tiles),
            "locking piece {} over occupied or out-of-range tiles {:?}",
            piece.id(),
            tiles
        );

        let value = piece.value();
        for (x, y) in tiles {
            let idx = self.index_or_panic(x, y);
            self.cells[idx] = value;
        }
    }

    /// Check if a row is completely filled
    ///
    /// # Panics
    ///
    /// Panics if `y` is not an addressable row.
    pub fn is_row_full(&self, y: usize) -> bool {
        assert!(
            y < self.total_height() as usize,
            "row {y} is outside the board ({} rows)",
            self.total_height()
        );
        let start = y * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|&c| c != EMPTY_CELL)
    }

    /// Remove row `y` and shift every row above it down by one.
    /// The top row becomes empty.
    fn remove_row(&mut self, y: usize) {
        let width = self.width as usize;
        let start = y * width;
        let end = self.cells.len();

        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width..end, start);
        self.cells[end - width..end].fill(EMPTY_CELL);
    }

    /// Clear every full row, bottom to top, and return how many were cleared.
    ///
    /// Each clear shifts the rows above it immediately, so the same row index
    /// is examined again before moving up: the row that dropped into it may
    /// be full as well.
    pub fn compact_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0usize;
        while y < self.total_height() as usize {
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// True iff any cell at row `y` or above is occupied
    pub fn any_occupied_from_row(&self, y: u16) -> bool {
        let start = (y.min(self.total_height()) as usize) * self.width as usize;
        self.cells[start..].iter().any(|&c| c != EMPTY_CELL)
    }

    /// Row-major cell storage including the buffer rows
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Row-major cells of the visible region only
    pub fn visible_cells(&self) -> &[CellValue] {
        &self.cells[..self.width as usize * self.height as usize]
    }

    /// Zero every cell
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Build a board from text rows, top row first. `.` is empty, a digit is
    /// that cell value, any other character is value 1.
    #[cfg(test)]
    pub fn from_rows(width: u16, buffer: u16, rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let mut board = Self::new(width, height, buffer);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width as usize, "row {i} has the wrong width");
            let y = (height as usize - 1 - i) as i32;
            for (x, ch) in row.chars().enumerate() {
                let value = match ch {
                    '.' => EMPTY_CELL,
                    d if d.is_ascii_digit() => d as u8 - b'0',
                    _ => 1,
                };
                board.set_cell(x as i32, y, value);
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20, 5);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 24), Some(249));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 25), None);
        assert_eq!(board.index(0, -1), None);
    }

    #[test]
    fn test_buffer_rows_are_addressable() {
        let board = Board::new(10, 20, 5);
        assert!(board.is_inside_grid(0, 24));
        assert!(!board.is_inside_grid(0, 25));
        assert_eq!(board.visible_cells().len(), 200);
        assert_eq!(board.cells().len(), 250);
    }

    #[test]
    fn test_compact_rechecks_shifted_row() {
        // Rows 0 and 1 full, row 2 partial: the second full row drops into
        // row 0 after the first clear and must be cleared too.
        let mut board = Board::from_rows(4, 0, &["2.2.", "1111", "3333"]);
        assert_eq!(board.compact_lines(), 2);
        assert_eq!(board.get(0, 0), Some(2));
        assert_eq!(board.get(1, 0), Some(EMPTY_CELL));
        assert_eq!(board.get(2, 0), Some(2));
        assert!(!board.any_occupied_from_row(1));
    }

    #[test]
    fn test_compact_skips_gap_rows() {
        let mut board = Board::from_rows(3, 0, &["111", "1.1", "111"]);
        assert_eq!(board.compact_lines(), 2);
        assert_eq!(board.to_rows(), vec!["...", "...", "1.1"]);
    }

    #[test]
    fn test_remove_top_row() {
        let mut board = Board::from_rows(2, 0, &["11", ".1"]);
        assert_eq!(board.compact_lines(), 1);
        assert_eq!(board.to_rows(), vec!["..", ".1"]);
    }

    #[test]
    #[should_panic(expected = "outside the 10x20 board")]
    fn test_is_occupied_out_of_range_panics() {
        let board = Board::new(10, 20, 0);
        board.is_occupied(10, 0);
    }

    #[test]
    #[should_panic(expected = "locking piece 1 over occupied")]
    fn test_lock_over_occupied_cell_panics() {
        let catalog = crate::pieces::standard_catalog();
        let mut piece = PieceInstance::new(std::sync::Arc::new(catalog[1].clone()));
        piece.place_at(4, 0);

        let mut board = Board::new(10, 20, 0);
        board.set_cell(4, 0, 9);
        board.lock_piece(&piece);
    }

    #[test]
    #[should_panic(expected = "exceed 65535 rows")]
    fn test_oversized_board_panics() {
        Board::new(10, 40_000, 40_000);
    }

    #[test]
    fn test_any_occupied_from_row() {
        let mut board = Board::new(4, 4, 2);
        assert!(!board.any_occupied_from_row(0));
        board.set_cell(1, 4, 3);
        assert!(board.any_occupied_from_row(4));
        assert!(!board.any_occupied_from_row(5));
        assert!(!board.any_occupied_from_row(40));
    }

    impl Board {
        fn to_rows(&self) -> Vec<String> {
            (0..self.total_height() as i32)
                .rev()
                .map(|y| {
                    (0..self.width as i32)
                        .map(|x| match self.get(x, y) {
                            Some(EMPTY_CELL) => '.',
                            Some(v) => (b'0' + v) as char,
                            None => '?',
                        })
                        .collect()
                })
                .collect()
        }
    }
}
