use serde::Serialize;

use crate::pieces::PieceInstance;
use crate::types::{CellValue, Tile, EMPTY_CELL};

/// FNV-1a 64-bit over a byte stream
pub fn fnv1a64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub id: u8,
    pub value: CellValue,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    pub tiles: [Tile; 4],
}

impl From<&PieceInstance> for ActiveSnapshot {
    fn from(value: &PieceInstance) -> Self {
        Self {
            id: value.id(),
            value: value.value(),
            x: value.x(),
            y: value.y(),
            rotation: value.rotation(),
            tiles: value.tiles(),
        }
    }
}

/// Read-only view of a session for renderers and feature extractors.
///
/// `cells` holds the visible rows only, row-major with row 0 at the bottom.
/// The falling piece is not merged into `cells`; it is reported in `current`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<CellValue>,
    pub board_hash: u64,
    pub current: Option<ActiveSnapshot>,
    pub next_id: Option<u8>,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub episode_id: u32,
    pub piece_id: u32,
    pub tick_counter: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
        self.board_hash = fnv1a64(self.cells.iter().copied());
        self.current = None;
        self.next_id = None;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.episode_id = 0;
        self.piece_id = 0;
        self.tick_counter = 0;
        self.game_over = false;
    }

    /// Replace the board part, reusing the cell buffer when the size matches
    pub(crate) fn set_board(&mut self, width: u16, height: u16, visible: &[CellValue]) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.extend_from_slice(visible);
        self.board_hash = fnv1a64(visible.iter().copied());
    }

    /// Visible cell at (x, y), `None` outside the visible region
    pub fn cell(&self, x: i32, y: i32) -> Option<CellValue> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Per column, one past the highest occupied visible row (0 if empty)
    pub fn column_heights(&self) -> Vec<u16> {
        let width = self.width as usize;
        (0..width)
            .map(|x| {
                (0..self.height as usize)
                    .rev()
                    .find(|&y| self.cells[y * width + x] != EMPTY_CELL)
                    .map_or(0, |y| y as u16 + 1)
            })
            .collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.current.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            board_hash: fnv1a64(std::iter::empty()),
            current: None,
            next_id: None,
            lines_cleared: 0,
            pieces_locked: 0,
            episode_id: 0,
            piece_id: 0,
            tick_counter: 0,
            game_over: false,
        }
    }
}
