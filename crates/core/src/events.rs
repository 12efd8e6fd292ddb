//! Lock events and the notification interface
//!
//! The engine reports what happened on each lock in two ways: the latest
//! [`LockEvent`] is kept until an observer takes it, and every registered
//! [`EngineListener`] is called synchronously as the lock is processed.
//! Scoring, rewards and restart-on-death live in listeners, never in the
//! engine itself.

use std::cell::RefCell;
use std::rc::Rc;

use arrayvec::ArrayVec;

use crate::types::{CellValue, Tile};

/// What a single lock did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Definition id of the piece that locked
    pub piece_id: u8,
    pub value: CellValue,
    /// Board coordinates the piece was written into, before any line clear
    pub tiles: [Tile; 4],
    /// Distinct rows the piece touched, ascending
    pub rows: ArrayVec<i32, 4>,
    pub lines_cleared: u32,
    /// The session ended as a consequence of this lock
    pub game_over: bool,
}

impl LockEvent {
    pub(crate) fn new(piece_id: u8, value: CellValue, tiles: [Tile; 4]) -> Self {
        let mut rows: ArrayVec<i32, 4> = ArrayVec::new();
        for &(_, y) in &tiles {
            if !rows.contains(&y) {
                rows.push(y);
            }
        }
        rows.sort_unstable();

        Self {
            piece_id,
            value,
            tiles,
            rows,
            lines_cleared: 0,
            game_over: false,
        }
    }

    /// Lowest row the piece landed on
    pub fn landing_row(&self) -> i32 {
        self.rows.first().copied().unwrap_or_default()
    }
}

/// Subscriber notified by the engine as locks are processed.
///
/// Calls happen in this order for one lock: `on_piece_locked`, then
/// `on_lines_cleared` if any rows were cleared, then `on_game_over` if the
/// session ended. All methods default to doing nothing.
pub trait EngineListener {
    fn on_piece_locked(&mut self, _event: &LockEvent) {}

    fn on_lines_cleared(&mut self, _count: u32) {}

    fn on_game_over(&mut self) {}
}

/// Lets a caller keep a handle on a listener it has handed to the engine.
impl<L: EngineListener + ?Sized> EngineListener for Rc<RefCell<L>> {
    fn on_piece_locked(&mut self, event: &LockEvent) {
        self.borrow_mut().on_piece_locked(event);
    }

    fn on_lines_cleared(&mut self, count: u32) {
        self.borrow_mut().on_lines_cleared(count);
    }

    fn on_game_over(&mut self) {
        self.borrow_mut().on_game_over();
    }
}
