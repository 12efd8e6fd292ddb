//! Pieces module - piece catalog entries and falling piece instances
//!
//! A [`PieceDefinition`] is immutable catalog data: an id, the value written
//! into the board when it locks, and a cyclic list of rotation states. A
//! [`PieceInstance`] is the mutable occurrence of a definition that is falling
//! through the well. Definitions are shared through `Arc` so any number of
//! instances can point at the same catalog entry without copying it.
//!
//! There is no wall-kick search here: rotation only changes the index.
//! Whether the new orientation is legal is decided by the board.

use std::num::NonZeroU8;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{CellValue, Offset, Tile};

/// Four anchor-relative tile offsets making up one orientation
pub type RotationState = [Offset; 4];

/// Immutable description of one piece family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceDefinition {
    id: u8,
    value: NonZeroU8,
    rotation_states: Vec<RotationState>,
}

impl PieceDefinition {
    /// Create a definition.
    ///
    /// # Panics
    ///
    /// Panics if `rotation_states` is empty.
    pub fn new(id: u8, value: NonZeroU8, rotation_states: Vec<RotationState>) -> Self {
        assert!(
            !rotation_states.is_empty(),
            "piece {id} needs at least one rotation state"
        );
        Self {
            id,
            value,
            rotation_states,
        }
    }

    /// Family id, exported to observers
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Value written into every cell this piece locks into
    pub fn value(&self) -> CellValue {
        self.value.get()
    }

    pub fn rotation_states(&self) -> &[RotationState] {
        &self.rotation_states
    }

    /// Number of distinct orientations (the rotation cycle length)
    pub fn rotation_count(&self) -> usize {
        self.rotation_states.len()
    }

    /// Offsets for one orientation, `None` if the index is past the cycle
    pub fn state(&self, rotation: usize) -> Option<&RotationState> {
        self.rotation_states.get(rotation)
    }
}

/// A live occurrence of a [`PieceDefinition`] with its own anchor and rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceInstance {
    definition: Arc<PieceDefinition>,
    x: i32,
    y: i32,
    rotation: usize,
}

impl PieceInstance {
    /// New instance at rotation 0 with its anchor at the origin.
    ///
    /// The engine moves it to the spawn coordinate with [`PieceInstance::place_at`].
    pub fn new(definition: Arc<PieceDefinition>) -> Self {
        Self {
            definition,
            x: 0,
            y: 0,
            rotation: 0,
        }
    }

    pub fn definition(&self) -> &Arc<PieceDefinition> {
        &self.definition
    }

    pub fn id(&self) -> u8 {
        self.definition.id()
    }

    pub fn value(&self) -> CellValue {
        self.definition.value()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn anchor(&self) -> Tile {
        (self.x, self.y)
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Move the anchor to an absolute coordinate
    pub fn place_at(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Shift the anchor by (dx, dy)
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Advance the rotation index, wrapping to 0 after the last state
    pub fn rotate_cw(&mut self) {
        self.rotation = (self.rotation + 1) % self.definition.rotation_count();
    }

    /// Step the rotation index back, wrapping from 0 to the last state
    pub fn rotate_ccw(&mut self) {
        let count = self.definition.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Absolute coordinates of the four tiles for the current anchor and rotation
    pub fn tiles(&self) -> [Tile; 4] {
        let state = self.definition.rotation_states[self.rotation];
        state.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

const fn value(v: u8) -> NonZeroU8 {
    match NonZeroU8::new(v) {
        Some(v) => v,
        None => panic!("piece value must be nonzero"),
    }
}

/// The seven tetrominoes, ids 0..=6 and values 1..=7.
///
/// Offsets use a y-up frame around a central anchor. Every spawn orientation
/// spans `dx` in `-1..=2` and `dy` in `0..=1`.
pub fn standard_catalog() -> Vec<PieceDefinition> {
    vec![
        // I
        PieceDefinition::new(
            0,
            value(1),
            vec![
                [(-1, 0), (0, 0), (1, 0), (2, 0)],
                [(0, -1), (0, 0), (0, 1), (0, 2)],
            ],
        ),
        // O
        PieceDefinition::new(1, value(2), vec![[(0, 0), (1, 0), (0, 1), (1, 1)]]),
        // T
        PieceDefinition::new(
            2,
            value(3),
            vec![
                [(-1, 0), (0, 0), (1, 0), (0, 1)],
                [(0, 1), (0, 0), (0, -1), (1, 0)],
                [(1, 0), (0, 0), (-1, 0), (0, -1)],
                [(0, -1), (0, 0), (0, 1), (-1, 0)],
            ],
        ),
        // S
        PieceDefinition::new(
            3,
            value(4),
            vec![
                [(-1, 0), (0, 0), (0, 1), (1, 1)],
                [(0, 1), (0, 0), (1, 0), (1, -1)],
            ],
        ),
        // Z
        PieceDefinition::new(
            4,
            value(5),
            vec![
                [(-1, 1), (0, 1), (0, 0), (1, 0)],
                [(1, 1), (1, 0), (0, 0), (0, -1)],
            ],
        ),
        // J
        PieceDefinition::new(
            5,
            value(6),
            vec![
                [(-1, 1), (-1, 0), (0, 0), (1, 0)],
                [(1, 1), (0, 1), (0, 0), (0, -1)],
                [(1, -1), (1, 0), (0, 0), (-1, 0)],
                [(-1, -1), (0, -1), (0, 0), (0, 1)],
            ],
        ),
        // L
        PieceDefinition::new(
            6,
            value(7),
            vec![
                [(-1, 0), (0, 0), (1, 0), (1, 1)],
                [(0, 1), (0, 0), (0, -1), (1, -1)],
                [(1, 0), (0, 0), (-1, 0), (-1, -1)],
                [(0, -1), (0, 0), (0, 1), (-1, 1)],
            ],
        ),
    ]
}
