//! Shared vocabulary for the falling-block simulation.
//!
//! Everything here is plain data with no dependencies, so it can be used by the
//! core engine, the placement planner and any external observer alike.
//!
//! # Coordinates
//!
//! - `x` grows to the right, starting at column 0
//! - `y` grows upward, row 0 is the bottom of the well
//! - gravity moves a piece from `y` to `y - 1`
//!
//! # Default session
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Playable columns |
//! | `DEFAULT_HEIGHT` | 20 | Visible rows |
//! | `DEFAULT_BUFFER` | 5 | Hidden rows above the visible region |
//! | `DEFAULT_SPAWN` | (5, 21) | Anchor of a freshly spawned piece |
//! | `DEFAULT_TICKS_PER_GRAVITY_STEP` | 2 | Ticks between forced drops |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::MoveLeft);
//! assert_eq!(cmd.as_str(), "moveLeft");
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, 20);
//! ```

/// Default board width in columns
pub const DEFAULT_WIDTH: u16 = 10;

/// Default visible height in rows
pub const DEFAULT_HEIGHT: u16 = 20;

/// Default number of hidden rows stacked above the visible region
pub const DEFAULT_BUFFER: u16 = 5;

/// Default spawn anchor (x, y)
pub const DEFAULT_SPAWN: (i32, i32) = (5, 21);

/// Default number of ticks between two gravity steps
pub const DEFAULT_TICKS_PER_GRAVITY_STEP: u32 = 2;

/// Value stored in a board cell. `0` is empty, anything else is the value of
/// the piece that locked there.
pub type CellValue = u8;

/// The empty cell value
pub const EMPTY_CELL: CellValue = 0;

/// Offset of a single tile relative to a piece anchor
pub type Offset = (i32, i32);

/// Absolute board coordinate of a tile
pub type Tile = (i32, i32);

/// Inbound commands accepted by the engine
///
/// Every command is applied atomically: it either fully commits or leaves the
/// session exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the current piece one column left
    MoveLeft,
    /// Shift the current piece one column right
    MoveRight,
    /// Advance the rotation index by one
    RotateCw,
    /// Step the rotation index back by one
    RotateCcw,
    /// Advance the gravity clock by one tick
    Tick,
    /// Force one gravity step now and restart the gravity clock
    SoftDrop,
    /// Drop until the current piece locks
    HardDrop,
    /// Abandon the session and start a new one
    Reset,
}

impl Command {
    /// Every command, in declaration order
    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Tick,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Reset,
    ];

    /// Parse a command from its wire name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("HARDDROP"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "tick" => Some(Command::Tick),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    /// camelCase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Tick => "tick",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Reset => "reset",
        }
    }
}
