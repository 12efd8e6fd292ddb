//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block simulation and nothing
//! else: no rendering, no input devices, no I/O. Given the same configuration
//! and seed it produces the same session, which makes it suitable for
//! training harnesses as well as interactive front ends.
//!
//! # Module Structure
//!
//! - [`pieces`]: piece definitions (catalog data) and falling piece instances
//! - [`board`]: the grid, placement checks, locking and line compaction
//! - [`rng`]: seeded RNG and the piece spawner (uniform or bag policy)
//! - [`config`]: session configuration and validation
//! - [`events`]: lock events and the listener interface
//! - [`engine`]: the session state machine
//! - [`snapshot`]: read-only view exported to observers
//!
//! # Rules
//!
//! - Moves and rotations are accepted only if every tile lands inside the
//!   grid on an empty cell; otherwise the piece is restored exactly
//! - No wall kicks: a blocked rotation is simply rejected
//! - Gravity fires every `ticks_per_gravity_step` calls to `tick`
//! - A rejected downward step locks the piece, then full rows are cleared
//!   bottom to top
//! - The session ends when a new piece cannot be placed at the spawn anchor
//!   (or, with [`GameOverPolicy::DangerZone`], when anything locks above the
//!   visible height)
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, EngineConfig};
//! use blockfall_types::Command;
//!
//! let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
//!
//! engine.apply(Command::MoveRight);
//! engine.apply(Command::RotateCw);
//! engine.apply(Command::HardDrop);
//!
//! assert_eq!(engine.pieces_locked(), 1);
//! assert!(!engine.is_game_over());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod events;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig, GameOverPolicy};
pub use engine::{Engine, TickOutcome};
pub use events::{EngineListener, LockEvent};
pub use pieces::{standard_catalog, PieceDefinition, PieceInstance, RotationState};
pub use rng::{SimpleRng, SpawnPolicy, Spawner};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
