//! Session configuration
//!
//! Everything an [`Engine`](crate::engine::Engine) needs is fixed at
//! construction: board dimensions, spawn anchor, gravity interval, game-over
//! and spawn policies, and the piece catalog. Configurations deserialize with
//! serde and every missing field falls back to [`EngineConfig::default`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::{standard_catalog, PieceDefinition};
use crate::rng::SpawnPolicy;
use crate::types::{
    DEFAULT_BUFFER, DEFAULT_HEIGHT, DEFAULT_SPAWN, DEFAULT_TICKS_PER_GRAVITY_STEP, DEFAULT_WIDTH,
};

/// When a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverPolicy {
    /// Spawn the next piece and end only if its spawn placement is invalid.
    /// The piece that caused the overflow stays on the board.
    #[default]
    BlockedSpawn,
    /// End right after lock and line clear if any cell at or above the
    /// visible height is occupied, before the next piece spawns.
    DangerZone,
}

impl GameOverPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blocked_spawn" | "spawn" => Some(GameOverPolicy::BlockedSpawn),
            "danger_zone" | "danger" => Some(GameOverPolicy::DangerZone),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverPolicy::BlockedSpawn => "blocked_spawn",
            GameOverPolicy::DangerZone => "danger_zone",
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
    EmptyCatalog,
    EmptyRotationStates { id: u8 },
    DuplicatePieceId { id: u8 },
    SpawnOutsideGrid,
    ZeroGravityInterval,
    /// `height + buffer` does not fit in a row index
    GridTooTall,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroWidth => "zero_width",
            ConfigError::ZeroHeight => "zero_height",
            ConfigError::EmptyCatalog => "empty_catalog",
            ConfigError::EmptyRotationStates { .. } => "empty_rotation_states",
            ConfigError::DuplicatePieceId { .. } => "duplicate_piece_id",
            ConfigError::SpawnOutsideGrid => "spawn_outside_grid",
            ConfigError::ZeroGravityInterval => "zero_gravity_interval",
            ConfigError::GridTooTall => "grid_too_tall",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroWidth => "board width must be positive",
            ConfigError::ZeroHeight => "board height must be positive",
            ConfigError::EmptyCatalog => "piece catalog must not be empty",
            ConfigError::EmptyRotationStates { .. } => "piece has no rotation states",
            ConfigError::DuplicatePieceId { .. } => "piece id appears more than once",
            ConfigError::SpawnOutsideGrid => "spawn anchor lies outside the board",
            ConfigError::ZeroGravityInterval => "ticks_per_gravity_step must be positive",
            ConfigError::GridTooTall => "height plus buffer exceeds 65535 rows",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRotationStates { id } | ConfigError::DuplicatePieceId { id } => {
                write!(f, "{} (piece {})", self.message(), id)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Construction-time settings for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    /// Visible rows
    pub height: u16,
    /// Hidden rows above `height`
    pub buffer: u16,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub ticks_per_gravity_step: u32,
    pub game_over_policy: GameOverPolicy,
    pub spawn_policy: SpawnPolicy,
    pub catalog: Vec<PieceDefinition>,
}

impl Default for EngineConfig {
    /// 10x20 well with 5 hidden rows, spawning at (5, 21), one drop every
    /// 2 ticks.
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            buffer: DEFAULT_BUFFER,
            spawn_x: DEFAULT_SPAWN.0,
            spawn_y: DEFAULT_SPAWN.1,
            ticks_per_gravity_step: DEFAULT_TICKS_PER_GRAVITY_STEP,
            game_over_policy: GameOverPolicy::BlockedSpawn,
            spawn_policy: SpawnPolicy::Uniform,
            catalog: standard_catalog(),
        }
    }
}

impl EngineConfig {
    /// 10x20 well without hidden rows, spawning at (4, 18), one drop per tick
    pub fn classic() -> Self {
        Self {
            buffer: 0,
            spawn_x: 4,
            spawn_y: 18,
            ticks_per_gravity_step: 1,
            ..Self::default()
        }
    }

    pub fn total_height(&self) -> u32 {
        self.height as u32 + self.buffer as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.ticks_per_gravity_step == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        if self.total_height() > u16::MAX as u32 {
            return Err(ConfigError::GridTooTall);
        }
        if self.spawn_x < 0
            || self.spawn_x >= self.width as i32
            || self.spawn_y < 0
            || self.spawn_y as i64 >= self.total_height() as i64
        {
            return Err(ConfigError::SpawnOutsideGrid);
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut ids = HashSet::new();
        for def in &self.catalog {
            if def.rotation_count() == 0 {
                return Err(ConfigError::EmptyRotationStates { id: def.id() });
            }
            if !ids.insert(def.id()) {
                return Err(ConfigError::DuplicatePieceId { id: def.id() });
            }
        }
        Ok(())
    }
}
