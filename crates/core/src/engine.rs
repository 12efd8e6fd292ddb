//! Engine module - one falling-block session
//!
//! The engine owns the board, the falling piece and a one-piece look-ahead.
//! It is a synchronous state machine: every command runs to completion
//! before the next one is accepted, and "time" only advances when [`Engine::tick`]
//! is called.
//!
//! A piece is live until a downward step is rejected. That rejection is the
//! lock: the piece is written into the board, full rows are compacted, the
//! game-over policy is checked and the look-ahead piece takes over.
//! Once the session is over every command except [`Engine::reset`] is a no-op.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig, GameOverPolicy};
use crate::events::{EngineListener, LockEvent};
use crate::pieces::{PieceDefinition, PieceInstance};
use crate::rng::{SimpleRng, Spawner};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{CellValue, Command, Tile};

/// Result of a gravity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session over (or no live piece); nothing happened
    Idle,
    /// The gravity clock advanced but has not reached the next step yet
    Waiting,
    /// The piece moved down one row
    Fell,
    /// The piece could not move down and locked
    Locked(LockEvent),
}

/// A single falling-block session
pub struct Engine<R = SimpleRng> {
    board: Board,
    catalog: Vec<Arc<PieceDefinition>>,
    spawn: Tile,
    ticks_per_gravity_step: u32,
    game_over_policy: GameOverPolicy,
    spawner: Spawner<R>,
    current: Option<PieceInstance>,
    next: Option<PieceInstance>,
    tick_counter: u32,
    lines_cleared: u32,
    pieces_locked: u32,
    /// Increments on every reset
    episode_id: u32,
    /// Increments on every successful spawn
    piece_id: u32,
    game_over: bool,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    listeners: Vec<Box<dyn EngineListener>>,
}

impl Engine<SimpleRng> {
    /// Start a session driven by the built-in seeded RNG
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Start a session with an injected randomness source.
    ///
    /// The configuration is validated first; the first piece and its
    /// look-ahead are spawned before this returns.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            board: Board::new(config.width, config.height, config.buffer),
            catalog: config.catalog.into_iter().map(Arc::new).collect(),
            spawn: (config.spawn_x, config.spawn_y),
            ticks_per_gravity_step: config.ticks_per_gravity_step,
            game_over_policy: config.game_over_policy,
            spawner: Spawner::new(config.spawn_policy, rng),
            current: None,
            next: None,
            tick_counter: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            episode_id: 0,
            piece_id: 0,
            game_over: false,
            last_event: None,
            listeners: Vec::new(),
        };
        engine.start_session();
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &[Arc<PieceDefinition>] {
        &self.catalog
    }

    /// The piece under control, `None` once the session is over
    pub fn current(&self) -> Option<&PieceInstance> {
        self.current.as_ref()
    }

    /// The look-ahead piece that spawns after the current one locks
    pub fn next(&self) -> Option<&PieceInstance> {
        self.next.as_ref()
    }

    pub fn spawn_point(&self) -> Tile {
        self.spawn
    }

    pub fn game_over_policy(&self) -> GameOverPolicy {
        self.game_over_policy
    }

    pub fn spawner(&self) -> &Spawner<R> {
        &self.spawner
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn ticks_per_gravity_step(&self) -> u32 {
        self.ticks_per_gravity_step
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Register a subscriber for lock, line-clear and game-over notifications
    pub fn subscribe(&mut self, listener: impl EngineListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Most recent lock event, if it has not been taken yet
    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Shift the current piece one column left; `true` if it moved
    pub fn move_left(&mut self) -> bool {
        self.try_translate(-1, 0)
    }

    /// Shift the current piece one column right; `true` if it moved
    pub fn move_right(&mut self) -> bool {
        self.try_translate(1, 0)
    }

    /// Rotate the current piece clockwise; `true` if the new orientation was
    /// legal and committed
    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    /// Rotate the current piece counter-clockwise; `true` if committed
    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Advance the gravity clock by one tick. Every `ticks_per_gravity_step`
    /// ticks the piece is forced down one row, or locks if it cannot move.
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over || self.current.is_none() {
            return TickOutcome::Idle;
        }

        self.tick_counter += 1;
        if self.tick_counter < self.ticks_per_gravity_step {
            return TickOutcome::Waiting;
        }
        self.tick_counter = 0;
        self.gravity_step()
    }

    /// Force one gravity step now and restart the gravity clock
    pub fn soft_drop(&mut self) -> TickOutcome {
        if self.game_over || self.current.is_none() {
            return TickOutcome::Idle;
        }
        self.tick_counter = 0;
        self.gravity_step()
    }

    /// Drop the current piece until it locks. Returns the lock event, or
    /// `None` if there was no live piece.
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if self.game_over || self.current.is_none() {
            return None;
        }
        while self.try_translate(0, -1) {}
        self.lock_current()
    }

    /// Abandon the board and the current piece and start a new session.
    ///
    /// The look-ahead piece survives the reset and becomes the first piece
    /// of the new session. A partly dealt bag is discarded; the piece after
    /// the look-ahead comes from a fresh bag.
    pub fn reset(&mut self) {
        self.board.reset();
        self.spawner.reset();
        self.current = None;
        self.tick_counter = 0;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.game_over = false;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start_session();
    }

    /// Overwrite one board cell. Test scaffolding; it bypasses every game rule.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn set_cell(&mut self, x: i32, y: i32, value: CellValue) {
        self.board.set_cell(x, y, value);
    }

    /// Apply an inbound command. Returns `true` if the command was accepted
    /// (a move or rotation committed, the clock advanced, a reset happened).
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateCw => self.rotate_cw(),
            Command::RotateCcw => self.rotate_ccw(),
            Command::Tick => !matches!(self.tick(), TickOutcome::Idle),
            Command::SoftDrop => !matches!(self.soft_drop(), TickOutcome::Idle),
            Command::HardDrop => self.hard_drop().is_some(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// True iff the piece's tiles would be a legal placement on this board
    pub fn can_place(&self, piece: &PieceInstance) -> bool {
        self.board.is_valid_placement(&piece.tiles())
    }

    /// Anchor row at which the current piece would lock if dropped now
    pub fn ghost_y(&self) -> Option<i32> {
        let mut ghost = self.current.clone()?;
        loop {
            ghost.translate(0, -1);
            if !self.can_place(&ghost) {
                return Some(ghost.y() + 1);
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.set_board(
            self.board.width(),
            self.board.height(),
            self.board.visible_cells(),
        );
        out.current = self.current.as_ref().map(ActiveSnapshot::from);
        out.next_id = self.next.as_ref().map(PieceInstance::id);
        out.lines_cleared = self.lines_cleared;
        out.pieces_locked = self.pieces_locked;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.tick_counter = self.tick_counter;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn start_session(&mut self) {
        if !self.spawn_piece() {
            for listener in &mut self.listeners {
                listener.on_game_over();
            }
        }
    }

    /// Promote the look-ahead piece to current and draw a new look-ahead.
    /// Ends the session if the spawn placement is blocked.
    fn spawn_piece(&mut self) -> bool {
        let mut piece = match self.next.take() {
            Some(piece) => piece,
            None => self.spawner.next(&self.catalog),
        };
        self.next = Some(self.spawner.next(&self.catalog));

        piece.place_at(self.spawn.0, self.spawn.1);
        self.tick_counter = 0;

        if !self.board.is_valid_placement(&piece.tiles()) {
            self.current = None;
            self.game_over = true;
            return false;
        }

        self.current = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    fn try_translate(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        piece.translate(dx, dy);
        if self.board.is_valid_placement(&piece.tiles()) {
            return true;
        }
        piece.translate(-dx, -dy);
        false
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        if clockwise {
            piece.rotate_cw();
        } else {
            piece.rotate_ccw();
        }
        if self.board.is_valid_placement(&piece.tiles()) {
            return true;
        }

        // Exact inverse; the anchor never moved.
        if clockwise {
            piece.rotate_ccw();
        } else {
            piece.rotate_cw();
        }
        false
    }

    fn gravity_step(&mut self) -> TickOutcome {
        if self.try_translate(0, -1) {
            return TickOutcome::Fell;
        }
        match self.lock_current() {
            Some(event) => TickOutcome::Locked(event),
            None => TickOutcome::Idle,
        }
    }

    /// Lock the current piece, compact, check game over, then spawn.
    fn lock_current(&mut self) -> Option<LockEvent> {
        let piece = self.current.take()?;

        self.board.lock_piece(&piece);
        self.pieces_locked += 1;
        let mut event = LockEvent::new(piece.id(), piece.value(), piece.tiles());

        let cleared = self.board.compact_lines();
        self.lines_cleared += cleared;
        event.lines_cleared = cleared;

        let overflowed = match self.game_over_policy {
            GameOverPolicy::DangerZone => self.board.any_occupied_from_row(self.board.height()),
            GameOverPolicy::BlockedSpawn => false,
        };
        if overflowed {
            self.game_over = true;
        } else {
            self.spawn_piece();
        }
        event.game_over = self.game_over;

        for listener in &mut self.listeners {
            listener.on_piece_locked(&event);
            if event.lines_cleared > 0 {
                listener.on_lines_cleared(event.lines_cleared);
            }
            if event.game_over {
                listener.on_game_over();
            }
        }

        self.last_event = Some(event.clone());
        Some(event)
    }
}

impl<R: fmt::Debug> fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("spawn", &self.spawn)
            .field("ticks_per_gravity_step", &self.ticks_per_gravity_step)
            .field("game_over_policy", &self.game_over_policy)
            .field("spawner", &self.spawner)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("tick_counter", &self.tick_counter)
            .field("lines_cleared", &self.lines_cleared)
            .field("pieces_locked", &self.pieces_locked)
            .field("episode_id", &self.episode_id)
            .field("piece_id", &self.piece_id)
            .field("game_over", &self.game_over)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
