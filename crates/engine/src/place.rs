use rand::Rng;

use crate::core::{Engine, LockEvent, PieceInstance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    NoCurrent,
    RotationOutOfRange,
    RotationBlocked,
    ColumnOutOfBounds,
    ColumnBlocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable | PlaceError::NoCurrent => "not_playable",
            PlaceError::RotationOutOfRange
            | PlaceError::RotationBlocked
            | PlaceError::ColumnOutOfBounds
            | PlaceError::ColumnBlocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "session is over",
            PlaceError::NoCurrent => "no current piece",
            PlaceError::RotationOutOfRange => "target rotation exceeds the piece's rotation count",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::ColumnOutOfBounds => "target x would place piece out of bounds",
            PlaceError::ColumnBlocked => "could not move to target x due to collision",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Command sequence that brings the current piece to a target column and
/// rotation: `rotations` turns in one direction, then `shift` columns
/// (negative is left), then a hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacePlan {
    pub clockwise: bool,
    pub rotations: usize,
    pub shift: i32,
}

/// Check a placement against the current board without touching the session.
///
/// Both rotation directions are tried, shorter first; a half turn tries
/// clockwise first.
pub fn plan_place<R: Rng>(
    engine: &Engine<R>,
    target_x: i32,
    target_rotation: usize,
) -> Result<PlacePlan, PlaceError> {
    if engine.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(current) = engine.current() else {
        return Err(PlaceError::NoCurrent);
    };

    let count = current.definition().rotation_count();
    if target_rotation >= count {
        return Err(PlaceError::RotationOutOfRange);
    }

    let cur = current.rotation();
    let cw = (target_rotation + count - cur) % count;
    let ccw = (cur + count - target_rotation) % count;
    let mut plans = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let mut rotated = None;
    for (clockwise, steps) in plans {
        let mut ghost = current.clone();
        let ok = (0..steps).all(|_| {
            if clockwise {
                ghost.rotate_cw();
            } else {
                ghost.rotate_ccw();
            }
            engine.can_place(&ghost)
        });
        if ok {
            rotated = Some((clockwise, steps, ghost));
            break;
        }
    }
    let Some((clockwise, rotations, mut ghost)) = rotated else {
        return Err(PlaceError::RotationBlocked);
    };

    let (min_dx, max_dx) = horizontal_extent(&ghost);
    let width = engine.board().width() as i32;
    if target_x + min_dx < 0 || target_x + max_dx >= width {
        return Err(PlaceError::ColumnOutOfBounds);
    }

    let shift = target_x - ghost.x();
    let step = shift.signum();
    for _ in 0..shift.abs() {
        ghost.translate(step, 0);
        if !engine.can_place(&ghost) {
            return Err(PlaceError::ColumnBlocked);
        }
    }

    Ok(PlacePlan {
        clockwise,
        rotations,
        shift,
    })
}

/// Rotate, shift and hard drop the current piece. On error the session is
/// left untouched.
pub fn apply_place<R: Rng>(
    engine: &mut Engine<R>,
    target_x: i32,
    target_rotation: usize,
) -> Result<LockEvent, PlaceError> {
    let plan = plan_place(engine, target_x, target_rotation)?;

    for _ in 0..plan.rotations {
        let ok = if plan.clockwise {
            engine.rotate_cw()
        } else {
            engine.rotate_ccw()
        };
        debug_assert!(ok, "planned rotation was rejected");
    }
    for _ in 0..plan.shift.abs() {
        let ok = if plan.shift > 0 {
            engine.move_right()
        } else {
            engine.move_left()
        };
        debug_assert!(ok, "planned shift was rejected");
    }

    engine.hard_drop().ok_or(PlaceError::NoCurrent)
}

/// Every (x, rotation) pair [`apply_place`] would accept right now
pub fn placements<R: Rng>(engine: &Engine<R>) -> Vec<(i32, usize)> {
    let Some(current) = engine.current() else {
        return Vec::new();
    };
    let width = engine.board().width() as i32;

    let mut out = Vec::new();
    for rotation in 0..current.definition().rotation_count() {
        let mut probe = current.clone();
        while probe.rotation() != rotation {
            probe.rotate_cw();
        }
        let (min_dx, max_dx) = horizontal_extent(&probe);
        for x in -min_dx..width - max_dx {
            if plan_place(engine, x, rotation).is_ok() {
                out.push((x, rotation));
            }
        }
    }
    out
}

fn horizontal_extent(piece: &PieceInstance) -> (i32, i32) {
    let x = piece.x();
    piece
        .tiles()
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &(tx, _)| {
            (lo.min(tx - x), hi.max(tx - x))
        })
}
