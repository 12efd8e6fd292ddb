//! Engine helpers built on top of `blockfall-core`.
//!
//! Training harnesses usually decide once per piece ("put it in column x with
//! rotation r") instead of issuing individual moves. [`place`] turns such a
//! decision into the equivalent command sequence, checking it against the
//! board first so a rejected decision never touches the session.

pub mod place;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use place::{apply_place, placements, plan_place, PlaceError, PlacePlan};
