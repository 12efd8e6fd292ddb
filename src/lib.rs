//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under stable module names so callers can
//! depend on one package: `blockfall::{core, engine, types}`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub mod sim;
