//! Headless session runner used by the `blockfall-sim` binary.
//!
//! Plays whole episodes with a seeded random placement policy and reports one
//! summary per episode. Useful for smoke-testing configurations and for
//! checking that a seed reproduces the same game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rand::Rng;
use serde::Serialize;

use crate::core::{Engine, EngineConfig, SimpleRng};
use crate::engine::{apply_place, placements};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimArgs {
    pub config: Option<PathBuf>,
    pub episodes: u32,
    pub seed: u32,
    pub max_pieces: u32,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            config: None,
            episodes: 1,
            seed: 1,
            max_pieces: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub pieces: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    pub board_hash: u64,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("blockfall-sim: missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("blockfall-sim: invalid {} value: {}", flag, v))
}

/// Parse command-line arguments (without the program name)
pub fn parse_sim_args(args: &[String]) -> Result<SimArgs> {
    let mut out = SimArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("blockfall-sim: missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--episodes" => {
                i += 1;
                out.episodes = parse_value("--episodes", args.get(i))?;
            }
            "--seed" => {
                i += 1;
                out.seed = parse_value("--seed", args.get(i))?;
            }
            "--max-pieces" => {
                i += 1;
                out.max_pieces = parse_value("--max-pieces", args.get(i))?;
            }
            other => {
                return Err(anyhow!("blockfall-sim: unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}

/// Read and validate a JSON session configuration
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Play the current episode to game over or `max_pieces` locks.
///
/// Each piece goes to a placement drawn uniformly from the legal ones; a
/// piece with no legal placement is dropped where it is.
pub fn run_episode<R: Rng, P: Rng>(
    engine: &mut Engine<R>,
    policy: &mut P,
    max_pieces: u32,
) -> EpisodeSummary {
    while !engine.is_game_over() && engine.pieces_locked() < max_pieces {
        let options = placements(engine);
        if options.is_empty() {
            engine.hard_drop();
            continue;
        }
        let (x, rotation) = options[policy.gen_range(0..options.len())];
        if apply_place(engine, x, rotation).is_err() {
            engine.hard_drop();
        }
    }

    let snapshot = engine.snapshot();
    EpisodeSummary {
        episode: snapshot.episode_id,
        pieces: snapshot.pieces_locked,
        lines_cleared: snapshot.lines_cleared,
        game_over: snapshot.game_over,
        board_hash: snapshot.board_hash,
    }
}

/// Run every requested episode on one engine, resetting between them
pub fn run(args: &SimArgs, config: EngineConfig) -> Result<Vec<EpisodeSummary>> {
    let mut engine = Engine::new(config, args.seed).context("starting session")?;
    let mut policy = SimpleRng::new(args.seed.rotate_left(16) ^ 0x9E37_79B9);

    let mut out = Vec::with_capacity(args.episodes as usize);
    for episode in 0..args.episodes {
        if episode > 0 {
            engine.reset();
        }
        out.push(run_episode(&mut engine, &mut policy, args.max_pieces));
    }
    Ok(out)
}
