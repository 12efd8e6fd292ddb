//! Headless simulation runner (default binary).
//!
//! Plays seeded episodes with a random placement policy and prints one JSON
//! summary per episode. No rendering and no input devices.
//!
//! ```text
//! blockfall-sim [--config <file.json>] [--episodes N] [--seed S] [--max-pieces M]
//! ```

use std::io::{self, Write};

use anyhow::Result;

use blockfall::core::EngineConfig;
use blockfall::sim::{load_config, parse_sim_args, run};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_sim_args(&args)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    eprintln!(
        "blockfall-sim: {}x{} (+{} hidden), {} pieces, seed {}",
        config.width,
        config.height,
        config.buffer,
        config.catalog.len(),
        args.seed
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for summary in run(&args, config)? {
        let line = serde_json::to_string(&summary)?;
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
