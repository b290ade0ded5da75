//! Config initialization command

use anyhow::{Context, Result};
use drift_polygons::SimConfig;
use std::fs;
use std::path::Path;

const HEADER: &str = "\
# Drift simulation config
#
# [pool]      particles per polygon, life range and random-walk coefficients
# [hull]      near-duplicate merge distance (squared) and winding
# [polygons]  population limit, spawn/react radii and focus walk

";

pub fn run(path: &str, force: bool) -> Result<()> {
    let target = Path::new(path);
    if target.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path);
    }

    let body = SimConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    fs::write(target, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write '{}'", path))?;

    println!("Wrote default config to {}", path);
    Ok(())
}
