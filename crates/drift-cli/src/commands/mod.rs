//! CLI command implementations

pub mod hull;
pub mod init;
pub mod run;
pub mod watch;

use anyhow::{Context, Result};
use drift_particles::{ParticleRng, RandAdapter, RandomSource};
use drift_polygons::SimConfig;
use rand::SeedableRng;

/// Which generator backs the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RngKind {
    /// Built-in xorshift32
    Xorshift,
    /// `rand`'s StdRng
    Std,
}

/// Load the config file if given, otherwise the defaults
pub fn load_config(path: Option<&str>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Ok(SimConfig::default()),
    }
}

pub fn make_rng(kind: RngKind, seed: u64) -> Box<dyn RandomSource> {
    match kind {
        RngKind::Xorshift => Box::new(ParticleRng::new((seed ^ (seed >> 32)) as u32)),
        RngKind::Std => Box::new(RandAdapter(rand::rngs::StdRng::seed_from_u64(seed))),
    }
}
