//! Drift Particles - slot-recycling particle pool
//!
//! Provides the per-polygon particle population:
//! - Arena of particle slots indexed by id, with a LIFO free-list
//! - Biased random walk growth, then trail unwinding before death
//! - Steady-state and decaying drive modes
//! - Instance packing for renderers

pub mod config;
pub mod motion;
pub mod particle;
pub mod pool;
pub mod random;

pub use config::{FillPolicy, NoiseShape, PoolConfig};
pub use motion::{Langevin, MotionModel};
pub use particle::{Particle, ParticleInstance};
pub use pool::{ParticlePool, PoolMode};
pub use random::{ParticleRng, RandAdapter, RandomSource, ScriptedRandom};
