//! Random sample sources for particle motion and polygon placement

use drift_core::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Rejection-sampling attempts before `unit_vec3` falls back to a direct method
const MAX_REJECTIONS: usize = 16;

/// Capability consumed by the simulation: uniform samples and unit directions.
///
/// Only `next_f32` is required; everything else derives from it, so a seeded
/// or scripted implementation makes every step reproducible.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an integer in [min, max). Returns `min` for an empty range.
    fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min;
        let offset = (self.next_f32() * span as f32) as u32;
        min + offset.min(span - 1)
    }

    /// Returns a random unit direction in the plane
    fn unit_vec2(&mut self) -> Vec2 {
        let angle = self.range(0.0, TAU);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Returns a random unit direction vector (uniformly on sphere surface)
    fn unit_vec3(&mut self) -> Vec3 {
        // Marsaglia method for uniform sphere sampling
        for _ in 0..MAX_REJECTIONS {
            let x = self.range(-1.0, 1.0);
            let y = self.range(-1.0, 1.0);
            let s = x * x + y * y;
            if s < 1.0 {
                let factor = 2.0 * (1.0 - s).sqrt();
                return Vec3::new(x * factor, y * factor, 1.0 - 2.0 * s);
            }
        }
        // Cylinder projection; also uniform, and terminates for any source
        let z = self.range(-1.0, 1.0);
        let planar = self.unit_vec2() * (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(planar.x, planar.y, z)
    }
}

/// Lightweight xorshift32 PRNG, the default source for seeded runs
#[derive(Debug, Clone)]
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for ParticleRng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly, so the result stays below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Adapts any `rand` generator into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RandAdapter<R>(pub R);

impl<R: rand::RngCore> RandomSource for RandAdapter<R> {
    fn next_f32(&mut self) -> f32 {
        use rand::Rng;
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of samples in a loop.
///
/// Useful for tests and for replaying a recorded stream: every `next_f32`
/// returns the next entry, wrapping at the end. Values are clamped into [0, 1).
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// A source that always returns the same sample
    pub fn constant(sample: f32) -> Self {
        Self::new(vec![sample])
    }

    /// Number of samples drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let v = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
