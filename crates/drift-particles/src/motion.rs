//! Motion strategies for growing particles

use drift_core::Vec2;

/// Maps the current velocity and a bounded random sample to an acceleration.
///
/// Implementations are stateless; the pool draws the sample and integrates.
pub trait MotionModel {
    fn acceleration(&self, velocity: Vec2, sample: Vec2) -> Vec2;
}

/// Biased random walk: scaled noise plus linear velocity damping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Langevin {
    /// Scale applied to the random sample
    pub noise: f32,
    /// Damping coefficient `k` in `-k * velocity`
    pub damping: f32,
}

impl Default for Langevin {
    fn default() -> Self {
        Self {
            noise: 0.75,
            damping: 0.1,
        }
    }
}

impl MotionModel for Langevin {
    fn acceleration(&self, velocity: Vec2, sample: Vec2) -> Vec2 {
        sample * self.noise + velocity * -self.damping
    }
}
