//! Particle types: simulation state and renderer instance data

use bytemuck::{Pod, Zeroable};
use drift_core::Vec2;

/// Simulation state of one particle
#[derive(Debug, Clone)]
pub struct Particle {
    /// Slot index in the owning pool
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Past positions, oldest first; starts as `[spawn position]`
    pub trail: Vec<Vec2>,
    /// Growth steps left; the particle unwinds once this reaches zero
    pub remaining_life: u32,
    pub is_active: bool,
}

impl Particle {
    pub fn new(id: u32, at: Vec2, life: u32) -> Self {
        Self {
            id,
            position: at,
            velocity: Vec2::ZERO,
            trail: vec![at],
            remaining_life: life,
            is_active: true,
        }
    }

    /// True while the particle is still walking forward
    pub fn is_growing(&self) -> bool {
        self.remaining_life > 0
    }

    /// Integrate one growth step with the given acceleration
    pub fn grow(&mut self, acceleration: Vec2) {
        self.velocity += acceleration;
        self.position += self.velocity;
        self.trail.push(self.position);
        self.remaining_life -= 1;
    }

    /// Replay one trail entry backwards; deactivates once the trail is spent
    pub fn unwind(&mut self) {
        if let Some(previous) = self.trail.pop() {
            self.position = previous;
        }
        if self.trail.is_empty() {
            self.is_active = false;
        }
    }
}

/// Renderer instance data. 16 bytes: position, draw radius, slot id.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub id: u32,
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle, radius: f32) -> Self {
        Self {
            position: p.position.to_array(),
            radius,
            id: p.id,
        }
    }
}
