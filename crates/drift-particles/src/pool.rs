//! Fixed-capacity particle pool with slot id recycling
//!
//! Particles live in an arena of `capacity` slots indexed by their id. Free
//! ids sit on a LIFO free-list, so the union of free ids and live ids is
//! always exactly `0..capacity` with no overlap. Ids are only ever taken in
//! `spawn` and returned in `reap`.

use crate::config::{NoiseShape, PoolConfig, MAX_CAPACITY};
use crate::motion::{Langevin, MotionModel};
use crate::particle::{Particle, ParticleInstance};
use crate::random::RandomSource;
use drift_core::{DriftError, Result, Vec2};

/// How the owner drives a pool for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolMode {
    /// Refill every free slot, keeping the population constant
    Steady,
    /// Stop spawning and send every particle into its unwind phase
    Decaying,
}

/// Arena of particle slots plus the free-list of unused ids
pub struct ParticlePool<M = Langevin> {
    slots: Vec<Option<Particle>>,
    free_ids: Vec<u32>,
    life_min: u32,
    life_max: u32,
    radius: f32,
    noise_shape: NoiseShape,
    motion: M,
}

impl ParticlePool<Langevin> {
    /// Create an empty pool using the Langevin motion described by `config`
    pub fn new(capacity: u32, config: &PoolConfig) -> Result<Self> {
        Self::with_motion(capacity, config, config.motion())
    }
}

impl<M: MotionModel> ParticlePool<M> {
    /// Create an empty pool with a custom motion strategy
    pub fn with_motion(capacity: u32, config: &PoolConfig, motion: M) -> Result<Self> {
        config.validate()?;
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(DriftError::ValueOutOfRange {
                field: "capacity".to_string(),
                min: 1.0,
                max: MAX_CAPACITY as f64,
                value: capacity as f64,
            });
        }

        // Reversed so the first allocations hand out 0, 1, 2, ...
        let free_ids = (0..capacity).rev().collect();
        let slots = (0..capacity).map(|_| None).collect();

        Ok(Self {
            slots,
            free_ids,
            life_min: config.life_min,
            life_max: config.life_max,
            radius: config.radius,
            noise_shape: config.noise_shape,
            motion,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Particles currently holding a slot, active or not
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_ids.len()
    }

    pub fn free_count(&self) -> usize {
        self.free_ids.len()
    }

    /// Unallocated ids; the next `spawn` takes from the end
    pub fn free_ids(&self) -> &[u32] {
        &self.free_ids
    }

    pub fn get(&self, id: u32) -> Option<&Particle> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Particles holding a slot, in id order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    /// Spawn up to `count` particles at `at`. Returns how many were created;
    /// zero when the pool is full.
    pub fn spawn(&mut self, count: usize, at: Vec2, rng: &mut dyn RandomSource) -> usize {
        let mut spawned = 0;
        while spawned < count {
            let Some(id) = self.free_ids.pop() else {
                break;
            };
            let life = rng.range_u32(self.life_min, self.life_max);
            let slot = &mut self.slots[id as usize];
            assert!(slot.is_none(), "free id {id} already holds a particle");
            *slot = Some(Particle::new(id, at, life));
            spawned += 1;
        }
        spawned
    }

    /// Spawn into every free slot
    pub fn fill(&mut self, at: Vec2, rng: &mut dyn RandomSource) -> usize {
        self.spawn(self.free_ids.len(), at, rng)
    }

    /// Advance every active particle by one step: grow while it has life
    /// left, otherwise unwind its trail.
    pub fn step(&mut self, rng: &mut dyn RandomSource) {
        for p in self.slots.iter_mut().flatten() {
            if !p.is_active {
                continue;
            }
            if p.is_growing() {
                let sample = match self.noise_shape {
                    NoiseShape::Circle => rng.unit_vec2(),
                    NoiseShape::Sphere => rng.unit_vec3().xy(),
                };
                p.grow(self.motion.acceleration(p.velocity, sample));
            } else {
                p.unwind();
            }
        }
    }

    /// Destroy inactive particles and return their ids to the free-list.
    /// Returns the number of particles removed.
    pub fn reap(&mut self) -> usize {
        let dead: Vec<u32> = self
            .particles()
            .filter(|p| !p.is_active)
            .map(|p| p.id)
            .collect();
        for &id in &dead {
            self.release(id);
        }
        if !dead.is_empty() {
            log::trace!("reaped {} particle(s), {} free", dead.len(), self.free_ids.len());
        }
        dead.len()
    }

    /// Zero every particle's remaining life so it starts unwinding
    pub fn force_decay(&mut self) {
        for p in self.slots.iter_mut().flatten() {
            p.remaining_life = 0;
        }
    }

    /// One full step in the given mode: reap, then refill (steady) or force
    /// decay (decaying), then step.
    pub fn advance(&mut self, mode: PoolMode, at: Vec2, rng: &mut dyn RandomSource) {
        self.reap();
        match mode {
            PoolMode::Steady => {
                self.fill(at, rng);
            }
            PoolMode::Decaying => self.force_decay(),
        }
        self.step(rng);
    }

    /// Positions of the active particles, in id order
    pub fn live_positions(&self) -> Vec<Vec2> {
        self.particles()
            .filter(|p| p.is_active)
            .map(|p| p.position)
            .collect()
    }

    /// True iff at least one particle is active
    pub fn is_alive(&self) -> bool {
        self.particles().any(|p| p.is_active)
    }

    /// Append renderer instances for the active particles to `out`
    pub fn pack_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.extend(
            self.particles()
                .filter(|p| p.is_active)
                .map(|p| ParticleInstance::from_particle(p, self.radius)),
        );
    }

    fn release(&mut self, id: u32) {
        let taken = self.slots.get_mut(id as usize).and_then(Option::take);
        assert!(taken.is_some(), "released slot {id} that was not live");
        self.free_ids.push(id);
    }
}
