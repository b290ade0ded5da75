//! One particle cloud and the hull wrapped around it

use drift_core::{PolygonId, Result, Vec2};
use drift_hull::HullEngine;
use drift_particles::{FillPolicy, ParticlePool, PoolConfig, PoolMode, RandomSource};

pub struct Polygon {
    id: PolygonId,
    center: Vec2,
    pool: ParticlePool,
    hull: Vec<Vec2>,
    in_range: bool,
}

impl Polygon {
    /// Create a polygon whose particles spawn at `center`. Eager pools are
    /// filled immediately.
    pub fn new(
        id: PolygonId,
        center: Vec2,
        capacity: u32,
        config: &PoolConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        let mut pool = ParticlePool::new(capacity, config)?;
        if config.fill == FillPolicy::Eager {
            pool.fill(center, rng);
        }
        Ok(Self {
            id,
            center,
            pool,
            hull: Vec::new(),
            in_range: true,
        })
    }

    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Read-only view of the particle pool
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Hull computed at the end of the last step
    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    pub fn in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_alive(&self) -> bool {
        self.pool.is_alive()
    }

    /// Drive the pool for one step, then rewrap the hull
    pub fn advance(&mut self, in_range: bool, engine: &HullEngine, rng: &mut dyn RandomSource) {
        if self.in_range != in_range {
            log::debug!(
                "polygon {} {} range",
                self.id,
                if in_range { "entered" } else { "left" }
            );
        }
        self.in_range = in_range;
        let mode = if in_range {
            PoolMode::Steady
        } else {
            PoolMode::Decaying
        };
        self.pool.advance(mode, self.center, rng);
        self.refresh_hull(engine);
    }

    /// Recompute the hull from the pool's live positions
    pub fn refresh_hull(&mut self, engine: &HullEngine) {
        self.hull = engine.compute_hull(&self.pool.live_positions());
    }
}
