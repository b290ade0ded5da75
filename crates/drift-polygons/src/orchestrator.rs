//! Drives the polygon population around a moving focus point

use crate::config::{OrchestratorConfig, SimConfig};
use crate::polygon::Polygon;
use crate::render::{PolygonDrawData, Renderer};
use drift_core::{DigestBuilder, PolygonId, Result, Vec2};
use drift_hull::HullEngine;
use drift_particles::{ParticleInstance, PoolConfig, RandomSource};

/// Owns every polygon, the focus walk and the packed draw buffers
pub struct PolygonOrchestrator {
    polygons: Vec<Polygon>,
    engine: HullEngine,
    pool_config: PoolConfig,
    config: OrchestratorConfig,
    focus: Vec2,
    next_id: PolygonId,
    frame: u64,
    /// Instances of every polygon, packed back to back after each step
    instance_buffer: Vec<ParticleInstance>,
    /// Per-polygon (start, count) into `instance_buffer`, parallel to `polygons`
    instance_ranges: Vec<(usize, usize)>,
}

impl PolygonOrchestrator {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let engine = HullEngine::new(config.hull.clone())?;
        if config.polygons.spawn_radius >= config.polygons.react_radius {
            log::warn!(
                "spawn_radius {} is not inside react_radius {}; new polygons may start decaying",
                config.polygons.spawn_radius,
                config.polygons.react_radius
            );
        }
        Ok(Self {
            polygons: Vec::new(),
            engine,
            pool_config: config.pool.clone(),
            config: config.polygons.clone(),
            focus: Vec2::from_array(config.polygons.focus),
            next_id: PolygonId::from_raw(1),
            frame: 0,
            instance_buffer: Vec::new(),
            instance_ranges: Vec::new(),
        })
    }

    /// Create a polygon near the focus unless the population is at its limit.
    /// Draw data is repacked so the new polygon is included.
    pub fn spawn_polygon_if_room(&mut self, rng: &mut dyn RandomSource) -> Result<Option<PolygonId>> {
        let spawned = self.spawn_polygon(rng)?;
        if spawned.is_some() {
            self.pack_instances();
        }
        Ok(spawned)
    }

    fn spawn_polygon(&mut self, rng: &mut dyn RandomSource) -> Result<Option<PolygonId>> {
        if self.polygons.len() >= self.config.max_polygons as usize {
            return Ok(None);
        }

        // sqrt keeps centers uniform over the disc rather than bunched at the focus
        let offset = rng.unit_vec2() * (self.config.spawn_radius * rng.next_f32().sqrt());
        let center = self.focus + offset;
        let capacity = rng.range_u32(
            self.pool_config.capacity_min,
            self.pool_config.capacity_max + 1,
        );

        let id = self.next_id;
        let polygon = Polygon::new(id, center, capacity, &self.pool_config, rng)?;
        self.next_id = id.next();
        self.polygons.push(polygon);
        log::debug!(
            "spawned polygon {} at ({:.1}, {:.1}) with {} slots",
            id,
            center.x,
            center.y,
            capacity
        );
        Ok(Some(id))
    }

    /// Drop polygons whose pools have no active particle left, repacking
    /// draw data if any were removed. Returns the number removed.
    pub fn reap_polygons(&mut self) -> usize {
        let reaped = self.remove_dead_polygons();
        if reaped > 0 {
            self.pack_instances();
        }
        reaped
    }

    fn remove_dead_polygons(&mut self) -> usize {
        let before = self.polygons.len();
        self.polygons.retain(|p| {
            let alive = p.is_alive();
            if !alive {
                log::debug!("reaped polygon {}", p.id());
            }
            alive
        });
        before - self.polygons.len()
    }

    pub fn advance_focus(&mut self) {
        self.focus += Vec2::from_array(self.config.focus_velocity);
    }

    /// Strict comparison against the squared reaction radius
    pub fn is_in_range(&self, center: Vec2) -> bool {
        in_range(center, self.focus, self.config.react_radius * self.config.react_radius)
    }

    /// One simulation step: reap, spawn, drive every pool, rewrap hulls,
    /// move the focus and repack draw data.
    pub fn step(&mut self, rng: &mut dyn RandomSource) -> Result<()> {
        self.remove_dead_polygons();
        self.spawn_polygon(rng)?;

        let react_sq = self.config.react_radius * self.config.react_radius;
        for polygon in &mut self.polygons {
            let reacting = in_range(polygon.center(), self.focus, react_sq);
            polygon.advance(reacting, &self.engine, rng);
        }

        self.advance_focus();
        self.pack_instances();
        self.frame += 1;
        Ok(())
    }

    fn pack_instances(&mut self) {
        self.instance_buffer.clear();
        self.instance_ranges.clear();

        for polygon in &self.polygons {
            let start = self.instance_buffer.len();
            polygon.pool().pack_instances(&mut self.instance_buffer);
            self.instance_ranges
                .push((start, self.instance_buffer.len() - start));
        }
    }

    /// Draw data for each polygon, as of the last step
    pub fn draw_data(&self) -> Vec<PolygonDrawData<'_>> {
        self.polygons
            .iter()
            .zip(&self.instance_ranges)
            .map(|(polygon, &(start, count))| PolygonDrawData {
                id: polygon.id(),
                center: polygon.center(),
                in_range: polygon.in_range(),
                instances: &self.instance_buffer[start..start + count],
                hull: polygon.hull(),
            })
            .collect()
    }

    /// Hand the last step's draw data to a renderer
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame(self.frame, self.focus);
        for data in self.draw_data() {
            renderer.draw_polygon(&data);
        }
        renderer.end_frame();
    }

    /// Feed the current frame into a digest: every polygon's positions and hull
    pub fn digest_frame(&self, builder: &mut DigestBuilder) {
        builder.frame(self.frame);
        for polygon in &self.polygons {
            builder.points(polygon.id().raw(), &polygon.pool().live_positions());
            builder.points(polygon.id().raw(), polygon.hull());
        }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Active particles across all polygons, as of the last step
    pub fn total_particles(&self) -> usize {
        self.instance_buffer.len()
    }

    pub fn focus(&self) -> Vec2 {
        self.focus
    }

    /// Steps taken so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// A polygon reacts to the focus while its center is strictly inside the
/// reaction disc
fn in_range(center: Vec2, focus: Vec2, react_sq: f32) -> bool {
    center.distance_squared(&focus) < react_sq
}
