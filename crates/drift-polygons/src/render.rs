//! Renderer seam: what the simulation hands out each frame

use drift_core::{PolygonId, Vec2};
use drift_particles::ParticleInstance;

/// Draw data for one polygon, consumed by the renderer
#[derive(Debug, Clone, Copy)]
pub struct PolygonDrawData<'a> {
    pub id: PolygonId,
    pub center: Vec2,
    /// Whether the polygon was driven steady-state this step
    pub in_range: bool,
    pub instances: &'a [ParticleInstance],
    /// Ordered hull vertices; the closing edge back to the first is implied
    pub hull: &'a [Vec2],
}

/// Draws particles and hulls. Implemented outside the simulation core.
pub trait Renderer {
    fn begin_frame(&mut self, _frame: u64, _focus: Vec2) {}

    fn draw_polygon(&mut self, polygon: &PolygonDrawData<'_>);

    fn end_frame(&mut self) {}
}
