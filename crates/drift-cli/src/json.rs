//! Renderer that records frames as serializable JSON records

use drift_core::Vec2;
use drift_polygons::{PolygonDrawData, Renderer};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub focus: [f32; 2],
    pub polygons: Vec<PolygonRecord>,
}

#[derive(Debug, Serialize)]
pub struct PolygonRecord {
    pub id: u64,
    pub center: [f32; 2],
    pub in_range: bool,
    /// `[x, y, radius]` per active particle
    pub particles: Vec<[f32; 3]>,
    pub hull: Vec<[f32; 2]>,
}

/// Builds one [`FrameRecord`] per rendered frame; the caller takes and writes it
#[derive(Default)]
pub struct JsonRenderer {
    current: Option<FrameRecord>,
}

impl JsonRenderer {
    pub fn take_frame(&mut self) -> Option<FrameRecord> {
        self.current.take()
    }
}

impl Renderer for JsonRenderer {
    fn begin_frame(&mut self, frame: u64, focus: Vec2) {
        self.current = Some(FrameRecord {
            frame,
            focus: focus.to_array(),
            polygons: Vec::new(),
        });
    }

    fn draw_polygon(&mut self, polygon: &PolygonDrawData<'_>) {
        let Some(frame) = self.current.as_mut() else {
            return;
        };
        frame.polygons.push(PolygonRecord {
            id: polygon.id.raw(),
            center: polygon.center.to_array(),
            in_range: polygon.in_range,
            particles: polygon
                .instances
                .iter()
                .map(|i| [i.position[0], i.position[1], i.radius])
                .collect(),
            hull: polygon.hull.iter().map(Vec2::to_array).collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::PolygonId;
    use drift_particles::ParticleInstance;

    #[test]
    fn records_one_frame() {
        let instances = [ParticleInstance {
            position: [1.0, 2.0],
            radius: 4.0,
            id: 0,
        }];
        let hull = [Vec2::new(1.0, 2.0)];
        let mut renderer = JsonRenderer::default();

        renderer.begin_frame(3, Vec2::new(0.5, 0.0));
        renderer.draw_polygon(&PolygonDrawData {
            id: PolygonId::from_raw(9),
            center: Vec2::ZERO,
            in_range: true,
            instances: &instances,
            hull: &hull,
        });
        renderer.end_frame();

        let frame = renderer.take_frame().unwrap();
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["frame"], 3);
        assert_eq!(json["polygons"][0]["id"], 9);
        assert_eq!(json["polygons"][0]["particles"][0][2], 4.0);
        assert_eq!(json["polygons"][0]["hull"].as_array().unwrap().len(), 1);
        assert!(renderer.take_frame().is_none());
    }
}
