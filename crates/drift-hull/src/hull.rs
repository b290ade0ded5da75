//! Gift-wrapping hull engine

use drift_core::{signed_angle, DriftError, Result, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Traversal direction of the produced hull, in a y-up frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Sweep direction at the anchor
    fn start_direction(self) -> Vec2 {
        match self {
            Winding::CounterClockwise => Vec2::X,
            Winding::Clockwise => Vec2::NEG_X,
        }
    }

    /// Turning angle from `dir` to `v` in this winding, in `(-PI, PI]`.
    /// A fully reversed direction always maps to `PI`. `None` for a zero offset.
    fn turn(self, dir: Offset, v: Offset) -> Option<f64> {
        let angle = signed_angle(dir.to_array(), v.to_array())?;
        let angle = match self {
            Winding::CounterClockwise => angle,
            Winding::Clockwise => -angle,
        };
        // atan2(-0.0, x < 0) yields -PI
        Some(if angle <= -PI { PI } else { angle })
    }
}

/// Offset between two points, held in f64 so differences of finite f32
/// coordinates cannot overflow
#[derive(Debug, Clone, Copy, PartialEq)]
struct Offset {
    x: f64,
    y: f64,
}

impl Offset {
    fn between(from: Vec2, to: Vec2) -> Self {
        Self {
            x: to.x as f64 - from.x as f64,
            y: to.y as f64 - from.y as f64,
        }
    }

    fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<Vec2> for Offset {
    fn from(v: Vec2) -> Self {
        Self {
            x: v.x as f64,
            y: v.y as f64,
        }
    }
}

/// Hull settings (the `[hull]` TOML table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    /// Points closer than `sqrt(epsilon_sq)` to an already kept point are merged
    pub epsilon_sq: f32,
    pub winding: Winding,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon_sq: 4.0,
            winding: Winding::CounterClockwise,
        }
    }
}

impl HullConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon_sq.is_finite() && self.epsilon_sq >= 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "hull.epsilon_sq must be a finite non-negative number, got {}",
                self.epsilon_sq
            )));
        }
        Ok(())
    }
}

/// Computes convex hulls by gift wrapping. Stateless apart from its settings.
#[derive(Debug, Clone, Default)]
pub struct HullEngine {
    config: HullConfig,
}

impl HullEngine {
    pub fn new(config: HullConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// Keep points in input order, dropping any point within epsilon of one
    /// already kept. Exact duplicates and non-finite points are always dropped.
    pub fn deduplicate(&self, points: &[Vec2]) -> Vec<Vec2> {
        let mut kept: Vec<Vec2> = Vec::with_capacity(points.len());
        for &p in points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            let crowded = kept
                .iter()
                .any(|k| *k == p || k.distance_squared(&p) < self.config.epsilon_sq);
            if !crowded {
                kept.push(p);
            }
        }
        kept
    }

    /// Ordered hull vertices, starting at the lowest point (ties: leftmost).
    ///
    /// Zero points give an empty hull, one point a single vertex, two points
    /// both of them. The output never repeats a vertex.
    pub fn compute_hull(&self, points: &[Vec2]) -> Vec<Vec2> {
        let mut candidates = self.deduplicate(points);
        let Some(anchor_index) = anchor_index(&candidates) else {
            return Vec::new();
        };

        let anchor = candidates.remove(anchor_index);
        let mut hull = vec![anchor];
        let mut curr = anchor;
        let mut dir = Offset::from(self.config.winding.start_direction());

        while let Some(best) = self.next_vertex(curr, dir, &candidates) {
            let next = candidates[best];
            if next == anchor {
                break;
            }
            candidates.remove(best);
            // The anchor becomes selectable again only once we have left it
            if curr == anchor {
                candidates.push(anchor);
            }
            dir = Offset::between(curr, next);
            curr = next;
            hull.push(next);
        }

        hull
    }

    /// Index of the candidate with the smallest turn from `dir`. Strict
    /// comparison: on equal angles the earliest candidate wins.
    fn next_vertex(&self, curr: Vec2, dir: Offset, candidates: &[Vec2]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &c) in candidates.iter().enumerate() {
            let Some(angle) = self.config.winding.turn(dir, Offset::between(curr, c)) else {
                continue;
            };
            match best {
                Some((_, best_angle)) if angle >= best_angle => {}
                _ => best = Some((i, angle)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Lowest y, ties broken by lowest x; the first such point in input order
fn anchor_index(points: &[Vec2]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        match best {
            Some(b) if !(p.y < points[b].y || (p.y == points[b].y && p.x < points[b].x)) => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_particles::{ParticleRng, RandomSource};

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn engine() -> HullEngine {
        HullEngine::default()
    }

    /// Every point must lie on or to the left of every CCW edge
    fn assert_encloses(hull: &[Vec2], points: &[Vec2]) {
        for i in 0..hull.len() {
            let a = hull[i];
            let b = hull[(i + 1) % hull.len()];
            for p in points {
                let side = (b - a).perp_dot(&(*p - a));
                assert!(side >= -1e-2, "point {:?} outside edge {:?} -> {:?}", p, a, b);
            }
        }
    }

    #[test]
    fn square_with_interior_point() {
        let points = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(2.0, 2.0)];
        let hull = engine().compute_hull(&points);
        assert_eq!(hull, vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)]);
    }

    #[test]
    fn square_in_shuffled_order_starts_at_anchor() {
        let points = [v(2.0, 2.0), v(0.0, 4.0), v(4.0, 4.0), v(4.0, 0.0), v(0.0, 0.0)];
        let hull = engine().compute_hull(&points);
        assert_eq!(hull, vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)]);
    }

    #[test]
    fn clockwise_winding_reverses_the_square() {
        let engine = HullEngine::new(HullConfig {
            winding: Winding::Clockwise,
            ..HullConfig::default()
        })
        .unwrap();
        let points = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(2.0, 2.0)];
        let hull = engine.compute_hull(&points);
        assert_eq!(hull, vec![v(0.0, 0.0), v(0.0, 4.0), v(4.0, 4.0), v(4.0, 0.0)]);
    }

    #[test]
    fn degenerate_inputs() {
        let e = engine();
        assert!(e.compute_hull(&[]).is_empty());
        assert_eq!(e.compute_hull(&[v(3.0, 1.0)]), vec![v(3.0, 1.0)]);

        let pair = e.compute_hull(&[v(10.0, 10.0), v(0.0, 0.0)]);
        assert_eq!(pair, vec![v(0.0, 0.0), v(10.0, 10.0)]);
    }

    #[test]
    fn anchor_ties_break_on_x() {
        let hull = engine().compute_hull(&[v(10.0, 0.0), v(0.0, 0.0), v(5.0, 10.0)]);
        assert_eq!(hull[0], v(0.0, 0.0));
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn near_duplicates_merge_into_first_seen() {
        let e = engine();
        assert_eq!(e.compute_hull(&[v(1.0, 1.0), v(2.0, 1.5)]), vec![v(1.0, 1.0)]);

        let kept = e.deduplicate(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 0.0), v(0.0, 0.0)]);
        // (1,1) is at distance^2 2 < 4; (2,0) is exactly at 4 and survives
        assert_eq!(kept, vec![v(0.0, 0.0), v(2.0, 0.0)]);
    }

    #[test]
    fn zero_epsilon_still_drops_exact_duplicates() {
        let e = HullEngine::new(HullConfig {
            epsilon_sq: 0.0,
            ..HullConfig::default()
        })
        .unwrap();
        let hull = e.compute_hull(&[v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)]);
        assert_eq!(hull, vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)]);
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let hull = engine().compute_hull(&[v(f32::NAN, 0.0), v(0.0, 0.0), v(f32::INFINITY, 5.0)]);
        assert_eq!(hull, vec![v(0.0, 0.0)]);
    }

    #[test]
    fn equal_angles_keep_first_candidate() {
        let e = engine();

        let far_first = e.compute_hull(&[v(0.0, 0.0), v(20.0, 0.0), v(10.0, 0.0), v(0.0, 20.0)]);
        assert_eq!(far_first, vec![v(0.0, 0.0), v(20.0, 0.0), v(0.0, 20.0)]);

        let near_first = e.compute_hull(&[v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0), v(0.0, 20.0)]);
        assert_eq!(
            near_first,
            vec![v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0), v(0.0, 20.0)]
        );
    }

    #[test]
    fn collinear_input_does_not_loop() {
        let hull = engine().compute_hull(&[v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0)]);
        assert_eq!(hull, vec![v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0)]);
    }

    #[test]
    fn anchor_closes_the_loop_exactly_once() {
        let points = [v(0.0, 0.0), v(10.0, 2.0), v(12.0, 9.0), v(3.0, 11.0), v(-4.0, 6.0)];
        let hull = engine().compute_hull(&points);
        assert_eq!(hull.len(), 5);
        assert_eq!(hull.iter().filter(|p| **p == v(0.0, 0.0)).count(), 1);
        assert_encloses(&hull, &points);
    }

    #[test]
    fn random_clouds_are_enclosed() {
        let mut rng = ParticleRng::new(0xBEEF);
        let e = engine();
        for _ in 0..200 {
            let n = rng.range_u32(3, 40) as usize;
            let points: Vec<Vec2> = (0..n)
                .map(|_| v(rng.range(0.0, 100.0), rng.range(0.0, 100.0)))
                .collect();
            let hull = e.compute_hull(&points);
            let kept = e.deduplicate(&points);

            assert!(hull.len() <= kept.len());
            for (i, a) in hull.iter().enumerate() {
                assert!(kept.contains(a));
                assert!(!hull[i + 1..].contains(a), "vertex repeated");
            }
            if hull.len() >= 3 {
                assert_encloses(&hull, &kept);
            }
        }
    }

    #[test]
    fn hull_is_deterministic() {
        let mut rng = ParticleRng::new(99);
        let points: Vec<Vec2> = (0..32)
            .map(|_| v(rng.range(-50.0, 50.0), rng.range(-50.0, 50.0)))
            .collect();
        let e = engine();
        assert_eq!(e.compute_hull(&points), e.compute_hull(&points));
    }

    #[test]
    fn adding_a_near_duplicate_keeps_the_hull() {
        let points = vec![v(0.0, 0.0), v(30.0, 5.0), v(25.0, 30.0), v(-5.0, 20.0), v(10.0, 10.0)];
        let e = engine();
        let before = e.compute_hull(&points);

        let mut with_dup = points.clone();
        with_dup.push(v(30.5, 5.5));
        with_dup.push(v(0.0, 0.0));
        assert_eq!(e.compute_hull(&with_dup), before);
    }

    #[test]
    fn extreme_coordinates_still_close_the_hull() {
        let points = [
            v(0.0, 0.0),
            v(3e38, 0.0),
            v(3e38, 3e38),
            v(0.0, 3e38),
            v(-3e38, 1e38),
        ];
        let hull = engine().compute_hull(&points);
        assert_eq!(hull, points.to_vec());
    }

    #[test]
    fn reversal_is_never_the_smallest_turn() {
        let back = Offset::from(Vec2::NEG_X);
        let ahead = Offset::from(Vec2::X);
        let turn = Winding::CounterClockwise.turn(ahead, back).unwrap();
        assert_eq!(turn, PI);
        let turn = Winding::Clockwise.turn(ahead, back).unwrap();
        assert_eq!(turn, PI);
        assert!(Winding::Clockwise.turn(ahead, Offset::from(Vec2::ZERO)).is_none());
    }

    #[test]
    fn negative_epsilon_rejected() {
        let config = HullConfig {
            epsilon_sq: -1.0,
            ..HullConfig::default()
        };
        assert!(HullEngine::new(config).is_err());
    }

    #[test]
    fn parse_from_toml() {
        let config: HullConfig = toml::from_str("winding = \"clockwise\"").unwrap();
        assert_eq!(config.winding, Winding::Clockwise);
        assert!((config.epsilon_sq - 4.0).abs() < 1e-6);
    }
}
