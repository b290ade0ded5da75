//! Drift Polygons - particle clouds wrapped in convex hulls
//!
//! A `PolygonOrchestrator` owns a population of polygons. Each polygon is a
//! particle pool centered near a moving focus point, plus the hull of its
//! live particles. Every step the orchestrator:
//! - reaps polygons whose pools have died out
//! - spawns a polygon near the focus when below the limit
//! - drives each pool steady-state (in range of the focus) or decaying
//! - recomputes every hull and packs draw data for a `Renderer`

pub mod config;
pub mod orchestrator;
pub mod polygon;
pub mod render;

pub use config::{OrchestratorConfig, SimConfig};
pub use orchestrator::PolygonOrchestrator;
pub use polygon::Polygon;
pub use render::{PolygonDrawData, Renderer};
