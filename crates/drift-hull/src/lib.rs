//! Drift Hull - convex hull of particle positions
//!
//! Gift wrapping (Jarvis march) over a deduplicated point set. Points closer
//! than a configurable epsilon are merged before wrapping, so clustered
//! particles never produce zero-length edges.

mod hull;

pub use hull::{HullConfig, HullEngine, Winding};
