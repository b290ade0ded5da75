//! Drift Core - Foundational types for the Drift hull simulation
//!
//! This crate provides the types that all other Drift crates depend on:
//! - `Vec2`, `Vec3` - Minimal vector arithmetic, plus `signed_angle`
//! - `PolygonId` - Stable polygon identifiers
//! - `FrameDigest` - SHA-256 digest of simulation output
//! - Error types and Result alias

mod digest;
mod error;
mod id;
mod types;

pub use digest::{DigestBuilder, FrameDigest};
pub use error::{DriftError, Result};
pub use id::PolygonId;
pub use types::{signed_angle, Vec2, Vec3};
