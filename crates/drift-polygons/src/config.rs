//! Simulation configuration loaded from TOML

use drift_core::{DriftError, Result};
use drift_hull::HullConfig;
use drift_particles::PoolConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Polygon population and focus settings (the `[polygons]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Maximum number of simultaneously live polygons
    pub max_polygons: u32,
    /// New polygon centers are drawn uniformly from this disc around the focus
    pub spawn_radius: f32,
    /// Polygons within this distance of the focus stay steady-state
    pub react_radius: f32,
    /// Initial focus position
    pub focus: [f32; 2],
    /// Focus displacement per step
    pub focus_velocity: [f32; 2],
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_polygons: 8,
            spawn_radius: 200.0,
            react_radius: 400.0,
            focus: [0.0, 0.0],
            focus_velocity: [1.5, 0.0],
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_polygons == 0 {
            return Err(DriftError::InvalidConfig(
                "polygons.max_polygons must be at least 1".to_string(),
            ));
        }
        if !(self.spawn_radius.is_finite() && self.spawn_radius >= 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "polygons.spawn_radius must be a finite non-negative number, got {}",
                self.spawn_radius
            )));
        }
        if !(self.react_radius.is_finite() && self.react_radius > 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "polygons.react_radius must be positive, got {}",
                self.react_radius
            )));
        }
        if !self.focus.iter().chain(&self.focus_velocity).all(|c| c.is_finite()) {
            return Err(DriftError::InvalidConfig(
                "polygons.focus and polygons.focus_velocity must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the default random source
    pub seed: u64,
    /// Steps to run when the caller does not say otherwise
    pub steps: u64,
    pub pool: PoolConfig,
    pub hull: HullConfig,
    pub polygons: OrchestratorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0xDEAD_BEEF,
            steps: 600,
            pool: PoolConfig::default(),
            hull: HullConfig::default(),
            polygons: OrchestratorConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document. Missing tables and keys keep
    /// their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        self.hull.validate()?;
        self.polygons.validate()
    }
}
