//! Pool configuration (parsed from the `[pool]` TOML table)

use crate::motion::Langevin;
use drift_core::{DriftError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on slots per pool
pub const MAX_CAPACITY: u32 = 4096;

/// When a new pool populates its slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Fill every slot at construction
    Eager,
    /// Start empty; steady-state steps top up missing slots
    Lazy,
}

/// Distribution of the random direction fed to the motion model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseShape {
    /// Unit vector on the circle
    Circle,
    /// Unit vector on the sphere, projected onto the plane (length <= 1)
    Sphere,
}

/// Configuration shared by every pool an orchestrator creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Smallest capacity a new pool may be given (inclusive)
    pub capacity_min: u32,
    /// Largest capacity a new pool may be given (inclusive)
    pub capacity_max: u32,
    /// Lower bound of the spawn life range (inclusive)
    pub life_min: u32,
    /// Upper bound of the spawn life range (exclusive)
    pub life_max: u32,
    /// Draw radius handed to the renderer
    pub radius: f32,
    pub fill: FillPolicy,
    /// Noise amplitude of the random walk
    pub noise: f32,
    /// Velocity damping coefficient
    pub damping: f32,
    pub noise_shape: NoiseShape,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity_min: 32,
            capacity_max: 32,
            life_min: 256,
            life_max: 512,
            radius: 4.0,
            fill: FillPolicy::Eager,
            noise: 0.75,
            damping: 0.1,
            noise_shape: NoiseShape::Circle,
        }
    }
}

impl PoolConfig {
    /// Reject capacities, ranges and coefficients the pool cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.capacity_min == 0 || self.capacity_min > MAX_CAPACITY {
            return Err(out_of_range(
                "pool.capacity_min",
                1.0,
                MAX_CAPACITY as f64,
                self.capacity_min as f64,
            ));
        }
        if self.capacity_max < self.capacity_min || self.capacity_max > MAX_CAPACITY {
            return Err(out_of_range(
                "pool.capacity_max",
                self.capacity_min as f64,
                MAX_CAPACITY as f64,
                self.capacity_max as f64,
            ));
        }
        if self.life_min == 0 || self.life_max <= self.life_min {
            return Err(DriftError::InvalidConfig(format!(
                "pool life range [{}, {}) must be non-empty and start above zero",
                self.life_min, self.life_max
            )));
        }
        if !(self.radius > 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "pool.radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "pool.noise must be a finite non-negative number, got {}",
                self.noise
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(out_of_range("pool.damping", 0.0, 1.0, self.damping as f64));
        }
        Ok(())
    }

    /// Motion model described by this configuration
    pub fn motion(&self) -> Langevin {
        Langevin {
            noise: self.noise,
            damping: self.damping,
        }
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> DriftError {
    DriftError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = PoolConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.life_max > config.life_min);
        assert_eq!(config.fill, FillPolicy::Eager);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
capacity_min = 8
capacity_max = 24
life_min = 32
life_max = 128
fill = "lazy"
noise_shape = "sphere"
"#;
        let config: PoolConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.capacity_min, 8);
        assert_eq!(config.capacity_max, 24);
        assert_eq!(config.life_min, 32);
        assert_eq!(config.fill, FillPolicy::Lazy);
        assert_eq!(config.noise_shape, NoiseShape::Sphere);
        // Unset fields keep their defaults
        assert!((config.noise - 0.75).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = PoolConfig {
            capacity_min: 0,
            ..PoolConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DriftError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn inverted_capacity_range_rejected() {
        let config = PoolConfig {
            capacity_min: 16,
            capacity_max: 8,
            ..PoolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_life_range_rejected() {
        let config = PoolConfig {
            life_min: 64,
            life_max: 64,
            ..PoolConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DriftError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_positive_radius_rejected() {
        let config = PoolConfig {
            radius: 0.0,
            ..PoolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn noise_must_be_finite_and_non_negative() {
        for noise in [-0.5, f32::INFINITY, f32::NAN] {
            let config = PoolConfig {
                noise,
                ..PoolConfig::default()
            };
            assert!(config.validate().is_err(), "noise {} accepted", noise);
        }
        let still = PoolConfig {
            noise: 0.0,
            ..PoolConfig::default()
        };
        assert!(still.validate().is_ok());
    }
}
