//! Physics configuration

use crate::body::BodyDef;
use crate::error::{PhysicsError, Result};
use crate::units::DEFAULT_SCALE;
use serde::{Deserialize, Serialize};

/// Physics space configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Simulation units per world unit. Fixed for the lifetime of a space.
    pub scale: f32,

    /// Gravity vector in world units (default: Earth gravity pointing down the screen)
    pub gravity: [f32; 2],

    /// Fixed timestep for physics simulation
    pub timestep: f32,

    /// Maximum number of substeps per frame
    pub max_substeps: u32,

    /// Solver iterations for velocity
    pub velocity_iterations: usize,

    /// Definition used for bodies created without an explicit one (simulation units)
    pub default_body: BodyDef,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            gravity: [0.0, 9.81 / DEFAULT_SCALE],
            timestep: 1.0 / 60.0,
            max_substeps: 4,
            velocity_iterations: 4,
            default_body: BodyDef::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a configuration for high-precision simulation
    pub fn high_precision() -> Self {
        Self {
            velocity_iterations: 8,
            max_substeps: 8,
            ..Default::default()
        }
    }

    /// Create a configuration for fast simulation (lower quality)
    pub fn fast() -> Self {
        Self {
            velocity_iterations: 2,
            max_substeps: 2,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the space cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig("max_substeps must be at least 1".into()));
        }
        Ok(())
    }

    /// Set scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set gravity (world units)
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = [x, y];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the default body definition
    pub fn with_default_body(mut self, def: BodyDef) -> Self {
        self.default_body = def;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyType;

    #[test]
    fn test_default_is_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
        assert!(PhysicsConfig::fast().validate().is_ok());
        assert!(PhysicsConfig::high_precision().validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = PhysicsConfig::default()
            .with_timestep(1.0 / 120.0)
            .with_default_body(BodyDef::dynamic());

        assert_eq!(config.timestep, 1.0 / 120.0);
        assert_eq!(config.default_body.body_type, BodyType::Dynamic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = PhysicsConfig::from_json(
            r#"{ "scale": 0.01, "default_body": { "body_type": "Dynamic" } }"#,
        )
        .unwrap();
        assert_eq!(config.scale, 0.01);
        assert_eq!(config.max_substeps, 4);
        assert_eq!(config.default_body.body_type, BodyType::Dynamic);
        assert_eq!(config.default_body.gravity_scale, 1.0);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            PhysicsConfig::from_json(r#"{ "scale": 0.0 }"#),
            Err(PhysicsError::InvalidConfig(_))
        ));
        assert!(matches!(
            PhysicsConfig::from_json("{ not json"),
            Err(PhysicsError::Config(_))
        ));
    }
}
