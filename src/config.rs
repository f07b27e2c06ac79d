//! Engine parameters.

use std::f32::consts::FRAC_PI_2;

use thiserror::Error;

/// Slowest accepted rotation speed, in radians per tick.
///
/// Below this the f32 angle sum can stop growing before it reaches a quarter
/// turn, and the turn would never finish.
pub const MIN_ROTATION_SPEED: f32 = 1e-4;

/// Order in which queued moves are admitted once the current turn finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueueOrder {
    /// Submission order.
    #[default]
    Fifo,
    /// Most recently submitted first.
    Lifo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Edge length of one cubie.
    pub cube_size: f32,
    /// Gap between neighbouring cubies.
    pub cube_spacing: f32,
    /// Angle advanced per tick, in radians.
    pub rotation_speed: f32,
    pub queue_order: QueueOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cube_size: 3.0,
            cube_spacing: 0.5,
            rotation_speed: 0.1,
            queue_order: QueueOrder::Fifo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cube size must be a positive finite number, got {0}")]
    CubeSize(f32),
    #[error("cube spacing must be a non-negative finite number, got {0}")]
    CubeSpacing(f32),
    #[error("rotation speed must be in [1e-4, pi/2) radians per tick, got {0}")]
    RotationSpeed(f32),
}

impl EngineConfig {
    /// Distance between adjacent lattice coordinates.
    pub fn boundary_size(&self) -> f32 {
        self.cube_size + self.cube_spacing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cube_size.is_finite() || self.cube_size <= 0.0 {
            return Err(ConfigError::CubeSize(self.cube_size));
        }
        if !self.cube_spacing.is_finite() || self.cube_spacing < 0.0 {
            return Err(ConfigError::CubeSpacing(self.cube_spacing));
        }
        if !(self.rotation_speed >= MIN_ROTATION_SPEED && self.rotation_speed < FRAC_PI_2) {
            return Err(ConfigError::RotationSpeed(self.rotation_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boundary() {
        let config = EngineConfig::default();
        assert_eq!(config.boundary_size(), 3.5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = EngineConfig::default();
        let cases = [
            (
                EngineConfig { cube_size: 0.0, ..base },
                ConfigError::CubeSize(0.0),
            ),
            (
                EngineConfig { cube_spacing: -0.5, ..base },
                ConfigError::CubeSpacing(-0.5),
            ),
            (
                EngineConfig { rotation_speed: 0.0, ..base },
                ConfigError::RotationSpeed(0.0),
            ),
            (
                EngineConfig { rotation_speed: 1e-8, ..base },
                ConfigError::RotationSpeed(1e-8),
            ),
            (
                EngineConfig { rotation_speed: 2.0, ..base },
                ConfigError::RotationSpeed(2.0),
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
        assert!(EngineConfig { rotation_speed: f32::NAN, ..base }
            .validate()
            .is_err());
    }

    #[test]
    fn test_accepts_slowest_speed() {
        let config = EngineConfig {
            rotation_speed: MIN_ROTATION_SPEED,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
