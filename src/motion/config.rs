//! Movement Configuration
//!
//! Author-supplied tuning for one character, plus the jump constants
//! derived from it. Configuration is validated once, when a controller
//! is built, and never changes afterwards.
//!
//! ## Jump derivation
//!
//! A body launched upward at `v0` under constant gravity `g` reaches its
//! apex height `h` at time `t` where `v0 = -g·t` and `h = -v0²/(2g)`:
//!
//! ```text
//! max_jump_velocity = 2h / t
//! gravity           = -max_jump_velocity / t      (= -2h / t²)
//! min_jump_velocity = sqrt(2·|gravity|·min_h)
//! ```

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::vec2::Vec2;

/// Errors raised while loading or validating a [`MovementConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `time_to_jump_apex` is zero or negative; gravity would be undefined.
    #[error("time_to_jump_apex must be > 0, got {0}")]
    NonPositiveApexTime(f32),

    /// A field is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Offending field name
        field: &'static str,
    },

    /// A field that must be non-negative is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Offending field name
        field: &'static str,
        /// Value supplied
        value: f32,
    },

    /// `min_jump_height` exceeds `max_jump_height`.
    #[error("min_jump_height ({min}) exceeds max_jump_height ({max})")]
    JumpHeightOrder {
        /// Tapped-jump height
        min: f32,
        /// Held-jump height
        max: f32,
    },

    /// `max_slope_angle` outside `[0, 90)` degrees.
    #[error("max_slope_angle must be in [0, 90) degrees, got {0}")]
    SlopeAngle(f32),

    /// JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Environment override is not a number.
    #[error("environment variable {var} is not a number: {value:?}")]
    Env {
        /// Variable name
        var: &'static str,
        /// Raw value found
        value: String,
    },
}

/// Tuning for one character.
///
/// Field names follow the JSON config format (`snake_case`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Apex height (world units) when jump is held
    pub max_jump_height: f32,
    /// Apex height when jump is tapped and released immediately
    pub min_jump_height: f32,
    /// Seconds from take-off to apex for a held jump
    pub time_to_jump_apex: f32,

    /// Horizontal speed at full directional input (units/sec)
    pub move_speed: f32,
    /// Steepest walkable slope in degrees. Used by the collider, not the controller.
    pub max_slope_angle: f32,
    /// Horizontal smoothing time while grounded
    pub acceleration_time_grounded: f32,
    /// Horizontal smoothing time while airborne
    pub acceleration_time_airborne: f32,

    /// Velocity for a jump while pressing into the wall (x away from wall, y up)
    pub wall_jump_climb: Vec2,
    /// Velocity for a jump with no horizontal input
    pub wall_jump_off: Vec2,
    /// Velocity for a jump while pressing away from the wall
    pub wall_leap: Vec2,
    /// Terminal downward speed while wall sliding
    pub wall_slide_speed_max: f32,
    /// Seconds of input away from the wall tolerated before detaching
    pub wall_stick_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_jump_height: 4.0,
            min_jump_height: 1.0,
            time_to_jump_apex: 0.4,
            move_speed: 6.0,
            max_slope_angle: 80.0,
            acceleration_time_grounded: 0.1,
            acceleration_time_airborne: 0.2,
            wall_jump_climb: Vec2::new(7.5, 16.0),
            wall_jump_off: Vec2::new(8.5, 7.0),
            wall_leap: Vec2::new(18.0, 17.0),
            wall_slide_speed_max: 3.0,
            wall_stick_time: 0.25,
        }
    }
}

impl MovementConfig {
    /// Parse from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Apply `MOTOR_*` environment overrides on top of this config.
    ///
    /// Recognised: `MOTOR_MOVE_SPEED`, `MOTOR_MAX_JUMP_HEIGHT`,
    /// `MOTOR_MIN_JUMP_HEIGHT`, `MOTOR_TIME_TO_JUMP_APEX`,
    /// `MOTOR_WALL_STICK_TIME`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        override_from_env("MOTOR_MOVE_SPEED", &mut self.move_speed)?;
        override_from_env("MOTOR_MAX_JUMP_HEIGHT", &mut self.max_jump_height)?;
        override_from_env("MOTOR_MIN_JUMP_HEIGHT", &mut self.min_jump_height)?;
        override_from_env("MOTOR_TIME_TO_JUMP_APEX", &mut self.time_to_jump_apex)?;
        override_from_env("MOTOR_WALL_STICK_TIME", &mut self.wall_stick_time)?;
        self.validate()?;
        Ok(self)
    }

    /// Check every field.
    ///
    /// A zero or negative `time_to_jump_apex` is rejected outright; there is
    /// no fallback gravity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("max_jump_height", self.max_jump_height),
            ("min_jump_height", self.min_jump_height),
            ("time_to_jump_apex", self.time_to_jump_apex),
            ("move_speed", self.move_speed),
            ("max_slope_angle", self.max_slope_angle),
            ("acceleration_time_grounded", self.acceleration_time_grounded),
            ("acceleration_time_airborne", self.acceleration_time_airborne),
            ("wall_slide_speed_max", self.wall_slide_speed_max),
            ("wall_stick_time", self.wall_stick_time),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        let vectors = [
            ("wall_jump_climb", self.wall_jump_climb),
            ("wall_jump_off", self.wall_jump_off),
            ("wall_leap", self.wall_leap),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.time_to_jump_apex <= 0.0 {
            return Err(ConfigError::NonPositiveApexTime(self.time_to_jump_apex));
        }

        for (field, value) in scalars {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.min_jump_height > self.max_jump_height {
            return Err(ConfigError::JumpHeightOrder {
                min: self.min_jump_height,
                max: self.max_jump_height,
            });
        }

        if self.max_slope_angle >= 90.0 {
            return Err(ConfigError::SlopeAngle(self.max_slope_angle));
        }

        Ok(())
    }
}

fn override_from_env(var: &'static str, slot: &mut f32) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(var) {
        *slot = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var, value: value.clone() })?;
    }
    Ok(())
}

// =============================================================================
// JUMP KINEMATICS
// =============================================================================

/// Constants derived once from a [`MovementConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpKinematics {
    /// Downward acceleration (negative)
    pub gravity: f32,
    /// Take-off speed reaching `max_jump_height`
    pub max_jump_velocity: f32,
    /// Upward speed kept after an early release, reaching `min_jump_height`
    pub min_jump_velocity: f32,
}

impl JumpKinematics {
    /// Derive gravity and jump speeds.
    pub fn derive(config: &MovementConfig) -> Result<Self, ConfigError> {
        let t = config.time_to_jump_apex;
        if !(t > 0.0) {
            return Err(ConfigError::NonPositiveApexTime(t));
        }

        let max_jump_velocity = 2.0 * config.max_jump_height / t;
        let gravity = -max_jump_velocity / t;
        let min_jump_velocity = (2.0 * gravity.abs() * config.min_jump_height).sqrt();

        Ok(Self {
            gravity,
            max_jump_velocity,
            min_jump_velocity,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
