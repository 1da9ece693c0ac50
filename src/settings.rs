//! Demo settings and tuning constants
//!
//! Every number the simulation depends on lives here so a JSON file can
//! retune the demo without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MIN_RADIUS;
use crate::sim::Color;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Size and launch speed of spawned balls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    /// Radius of every ball and clock cell (pixels)
    pub radius: f32,
    /// Gap between neighbouring cells (pixels)
    pub spacing: f32,
    /// Launch velocity range, pixels per frame
    pub min_dx: f32,
    pub max_dx: f32,
    pub min_dy: f32,
    pub max_dy: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: 6.0,
            spacing: 2.0,
            min_dx: -4.0,
            max_dx: 4.0,
            min_dy: -12.0,
            max_dy: -2.0,
        }
    }
}

impl BallSettings {
    /// Distance between neighbouring cell centers
    #[inline]
    pub fn pitch(&self) -> f32 {
        2.0 * self.radius + self.spacing
    }
}

/// Force and bounce tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Horizontal steering acceleration (pixels per frame, per second)
    pub accel_x: f32,
    /// Vertical steering acceleration (pixels per frame, per second)
    pub accel_y: f32,
    /// Fraction of vertical speed kept after a bounce
    pub bounce_friction: f32,
    /// Speed a bounce is raised to before damping
    pub min_bounce_speed: f32,
    /// Bounce off the top edge as well as the bottom
    pub bounce_top: bool,
    /// Longest frame interval fed to the force integration (seconds)
    pub max_frame_seconds: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            accel_x: 8.0,
            accel_y: 8.0,
            bounce_friction: 0.90,
            min_bounce_speed: 2.0,
            bounce_top: true,
            max_frame_seconds: 0.1,
        }
    }
}

/// Countdown target and clock face layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Deadline as Unix epoch milliseconds
    pub deadline_millis: u64,
    /// Gap between the two digits of a field (pixels)
    pub digit_spacing: f32,
    /// Gap between fields (pixels)
    pub field_spacing: f32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            // 2011-05-10 09:00 America/Los_Angeles
            deadline_millis: 1_305_043_200_000,
            digit_spacing: 8.0,
            field_spacing: 24.0,
        }
    }
}

/// Features that can be switched off independently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Tilt steers gravity (otherwise always straight down)
    pub steering: bool,
    /// Animating balls collide with each other
    pub collisions: bool,
    /// Clock cells that turn off fly away
    pub clock_ejection: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            steering: true,
            collisions: true,
            clock_ejection: true,
        }
    }
}

/// All demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ball: BallSettings,
    pub physics: PhysicsSettings,
    pub clock: ClockSettings,
    pub capabilities: Capabilities,
    /// Accent colors, one per clock field (days, hours, minutes, seconds)
    pub palette: Vec<Color>,
    /// RNG seed for spawn velocities, colors and glyph choice
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball: BallSettings::default(),
            physics: PhysicsSettings::default(),
            clock: ClockSettings::default(),
            capabilities: Capabilities::default(),
            palette: vec![
                Color::rgb(0x33, 0xb5, 0xe5),
                Color::rgb(0xaa, 0x66, 0xcc),
                Color::rgb(0x99, 0xcc, 0x00),
                Color::rgb(0xff, 0x44, 0x44),
            ],
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Settings with every pixel length and speed scaled by a display density
    pub fn scaled(&self, density: f32) -> Self {
        let mut settings = self.clone();
        let ball = &mut settings.ball;
        ball.radius *= density;
        ball.spacing *= density;
        ball.min_dx *= density;
        ball.max_dx *= density;
        ball.min_dy *= density;
        ball.max_dy *= density;

        let physics = &mut settings.physics;
        physics.accel_x *= density;
        physics.accel_y *= density;
        physics.min_bounce_speed *= density;

        settings.clock.digit_spacing *= density;
        settings.clock.field_spacing *= density;
        settings
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if !(self.ball.radius.is_finite() && self.ball.radius >= MIN_RADIUS) {
            return invalid("ball.radius", "must be at least the minimum ball radius");
        }
        if self.ball.spacing < 0.0 {
            return invalid("ball.spacing", "must not be negative");
        }
        if self.ball.min_dx > self.ball.max_dx {
            return invalid("ball.min_dx", "must not exceed ball.max_dx");
        }
        if self.ball.min_dy > self.ball.max_dy {
            return invalid("ball.min_dy", "must not exceed ball.max_dy");
        }
        let friction = self.physics.bounce_friction;
        if !(friction > 0.0 && friction <= 1.0) {
            return invalid("physics.bounce_friction", "must be in (0, 1]");
        }
        if self.physics.min_bounce_speed < 0.0 {
            return invalid("physics.min_bounce_speed", "must not be negative");
        }
        if self.physics.max_frame_seconds <= 0.0 {
            return invalid("physics.max_frame_seconds", "must be positive");
        }
        if self.clock.digit_spacing < 0.0 || self.clock.field_spacing < 0.0 {
            return invalid("clock", "spacings must not be negative");
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
