//! Steering force and per-ball integration
//!
//! Velocities are in pixels per frame. The steering force is an increment to
//! that velocity, scaled by the frame's elapsed seconds, and is the same for
//! every ball in a frame.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::settings::PhysicsSettings;

/// Device orientation reported by the sensor adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Raw accelerometer reading; `y < 0` means the device is upside down
    pub gravity: Vec3,
    /// Pitch angle in radians
    pub pitch: f32,
}

impl Orientation {
    #[inline]
    pub fn is_upside_down(&self) -> bool {
        self.gravity.y < 0.0
    }
}

/// Per-frame velocity increment applied to all animating balls
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Steering {
    /// Derive the frame's force from optional tilt
    ///
    /// Without orientation this is plain downward gravity.
    pub fn from_orientation(orientation: Option<&Orientation>, dt: f32, physics: &PhysicsSettings) -> Self {
        match orientation {
            Some(o) => {
                let horizontal = physics.accel_x * (-o.pitch).sin() * dt;
                let mut vertical = physics.accel_y * (-o.pitch).cos() * dt;
                if o.is_upside_down() {
                    vertical = -vertical;
                }
                Self { horizontal, vertical }
            }
            None => Self::gravity(dt, physics),
        }
    }

    pub fn gravity(dt: f32, physics: &PhysicsSettings) -> Self {
        Self {
            horizontal: 0.0,
            vertical: physics.accel_y * dt,
        }
    }

    #[inline]
    pub fn as_vec(&self) -> Vec2 {
        Vec2::new(self.horizontal, self.vertical)
    }
}

/// Visible canvas extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// x is the only axis that removes balls
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        (0.0..=self.width).contains(&x)
    }
}

/// Damped bounce: raise slow balls to the floor speed, then reverse
#[inline]
pub fn bounce(dy: f32, physics: &PhysicsSettings) -> f32 {
    let dy = if dy.abs() < physics.min_bounce_speed {
        physics.min_bounce_speed.copysign(dy)
    } else {
        dy
    };
    dy * -physics.bounce_friction
}

/// Advance one ball by one frame
///
/// Returns false when the ball left the horizontal bounds and must be pruned.
pub fn integrate(ball: &mut Ball, steering: Steering, bounds: Bounds, physics: &PhysicsSettings) -> bool {
    ball.vel += steering.as_vec();

    let pos_y = ball.pos.y + ball.vel.y;
    let through_floor = pos_y > bounds.height && ball.vel.y > 0.0;
    let through_ceiling = physics.bounce_top && pos_y < 0.0 && ball.vel.y < 0.0;
    if through_floor || through_ceiling {
        ball.vel.y = bounce(ball.vel.y, physics);
    }

    ball.pos.x += ball.vel.x;
    ball.pos.y = pos_y;

    bounds.contains_x(ball.pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;
    use std::f32::consts::FRAC_PI_2;

    fn physics() -> PhysicsSettings {
        PhysicsSettings {
            bounce_friction: 0.9,
            min_bounce_speed: 4.0,
            ..Default::default()
        }
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 5.0, Color::DEFAULT_BALL)
    }

    #[test]
    fn test_gravity_without_orientation() {
        let s = Steering::from_orientation(None, 0.5, &physics());
        assert_eq!(s.horizontal, 0.0);
        assert_eq!(s.vertical, physics().accel_y * 0.5);
    }

    #[test]
    fn test_level_orientation_matches_gravity() {
        let o = Orientation {
            gravity: Vec3::new(0.0, 9.8, 0.0),
            pitch: 0.0,
        };
        let s = Steering::from_orientation(Some(&o), 1.0, &physics());
        assert!(s.horizontal.abs() < 1e-6);
        assert!((s.vertical - physics().accel_y).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_moves_force_sideways() {
        let o = Orientation {
            gravity: Vec3::new(9.8, 0.1, 0.0),
            pitch: FRAC_PI_2,
        };
        let s = Steering::from_orientation(Some(&o), 1.0, &physics());
        assert!((s.horizontal + physics().accel_x).abs() < 1e-5);
        assert!(s.vertical.abs() < 1e-5);
    }

    #[test]
    fn test_upside_down_flips_vertical() {
        let o = Orientation {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            pitch: 0.0,
        };
        let s = Steering::from_orientation(Some(&o), 1.0, &physics());
        assert!((s.vertical + physics().accel_y).abs() < 1e-6);
    }

    #[test]
    fn test_fall_then_exact_bounce() {
        let physics = physics();
        let bounds = Bounds::new(200.0, 100.0);
        let steering = Steering {
            horizontal: 0.0,
            vertical: 20.0,
        };
        let mut ball = ball_at(50.0, 10.0);

        assert!(integrate(&mut ball, steering, bounds, &physics));
        assert_eq!(ball.pos.y, 30.0);
        assert_eq!(ball.vel.y, 20.0);

        integrate(&mut ball, steering, bounds, &physics);
        assert_eq!(ball.pos.y, 70.0);
        assert_eq!(ball.vel.y, 40.0);

        // 70 + 60 = 130 crosses the floor while still falling
        integrate(&mut ball, steering, bounds, &physics);
        assert_eq!(ball.pos.y, 130.0);
        assert!((ball.vel.y - (-54.0)).abs() < 1e-4);
    }

    #[test]
    fn test_slow_bounce_raised_to_floor_speed() {
        let physics = physics();
        assert!((bounce(1.0, &physics) - (-3.6)).abs() < 1e-6);
        assert!((bounce(-1.0, &physics) - 3.6).abs() < 1e-6);
        assert!((bounce(10.0, &physics) - (-9.0)).abs() < 1e-6);
    }

    #[test]
    fn test_no_bounce_when_already_rising() {
        let physics = physics();
        let bounds = Bounds::new(200.0, 100.0);
        let mut ball = ball_at(50.0, 150.0).with_velocity(Vec2::new(0.0, -10.0));
        integrate(&mut ball, Steering::default(), bounds, &physics);
        assert_eq!(ball.vel.y, -10.0);
        assert_eq!(ball.pos.y, 140.0);
    }

    #[test]
    fn test_ceiling_bounce_toggle() {
        let bounds = Bounds::new(200.0, 100.0);
        let mut ball = ball_at(50.0, 5.0).with_velocity(Vec2::new(0.0, -10.0));
        integrate(&mut ball, Steering::default(), bounds, &physics());
        assert!((ball.vel.y - 9.0).abs() < 1e-6);

        let open_top = PhysicsSettings {
            bounce_top: false,
            ..physics()
        };
        let mut ball = ball_at(50.0, 5.0).with_velocity(Vec2::new(0.0, -10.0));
        integrate(&mut ball, Steering::default(), bounds, &open_top);
        assert_eq!(ball.vel.y, -10.0);
        assert_eq!(ball.pos.y, -5.0);
    }

    #[test]
    fn test_leaving_x_bounds_reports_prune() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut ball = ball_at(98.0, 50.0).with_velocity(Vec2::new(5.0, 0.0));
        assert!(!integrate(&mut ball, Steering::default(), bounds, &physics()));

        let mut ball = ball_at(2.0, 50.0).with_velocity(Vec2::new(-5.0, 0.0));
        assert!(!integrate(&mut ball, Steering::default(), bounds, &physics()));
    }

    #[test]
    fn test_bounce_speed_never_grows() {
        // Dropped from rest, every floor contact leaves with no more speed than it arrived with
        let physics = PhysicsSettings {
            min_bounce_speed: 0.5,
            ..physics()
        };
        let bounds = Bounds::new(100.0, 100.0);
        let steering = Steering {
            horizontal: 0.0,
            vertical: 0.1,
        };
        let mut ball = ball_at(50.0, 0.0);
        let mut last_rebound = f32::INFINITY;
        for _ in 0..2000 {
            let incoming = ball.vel.y + steering.vertical;
            integrate(&mut ball, steering, bounds, &physics);
            if ball.vel.y < 0.0 && incoming > 0.0 {
                let rebound = -ball.vel.y;
                assert!(rebound <= incoming.max(physics.min_bounce_speed) * physics.bounce_friction + 1e-4);
                assert!(rebound <= last_rebound + 1e-4 || rebound <= physics.min_bounce_speed);
                last_rebound = rebound;
            }
        }
        assert!(ball.pos.y < bounds.height + 2.0);
    }
}
