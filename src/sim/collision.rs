//! Ball-ball collision detection and response
//!
//! Detection is a swept test: two balls collide if they overlap now, or if
//! their relative motion over the next frame brings their centers closer
//! than the sum of their radii. Acceleration applied during the frame is
//! ignored.

use glam::Vec2;

use super::ball::Ball;
use crate::consts::COINCIDENT_EPSILON;

/// Swept-sphere collision predicate
///
/// With `dp`, `dv` the relative position and velocity of `b` with respect to
/// `a` and `r` the combined radius, the pair touches within the frame when
/// `|dp + t*dv| < r` has a root for some `t`.
pub fn collides(a: &Ball, b: &Ball) -> bool {
    let dp = b.pos - a.pos;
    let dv = b.vel - a.vel;
    let r = a.radius() + b.radius();

    let pp = dp.length_squared() - r * r;
    if pp < 0.0 {
        // Already overlapping
        return true;
    }

    let pv = dp.dot(dv);
    if pv >= 0.0 {
        // Moving apart
        return false;
    }

    let vv = dv.length_squared();
    if (pv + vv) <= 0.0 && (vv + 2.0 * pv + pp) >= 0.0 {
        // Closest approach lies beyond this frame and the end position is clear
        return false;
    }

    let discriminant = pv * pv - pp * vv;
    discriminant > 0.0
}

/// Separate two colliding balls and exchange their normal velocities
///
/// Positions are corrected so the centers end up exactly `r` apart, half the
/// shift going to each ball. If the balls are approaching along the contact
/// normal their normal velocity components are swapped (equal masses,
/// perfectly elastic); tangential components are untouched.
pub fn resolve_collision(a: &mut Ball, b: &mut Ball) {
    let delta = a.pos - b.pos;
    let d = delta.length();
    let r = a.radius() + b.radius();

    let (normal, mtd) = if d > COINCIDENT_EPSILON {
        (delta / d, delta * ((r - d) / d))
    } else {
        // Coincident centers have no center line, push apart along +X
        (Vec2::X, Vec2::X * r)
    };

    a.pos += mtd * 0.5;
    b.pos -= mtd * 0.5;

    let vn = (a.vel - b.vel).dot(normal);
    if vn > 0.0 {
        return;
    }

    let impulse = normal * vn;
    a.vel -= impulse;
    b.vel += impulse;
}

/// Check every unordered pair once and resolve the ones that collide
///
/// Returns the number of pairs resolved.
pub fn resolve_all(balls: &mut [Ball]) -> usize {
    let mut resolved = 0;
    for i in 1..balls.len() {
        let (head, tail) = balls.split_at_mut(i);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            if collides(a, b) {
                resolve_collision(a, b);
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, dx: f32, dy: f32, radius: f32) -> Ball {
        Ball::new(Vec2::new(x, y), radius, Color::DEFAULT_BALL).with_velocity(Vec2::new(dx, dy))
    }

    #[test]
    fn test_overlapping_at_rest_collides_and_separates() {
        let mut a = ball(0.0, 0.0, 0.0, 0.0, 5.0);
        let mut b = ball(8.0, 0.0, 0.0, 0.0, 5.0);
        assert!(collides(&a, &b));

        resolve_collision(&mut a, &mut b);
        assert!((a.pos.distance(b.pos) - 10.0).abs() < 1e-5);
        // Shift split evenly: each moved by 1
        assert!((a.pos.x - (-1.0)).abs() < 1e-5);
        assert!((b.pos.x - 9.0).abs() < 1e-5);
        assert_eq!(a.vel, Vec2::ZERO);
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_separating_pair_never_collides() {
        let a = ball(0.0, 0.0, -3.0, 0.0, 5.0);
        let b = ball(10.5, 0.0, 3.0, 0.0, 5.0);
        assert!(!collides(&a, &b));

        let far = ball(500.0, 500.0, 50.0, 50.0, 5.0);
        assert!(!collides(&a, &far));
    }

    #[test]
    fn test_fast_approach_is_caught_between_frames() {
        // 30 px apart, closing at 40 px/frame: would tunnel with a discrete test
        let a = ball(0.0, 0.0, 20.0, 0.0, 5.0);
        let b = ball(40.0, 0.0, -20.0, 0.0, 5.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_slow_approach_out_of_reach() {
        let a = ball(0.0, 0.0, 1.0, 0.0, 5.0);
        let b = ball(40.0, 0.0, -1.0, 0.0, 5.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_miss_passing_by() {
        // Approaching, but offset far enough sideways to pass
        let a = ball(0.0, 0.0, 0.0, 0.0, 5.0);
        let b = ball(20.0, 15.0, -40.0, 0.0, 5.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_head_on_exchanges_velocity() {
        let mut a = ball(0.0, 0.0, 3.0, 0.0, 5.0);
        let mut b = ball(9.0, 0.0, -1.0, 0.0, 5.0);
        resolve_collision(&mut a, &mut b);
        assert!((a.vel.x - (-1.0)).abs() < 1e-5);
        assert!((b.vel.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_glancing_keeps_tangential_velocity() {
        let mut a = ball(0.0, 0.0, 2.0, 5.0, 5.0);
        let mut b = ball(9.0, 0.0, 0.0, 0.0, 5.0);
        resolve_collision(&mut a, &mut b);
        assert!(a.vel.x.abs() < 1e-5);
        assert!((a.vel.y - 5.0).abs() < 1e-5);
        assert!((b.vel.x - 2.0).abs() < 1e-5);
        assert!(b.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_separating_velocity_only_corrects_position() {
        let mut a = ball(0.0, 0.0, -2.0, 0.0, 5.0);
        let mut b = ball(8.0, 0.0, 2.0, 0.0, 5.0);
        resolve_collision(&mut a, &mut b);
        assert_eq!(a.vel, Vec2::new(-2.0, 0.0));
        assert_eq!(b.vel, Vec2::new(2.0, 0.0));
        assert!((a.pos.distance(b.pos) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_centers_do_not_produce_nan() {
        let mut a = ball(50.0, 50.0, 0.0, 1.0, 5.0);
        let mut b = ball(50.0, 50.0, 0.0, -1.0, 5.0);
        assert!(collides(&a, &b));
        resolve_collision(&mut a, &mut b);
        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(a.vel.is_finite() && b.vel.is_finite());
        assert!((a.pos.distance(b.pos) - 10.0).abs() < 1e-4);
        assert!(a.pos.x > b.pos.x);
    }

    #[test]
    fn test_resolve_all_visits_each_pair_once() {
        let mut balls = vec![
            ball(0.0, 0.0, 0.0, 0.0, 5.0),
            ball(8.0, 0.0, 0.0, 0.0, 5.0),
            ball(200.0, 0.0, 0.0, 0.0, 5.0),
        ];
        assert_eq!(resolve_all(&mut balls), 1);
        assert!((balls[0].pos.distance(balls[1].pos) - 10.0).abs() < 1e-5);
        assert_eq!(balls[2].pos, Vec2::new(200.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_collides_is_symmetric(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
            adx in -30.0f32..30.0, ady in -30.0f32..30.0,
            bdx in -30.0f32..30.0, bdy in -30.0f32..30.0,
            ar in 1.0f32..20.0, br in 1.0f32..20.0,
        ) {
            let a = ball(ax, ay, adx, ady, ar);
            let b = ball(bx, by, bdx, bdy, br);
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn prop_resolved_overlap_ends_touching(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            ox in -4.0f32..4.0, oy in -4.0f32..4.0,
        ) {
            prop_assume!(ox.abs() + oy.abs() > 0.5);
            let mut a = ball(ax, ay, 0.0, 0.0, 3.0);
            let mut b = ball(ax + ox, ay + oy, 0.0, 0.0, 3.0);
            prop_assume!(collides(&a, &b));
            resolve_collision(&mut a, &mut b);
            prop_assert!((a.pos.distance(b.pos) - 6.0).abs() < 1e-3);
        }
    }
}
