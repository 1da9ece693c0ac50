//! The set of free-flying balls
//!
//! Balls enter through a touch spawn or by being ejected from the clock face
//! and leave once they drift past the left or right edge.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::ball::{Ball, Color};
use super::collision::resolve_all;
use super::physics::{Bounds, Steering, integrate};
use crate::clock::Glyph;
use crate::random_in;
use crate::settings::{BallSettings, PhysicsSettings};

/// Dynamic collection of animating balls
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    balls: Vec<Ball>,
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub pruned: usize,
    pub collisions: usize,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Mutable access for callers that nudge balls directly
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn clear(&mut self) {
        self.balls.clear();
    }

    pub fn push(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Spawn one ball per lit cell of `glyph`, laid out on a grid anchored at (x, y)
    ///
    /// Returns the number of balls spawned.
    pub fn spawn_from_touch<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        x: f32,
        y: f32,
        glyph: &Glyph,
        palette: &[Color],
        ball: &BallSettings,
    ) -> usize {
        let anchor = Vec2::new(x, y);
        let pitch = ball.pitch();
        let before = self.balls.len();
        if palette.is_empty() {
            log::warn!("Empty palette, spawning {:?} balls", Color::DEFAULT_BALL);
        }

        for (col, row) in glyph.lit_cells() {
            let pos = anchor + crate::grid_offset(col, row, pitch);
            let color = match palette.choose(rng) {
                Some(&color) => color,
                None => Color::DEFAULT_BALL,
            };
            let vel = random_velocity(rng, ball);
            self.balls.push(Ball::new(pos, ball.radius, color).with_velocity(vel));
        }

        let spawned = self.balls.len() - before;
        log::debug!("Touch at ({:.0}, {:.0}) spawned {} balls", x, y, spawned);
        spawned
    }

    /// Detach a clock cell that just switched off
    ///
    /// A moving copy of the cell joins the set; the cell itself stays put and
    /// is reset to unlit.
    pub fn eject_cell<R: Rng + ?Sized>(&mut self, rng: &mut R, cell: &mut Ball, ball: &BallSettings) {
        let vel = random_velocity(rng, ball);
        self.balls
            .push(Ball::new(cell.pos, cell.radius(), cell.color).with_velocity(vel));
        cell.color = Color::UNLIT;
    }

    /// Advance every ball by one frame, prune the ones past the x bounds,
    /// then resolve collisions among the survivors
    pub fn step(
        &mut self,
        steering: Steering,
        bounds: Bounds,
        physics: &PhysicsSettings,
        collisions: bool,
    ) -> StepStats {
        let before = self.balls.len();
        self.balls
            .retain_mut(|ball| integrate(ball, steering, bounds, physics));
        let pruned = before - self.balls.len();

        let collisions = if collisions {
            resolve_all(&mut self.balls)
        } else {
            0
        };

        StepStats { pruned, collisions }
    }
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, ball: &BallSettings) -> Vec2 {
    Vec2::new(
        random_in(rng, ball.min_dx, ball.max_dx),
        random_in(rng, ball.min_dy, ball.max_dy),
    )
}
