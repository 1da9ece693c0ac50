//! Per-frame tick
//!
//! Advances the clock face to the current time, then moves the animating
//! balls by the wall-clock time elapsed since the previous frame.

use super::physics::Steering;
use super::state::DemoState;
use crate::clock::Snapshot;

/// What a single tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Clock cells that switched off and started flying
    pub ejected: usize,
    /// Balls removed for leaving the screen sideways
    pub pruned: usize,
    /// Ball pairs resolved
    pub collisions: usize,
    /// Whether the physics ran this frame
    pub simulated: bool,
}

/// Seconds since the previous frame, clamped to `max_seconds`
pub fn elapsed_seconds(last_millis: Option<u64>, now_millis: u64, max_seconds: f32) -> f32 {
    match last_millis {
        Some(last) => {
            let elapsed = now_millis.saturating_sub(last) as f32 / 1000.0;
            elapsed.min(max_seconds)
        }
        None => 0.0,
    }
}

/// Advance the demo to `now_millis`
pub fn tick(state: &mut DemoState, now_millis: u64) -> TickStats {
    let mut stats = TickStats::default();
    state.frame += 1;

    let snapshot = Snapshot::between(now_millis, state.settings.clock.deadline_millis);
    stats.ejected = state.face.show(
        &snapshot,
        state.previous.as_ref(),
        &state.font,
        &mut state.animations,
        &mut state.rng,
        &state.settings.ball,
        state.settings.capabilities.clock_ejection,
    );
    if stats.ejected > 0 {
        log::debug!("Frame {}: ejected {} cells", state.frame, stats.ejected);
    }
    state.previous = Some(snapshot);

    let physics = &state.settings.physics;
    let dt = elapsed_seconds(state.last_frame_millis, now_millis, physics.max_frame_seconds);
    state.last_frame_millis = Some(now_millis);

    if state.animations.is_empty() || dt <= 0.0 || !state.has_surface() {
        return stats;
    }

    let capabilities = &state.settings.capabilities;
    let steering = if capabilities.steering {
        Steering::from_orientation(state.orientation.as_ref(), dt, physics)
    } else {
        Steering::gravity(dt, physics)
    };

    let step = state
        .animations
        .step(steering, state.bounds, physics, capabilities.collisions);
    stats.pruned = step.pruned;
    stats.collisions = step.collisions;
    stats.simulated = true;
    stats
}
