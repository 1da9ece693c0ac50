//! Ball simulation module
//!
//! All per-frame logic lives here. Nothing in this module blocks, touches the
//! platform, or draws:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the animation set)
//! - One steering force per frame, shared by every ball

pub mod animation;
pub mod ball;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use animation::{AnimationSet, StepStats};
pub use ball::{Ball, Color};
pub use collision::{collides, resolve_all, resolve_collision};
pub use physics::{Bounds, Orientation, Steering, bounce, integrate};
pub use state::DemoState;
pub use tick::{TickStats, elapsed_seconds, tick};
