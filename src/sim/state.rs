//! Demo state shared between the render loop and input producers
//!
//! Everything the frame loop reads or writes lives in one struct so a single
//! lock can guard it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::animation::AnimationSet;
use super::physics::{Bounds, Orientation};
use crate::clock::{ClockFace, GLYPH_HEIGHT, GlyphError, GlyphTable, Snapshot};
use crate::settings::Settings;

/// Complete demo state
#[derive(Debug, Clone)]
pub struct DemoState {
    pub settings: Settings,
    /// Canvas size; zero until the first resize
    pub bounds: Bounds,
    pub font: GlyphTable,
    pub face: ClockFace,
    pub animations: AnimationSet,
    /// Latest tilt reading, `None` for plain gravity
    pub orientation: Option<Orientation>,
    /// Countdown shown on the previous frame
    pub previous: Option<Snapshot>,
    /// Wall-clock time of the previous frame
    pub last_frame_millis: Option<u64>,
    /// Frames ticked so far
    pub frame: u64,
    pub rng: Pcg32,
}

impl DemoState {
    pub fn new(settings: Settings) -> Result<Self, GlyphError> {
        let font = GlyphTable::standard()?;
        let face = ClockFace::new(&settings.palette, settings.ball.radius);
        let rng = Pcg32::seed_from_u64(settings.seed);
        Ok(Self {
            settings,
            bounds: Bounds::default(),
            font,
            face,
            animations: AnimationSet::new(),
            orientation: None,
            previous: None,
            last_frame_millis: None,
            frame: 0,
            rng,
        })
    }

    /// True once the surface has a usable size
    pub fn has_surface(&self) -> bool {
        self.bounds.width > 0.0 && self.bounds.height > 0.0
    }

    /// New canvas size: re-lay out the clock face, keep its lit state
    pub fn on_surface_resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        self.face
            .layout(self.bounds, &self.settings.ball, &self.settings.clock);
        log::info!("Surface resized to {}x{}", width, height);
    }

    /// Spawn a random digit's worth of balls centered on the touch point
    ///
    /// Returns the number of balls spawned.
    pub fn on_touch(&mut self, x: f32, y: f32) -> usize {
        let digit = self.rng.random_range(0..10);
        let Some(glyph) = self.font.glyph(digit) else {
            return 0;
        };
        let pitch = self.settings.ball.pitch();
        // Anchor so the glyph's middle column pair and row sit under the finger
        let anchor_x = x - pitch * 1.5;
        let anchor_y = y - pitch * (GLYPH_HEIGHT as f32 - 1.0) * 0.5;
        self.animations.spawn_from_touch(
            &mut self.rng,
            anchor_x,
            anchor_y,
            glyph,
            &self.settings.palette,
            &self.settings.ball,
        )
    }

    pub fn on_orientation(&mut self, orientation: Option<Orientation>) {
        self.orientation = orientation;
    }
}
