//! Draw list output
//!
//! The simulation does not draw. Each frame it hands the renderer a flat list
//! of circles: clock cells first, then animating balls on top.

pub mod instance;

pub use instance::CircleInstance;

use crate::sim::DemoState;

/// Every circle visible this frame
pub fn draw_list(state: &DemoState) -> Vec<CircleInstance> {
    let mut list = Vec::with_capacity(state.face.cells().count() + state.animations.len());
    list.extend(state.face.cells().map(CircleInstance::from));
    list.extend(state.animations.iter().map(CircleInstance::from));
    list
}

/// Raw bytes of a draw list, ready for a GPU buffer
///
/// A GPU front end uploads these as an instance buffer with one 16-byte
/// record per circle: center `x, y` and radius as `f32`, then the packed
/// `0xRRGGBBAA` color as `u32`.
pub fn as_bytes(list: &[CircleInstance]) -> &[u8] {
    bytemuck::cast_slice(list)
}
