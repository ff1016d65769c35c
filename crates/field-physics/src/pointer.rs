use glam::Vec2;

use crate::constants::POINTER_SENTINEL;

/// Last known pointer or touch position, in logical pixels.
///
/// Starts at a far-off sentinel so nothing is attracted before the first
/// interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
}

impl PointerState {
    pub fn at(position: Vec2) -> Self {
        Self { position }
    }

    pub fn is_sentinel(&self) -> bool {
        self.position == Vec2::splat(POINTER_SENTINEL)
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vec2::splat(POINTER_SENTINEL),
        }
    }
}
