//! Constants for the hero particle field
//!
//! Distances are in logical pixels, velocities in logical pixels per frame.

/// Pointer influence radius. Particles further away are not attracted.
pub const POINTER_RADIUS: f32 = 160.0;

/// Velocity added per unit of pointer displacement while inside [`POINTER_RADIUS`]
pub const POINTER_ATTRACTION: f32 = 0.000035;

/// Per-axis speed cap
pub const MAX_SPEED: f32 = 0.6;

/// Maximum distance between two particles that still get a link
pub const LINK_DISTANCE: f32 = 130.0;

/// Opacity of a link between two coincident particles
pub const LINK_OPACITY: f32 = 0.3;

/// Link stroke width
pub const LINK_WIDTH: f32 = 0.8;

/// Half-range of the initial per-axis velocity, i.e. velocities start in [-0.25, 0.25]
pub const INITIAL_SPEED: f32 = 0.25;

/// Smallest particle radius
pub const MIN_RADIUS: f32 = 1.0;

/// Largest particle radius
pub const MAX_RADIUS: f32 = 2.5;

/// Drawn disc radius as a multiple of the particle radius
pub const GLOW_RADIUS_SCALE: f32 = 2.5;

/// Radial gradient extent as a multiple of the particle radius
pub const GRADIENT_RADIUS_SCALE: f32 = 3.0;

/// Surfaces narrower than this get [`SMALL_COUNT`] particles
pub const SMALL_WIDTH: f32 = 600.0;

/// Surfaces narrower than this (but not small) get [`MEDIUM_COUNT`] particles
pub const MEDIUM_WIDTH: f32 = 1024.0;

pub const SMALL_COUNT: usize = 40;
pub const MEDIUM_COUNT: usize = 60;
pub const LARGE_COUNT: usize = 90;

/// Pointer coordinate used before the first pointer event, far outside any surface
pub const POINTER_SENTINEL: f32 = -999.0;
