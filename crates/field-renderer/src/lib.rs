//! # Field Renderer
//!
//! Draws the hero particle field: links and glow discs are tessellated on the
//! CPU into one triangle mesh, which a single wgpu pipeline paints.

pub mod color;
pub mod mesh;
pub mod renderer;
pub mod tessellate;
mod vertex;

pub use color::*;
pub use mesh::*;
pub use renderer::*;
pub use tessellate::*;
