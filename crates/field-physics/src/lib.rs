//! # Field Physics
//!
//! Particle data and the per-particle rules of the hero particle field:
//! pointer attraction, speed cap, edge bounce and link opacity.

pub mod constants;
pub mod forces;
pub mod particle;
pub mod pointer;

pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use pointer::*;
