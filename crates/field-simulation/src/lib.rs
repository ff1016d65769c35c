//! # Field Simulation
//!
//! The hero particle field and the lifecycle that drives it: tunable
//! parameters, the particle set itself, the host abstraction over frame
//! scheduling and event listeners, and the animator state machine.

pub mod animator;
pub mod error;
pub mod field;
pub mod frame;
pub mod host;
pub mod params;

pub use animator::*;
pub use error::*;
pub use field::*;
pub use frame::*;
pub use host::*;
pub use params::*;
