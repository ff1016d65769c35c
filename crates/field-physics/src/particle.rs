//! Particle type for the hero particle field

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::constants::{INITIAL_SPEED, MAX_RADIUS, MIN_RADIUS};

/// A drifting point of the field.
///
/// Plain `f32` arrays so the whole particle buffer can be handed to the GPU or
/// dumped without conversion.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in logical pixels
    pub position: [f32; 2],
    /// Velocity in logical pixels per frame
    pub velocity: [f32; 2],
    /// Radius in logical pixels
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position: position.to_array(),
            velocity: velocity.to_array(),
            radius,
        }
    }

    /// Spawn a particle uniformly inside `bounds` with a small random drift
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2) -> Self {
        Self::random_with(rng, bounds, INITIAL_SPEED, MIN_RADIUS, MAX_RADIUS)
    }

    /// Same as [`Particle::random`] with explicit speed and radius ranges
    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Vec2,
        initial_speed: f32,
        min_radius: f32,
        max_radius: f32,
    ) -> Self {
        let position = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );
        let velocity = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * initial_speed,
            (rng.random::<f32>() * 2.0 - 1.0) * initial_speed,
        );
        let radius = min_radius + rng.random::<f32>() * (max_radius - min_radius);

        Self::new(position, velocity, radius)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position.to_array();
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity.to_array();
    }
}
