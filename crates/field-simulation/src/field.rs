//! The hero particle field
//!
//! A CPU simulation: the field holds at most a few hundred particles, so the
//! pairwise link pass is cheap enough to run every frame on the UI thread.

use field_physics::{advance, link_opacity, Particle, PointerState};
use field_physics::{GLOW_RADIUS_SCALE, GRADIENT_RADIUS_SCALE};
use rand::Rng;

use crate::frame::{FrameOutput, Glow, Link};
use crate::host::SurfaceSize;
use crate::params::FieldParams;

pub struct ParticleField {
    particles: Vec<Particle>,
    size: SurfaceSize,
    generation: u64,
}

impl ParticleField {
    /// Spawn a fresh particle set sized for `size`
    pub fn new<R: Rng + ?Sized>(size: SurfaceSize, params: &FieldParams, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            size,
            generation: 0,
        };
        field.regenerate(size, params, rng);
        field
    }

    /// Throw away every particle and spawn a new set for `size`.
    ///
    /// Nothing is carried over from the previous set, not even positions.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        size: SurfaceSize,
        params: &FieldParams,
        rng: &mut R,
    ) {
        let bounds = size.as_vec2();
        let count = params.particle_count(size.width);

        self.size = size;
        self.generation += 1;
        self.particles.clear();
        self.particles.extend((0..count).map(|_| {
            Particle::random_with(
                rng,
                bounds,
                params.initial_speed,
                params.min_radius,
                params.max_radius,
            )
        }));

        log::debug!(
            "field generation {}: {} particles for {:.0}x{:.0}",
            self.generation,
            count,
            size.width,
            size.height
        );
    }

    /// Advance every particle by one frame
    pub fn step(&mut self, pointer: &PointerState, params: &FieldParams) {
        let bounds = self.size.as_vec2();
        for particle in &mut self.particles {
            advance(
                particle,
                pointer.position,
                bounds,
                params.pointer_radius,
                params.pointer_attraction,
                params.max_speed,
            );
        }
    }

    /// Collect links and glows for the current particle positions into `out`
    pub fn write_frame(&self, params: &FieldParams, out: &mut FrameOutput) {
        out.clear();
        out.bounds = self.size.as_vec2();

        for (i, p) in self.particles.iter().enumerate() {
            let a = p.position();
            for q in &self.particles[i + 1..] {
                let b = q.position();
                if let Some(opacity) =
                    link_opacity(a.distance(b), params.link_distance, params.link_opacity)
                {
                    out.links.push(Link {
                        from: a,
                        to: b,
                        opacity,
                    });
                }
            }
        }

        out.glows.extend(self.particles.iter().map(|p| Glow {
            center: p.position(),
            radius: p.radius * GLOW_RADIUS_SCALE,
            gradient_radius: p.radius * GRADIENT_RADIUS_SCALE,
        }));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Incremented on every regeneration
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
