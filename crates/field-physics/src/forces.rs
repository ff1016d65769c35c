//! Per-particle motion rules and link opacity
//!
//! Every rule is a free function so the simulation can compose them with
//! runtime parameters and tests can check them in isolation.

use glam::Vec2;

use crate::particle::Particle;

/// Velocity change pulling a particle at `position` toward `pointer`.
///
/// Proportional to the displacement while the pointer is closer than `radius`,
/// zero otherwise.
pub fn pointer_attraction(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let displacement = pointer - position;
    if displacement.length() < radius {
        displacement * strength
    } else {
        Vec2::ZERO
    }
}

/// Clamp each velocity component to [-max_speed, max_speed]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed))
}

/// Reflect the velocity on every axis where the particle left [0, bounds],
/// then clamp the position back inside.
pub fn bounce(particle: &mut Particle, bounds: Vec2) {
    for axis in 0..2 {
        let p = particle.position[axis];
        if p < 0.0 || p > bounds[axis] {
            particle.velocity[axis] = -particle.velocity[axis];
        }
        particle.position[axis] = p.clamp(0.0, bounds[axis]);
    }
}

/// One frame of motion: attraction, speed cap, integration, edge bounce
pub fn advance(
    particle: &mut Particle,
    pointer: Vec2,
    bounds: Vec2,
    pointer_radius: f32,
    attraction: f32,
    max_speed: f32,
) {
    let position = particle.position();
    let velocity = particle.velocity()
        + pointer_attraction(position, pointer, pointer_radius, attraction);
    let velocity = clamp_speed(velocity, max_speed);

    particle.set_velocity(velocity);
    particle.set_position(position + velocity);
    bounce(particle, bounds);
}

/// Opacity of the link between two particles `distance` apart.
///
/// Decays linearly from `opacity` at distance 0 to 0 at `max_distance`; `None`
/// once the particles are `max_distance` or further apart.
pub fn link_opacity(distance: f32, max_distance: f32, opacity: f32) -> Option<f32> {
    if distance < max_distance {
        Some(((1.0 - distance / max_distance) * opacity).max(0.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn test_attraction_inside_radius() {
        let pull = pointer_attraction(
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            POINTER_RADIUS,
            POINTER_ATTRACTION,
        );
        assert_eq!(pull, Vec2::new(100.0 * POINTER_ATTRACTION, 0.0));
    }

    #[test]
    fn test_no_attraction_at_or_beyond_radius() {
        let position = Vec2::new(0.0, 0.0);
        for pointer in [
            Vec2::new(160.0, 0.0),
            Vec2::new(0.0, 300.0),
            Vec2::splat(POINTER_SENTINEL),
        ] {
            let pull = pointer_attraction(position, pointer, POINTER_RADIUS, POINTER_ATTRACTION);
            assert_eq!(pull, Vec2::ZERO);
        }
    }

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(2.0, -0.7), MAX_SPEED);
        assert_eq!(v, Vec2::new(MAX_SPEED, -MAX_SPEED));

        let v = clamp_speed(Vec2::new(0.3, -0.1), MAX_SPEED);
        assert_eq!(v, Vec2::new(0.3, -0.1));
    }

    #[test]
    fn test_bounce_reflects_and_clamps() {
        let bounds = Vec2::new(100.0, 50.0);
        let mut p = Particle::new(Vec2::new(100.4, -0.2), Vec2::new(0.5, -0.3), 1.0);
        bounce(&mut p, bounds);

        assert_eq!(p.position(), Vec2::new(100.0, 0.0));
        assert_eq!(p.velocity(), Vec2::new(-0.5, 0.3));
    }

    #[test]
    fn test_bounce_leaves_inside_particles_alone() {
        let bounds = Vec2::new(100.0, 50.0);
        let mut p = Particle::new(Vec2::new(100.0, 0.0), Vec2::new(0.5, -0.3), 1.0);
        bounce(&mut p, bounds);

        assert_eq!(p.velocity(), Vec2::new(0.5, -0.3));
    }

    #[test]
    fn test_link_opacity() {
        assert_eq!(link_opacity(0.0, LINK_DISTANCE, LINK_OPACITY), Some(0.3));

        let alpha = link_opacity(65.0, LINK_DISTANCE, LINK_OPACITY).unwrap();
        assert!((alpha - 0.15).abs() < 1e-6);

        assert_eq!(link_opacity(130.0, LINK_DISTANCE, LINK_OPACITY), None);
        assert_eq!(link_opacity(500.0, LINK_DISTANCE, LINK_OPACITY), None);
    }

    #[test]
    fn test_advance_keeps_particle_in_bounds() {
        let bounds = Vec2::new(10.0, 10.0);
        let mut p = Particle::new(Vec2::new(9.9, 0.1), Vec2::new(0.6, -0.6), 1.0);

        for _ in 0..100 {
            advance(
                &mut p,
                Vec2::splat(POINTER_SENTINEL),
                bounds,
                POINTER_RADIUS,
                POINTER_ATTRACTION,
                MAX_SPEED,
            );
            assert!((0.0..=10.0).contains(&p.position[0]));
            assert!((0.0..=10.0).contains(&p.position[1]));
        }
    }
}
