use field_physics::LINK_WIDTH;
use field_simulation::{FrameOutput, Glow, Link};
use glam::Vec2;
use std::f32::consts::TAU;

use crate::color::{palette, Color};
use crate::mesh::{Mesh, Vertex};

/// Colors and sizes used when turning a frame into triangles
#[derive(Clone, Copy, Debug)]
pub struct FieldStyle {
    pub link_color: Color,
    pub link_width: f32,
    pub glow_core: Color,
    pub glow_edge: Color,
    /// Rim segments per glow disc
    pub glow_segments: u32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            link_color: palette::LINK,
            link_width: LINK_WIDTH,
            glow_core: palette::GLOW_CORE,
            glow_edge: palette::GLOW_EDGE,
            glow_segments: 16,
        }
    }
}

/// Converts a frame's links and glows into one triangle mesh
pub struct FieldTessellator {
    mesh: Mesh,
    style: FieldStyle,
}

impl Default for FieldTessellator {
    fn default() -> Self {
        Self::new(FieldStyle::default())
    }
}

impl FieldTessellator {
    pub fn new(style: FieldStyle) -> Self {
        Self {
            mesh: Mesh::new(),
            style,
        }
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    /// Tessellate `frame`. Links come first so glows paint over them.
    pub fn tessellate(&mut self, frame: &FrameOutput) -> &Mesh {
        self.mesh.clear();

        for link in &frame.links {
            self.add_link(link);
        }
        for glow in &frame.glows {
            self.add_glow(glow);
        }

        &self.mesh
    }

    fn add_link(&mut self, link: &Link) {
        let direction = link.to - link.from;
        if direction.length_squared() <= f32::EPSILON || link.opacity <= 0.0 {
            return;
        }

        let half_width = direction.normalize().perp() * (self.style.link_width * 0.5);
        let color = self.style.link_color.with_alpha(link.opacity);
        let base = self.mesh.vertices.len() as u32;

        for corner in [
            link.from + half_width,
            link.from - half_width,
            link.to - half_width,
            link.to + half_width,
        ] {
            self.mesh
                .vertices
                .push(Vertex::new(corner.to_array(), color));
        }

        self.mesh
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Triangle fan from the center to the disc rim.
    ///
    /// Colors interpolate linearly along each spoke, which matches a linear
    /// radial gradient evaluated at the rim.
    fn add_glow(&mut self, glow: &Glow) {
        if glow.radius <= 0.0 {
            return;
        }

        let segments = self.style.glow_segments.max(3);
        let rim_t = if glow.gradient_radius > 0.0 {
            (glow.radius / glow.gradient_radius).min(1.0)
        } else {
            1.0
        };
        let rim_color = self.style.glow_core.lerp(self.style.glow_edge, rim_t);

        let center = self.mesh.vertices.len() as u32;
        self.mesh
            .vertices
            .push(Vertex::new(glow.center.to_array(), self.style.glow_core));

        for i in 0..segments {
            let angle = i as f32 / segments as f32 * TAU;
            let rim = glow.center + Vec2::from_angle(angle) * glow.radius;
            self.mesh
                .vertices
                .push(Vertex::new(rim.to_array(), rim_color));
        }

        for i in 0..segments {
            let current = center + 1 + i;
            let next = center + 1 + (i + 1) % segments;
            self.mesh.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(links: Vec<Link>, glows: Vec<Glow>) -> FrameOutput {
        FrameOutput {
            bounds: Vec2::new(100.0, 100.0),
            links,
            glows,
        }
    }

    #[test]
    fn test_empty_frame_gives_empty_mesh() {
        let mut tessellator = FieldTessellator::default();
        assert!(tessellator.tessellate(&FrameOutput::default()).is_empty());
    }

    #[test]
    fn test_link_becomes_quad_with_link_opacity() {
        let mut tessellator = FieldTessellator::default();
        let link = Link {
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(10.0, 0.0),
            opacity: 0.2,
        };
        let mesh = tessellator.tessellate(&frame(vec![link], vec![]));

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        for v in &mesh.vertices {
            assert_eq!(v.color[3], 0.2);
            assert!((v.pos[1].abs() - LINK_WIDTH * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_link_skipped() {
        let mut tessellator = FieldTessellator::default();
        let link = Link {
            from: Vec2::new(5.0, 5.0),
            to: Vec2::new(5.0, 5.0),
            opacity: 0.3,
        };
        assert!(tessellator.tessellate(&frame(vec![link], vec![])).is_empty());
    }

    #[test]
    fn test_glow_fan_colors() {
        let style = FieldStyle::default();
        let mut tessellator = FieldTessellator::new(style);
        let glow = Glow {
            center: Vec2::new(50.0, 50.0),
            radius: 5.0,
            gradient_radius: 6.0,
        };
        let mesh = tessellator.tessellate(&frame(vec![], vec![glow]));

        let segments = style.glow_segments as usize;
        assert_eq!(mesh.vertices.len(), 1 + segments);
        assert_eq!(mesh.indices.len(), 3 * segments);
        assert_eq!(mesh.vertices[0].color, style.glow_core.to_array());

        let rim = style.glow_core.lerp(style.glow_edge, 5.0 / 6.0).to_array();
        for v in &mesh.vertices[1..] {
            assert_eq!(v.color, rim);
            let d = Vec2::from_array(v.pos).distance(glow.center);
            assert!((d - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_links_precede_glows() {
        let mut tessellator = FieldTessellator::default();
        let link = Link {
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(0.0, 10.0),
            opacity: 0.1,
        };
        let glow = Glow {
            center: Vec2::new(0.0, 0.0),
            radius: 2.5,
            gradient_radius: 3.0,
        };
        let mesh = tessellator.tessellate(&frame(vec![link], vec![glow]));

        assert_eq!(mesh.indices[..6], [0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.indices[6], 4);
    }
}
