use glam::Vec2;

/// Connection between two nearby particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// Radial-gradient disc drawn for one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    /// Radius of the painted disc
    pub radius: f32,
    /// Radius at which the gradient reaches full transparency
    pub gradient_radius: f32,
}

/// Everything painted for one frame. Links are drawn beneath glows.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub bounds: Vec2,
    pub links: Vec<Link>,
    pub glows: Vec<Glow>,
}

impl FrameOutput {
    pub fn clear(&mut self) {
        self.links.clear();
        self.glows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.glows.is_empty()
    }
}
