//! Field parameters for runtime tuning

use field_physics::constants::*;
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Particle count used for surfaces narrower than `below_width`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountTier {
    pub below_width: f32,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    // Pointer attraction
    pub pointer_radius: f32,
    pub pointer_attraction: f32,

    // Motion
    pub max_speed: f32,

    // Links
    pub link_distance: f32,
    pub link_opacity: f32,

    // Spawning
    pub initial_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,

    /// Particle count for surfaces at least as wide as the last tier
    pub max_count: usize,
    /// Width tiers in ascending order; the first tier the surface is narrower
    /// than decides the particle count
    pub count_tiers: Vec<CountTier>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            pointer_radius: POINTER_RADIUS,
            pointer_attraction: POINTER_ATTRACTION,
            max_speed: MAX_SPEED,
            link_distance: LINK_DISTANCE,
            link_opacity: LINK_OPACITY,
            initial_speed: INITIAL_SPEED,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            max_count: LARGE_COUNT,
            count_tiers: vec![
                CountTier {
                    below_width: SMALL_WIDTH,
                    count: SMALL_COUNT,
                },
                CountTier {
                    below_width: MEDIUM_WIDTH,
                    count: MEDIUM_COUNT,
                },
            ],
        }
    }
}

impl FieldParams {
    /// Parse parameters from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ParamsError> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_toml_string(&self) -> Result<String, ParamsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of particles for a surface `width` logical pixels wide
    pub fn particle_count(&self, width: f32) -> usize {
        self.count_tiers
            .iter()
            .find(|tier| width < tier.below_width)
            .map_or(self.max_count, |tier| tier.count)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ParamsError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ParamsError::invalid(
                    field,
                    format!("expected a finite value >= 0, got {value}"),
                ))
            }
        }

        non_negative("pointer_radius", self.pointer_radius)?;
        non_negative("pointer_attraction", self.pointer_attraction)?;
        non_negative("initial_speed", self.initial_speed)?;

        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ParamsError::invalid(
                "max_speed",
                format!("expected a finite value > 0, got {}", self.max_speed),
            ));
        }

        if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
            return Err(ParamsError::invalid(
                "link_distance",
                format!("expected a finite value > 0, got {}", self.link_distance),
            ));
        }

        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ParamsError::invalid(
                "link_opacity",
                format!("expected a value in [0, 1], got {}", self.link_opacity),
            ));
        }

        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(ParamsError::invalid(
                "min_radius",
                format!(
                    "expected 0 < min_radius <= max_radius, got {} and {}",
                    self.min_radius, self.max_radius
                ),
            ));
        }
        non_negative("max_radius", self.max_radius)?;

        let ascending = self
            .count_tiers
            .windows(2)
            .all(|pair| pair[0].below_width < pair[1].below_width);
        if !ascending {
            return Err(ParamsError::invalid(
                "count_tiers",
                "tiers must be sorted by strictly ascending `below_width`",
            ));
        }

        Ok(())
    }
}
