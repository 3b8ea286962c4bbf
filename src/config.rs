// Tunable constants of the particle field. The defaults reproduce the look of
// the landing page background; a host page may override any subset from JSON.

use crate::color::{Color, PALETTE, TRAIL_TINT};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound for `ambient_count` and `spawn_per_move`.
pub const MAX_BATCH: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Colors a particle may be born with, picked uniformly.
    pub palette: [Color; 4],
    /// Particles scattered over the surface at startup.
    pub ambient_count: usize,
    /// Particles spawned around the pointer per movement event.
    pub spawn_per_move: usize,
    /// Ambient velocity components are drawn from [-ambient_speed, ambient_speed].
    pub ambient_speed: f64,
    /// Burst velocity components are drawn from [-burst_speed, burst_speed].
    pub burst_speed: f64,
    /// Inner radius of the ring burst particles are placed in.
    pub burst_min_distance: f64,
    /// Outer radius of the ring burst particles are placed in.
    pub burst_max_distance: f64,
    /// Velocity multiplier applied once per frame.
    pub damping: f64,
    /// Life lost per frame.
    pub life_decay: f64,
    /// Radius at which the glow gradient reaches full transparency.
    pub glow_radius: f64,
    /// Side of the square the glow gradient is painted into.
    pub glow_size: f64,
    /// Side of the solid core square.
    pub core_size: f64,
    /// Core alpha is `life * core_opacity`.
    pub core_opacity: f64,
    pub trail_color: Color,
    /// Alpha of the per-frame overpaint; lower values leave longer trails.
    pub trail_opacity: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            palette: PALETTE,
            ambient_count: 60,
            spawn_per_move: 2,
            ambient_speed: 1.0,
            burst_speed: 2.0,
            burst_min_distance: 20.0,
            burst_max_distance: 70.0,
            damping: 0.98,
            life_decay: 0.015,
            glow_radius: 8.0,
            glow_size: 12.0,
            core_size: 6.0,
            core_opacity: 0.8,
            trail_color: TRAIL_TINT,
            trail_opacity: 0.15,
        }
    }
}

impl FieldConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<FieldConfig, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ambient_count > MAX_BATCH {
            return Err(invalid("ambient_count", "must not exceed 10000"));
        }
        if self.spawn_per_move > MAX_BATCH {
            return Err(invalid("spawn_per_move", "must not exceed 10000"));
        }
        let finite = [
            ("ambient_speed", self.ambient_speed),
            ("burst_speed", self.burst_speed),
            ("burst_min_distance", self.burst_min_distance),
            ("burst_max_distance", self.burst_max_distance),
            ("damping", self.damping),
            ("life_decay", self.life_decay),
            ("glow_radius", self.glow_radius),
            ("glow_size", self.glow_size),
            ("core_size", self.core_size),
            ("core_opacity", self.core_opacity),
            ("trail_opacity", self.trail_opacity),
        ];
        for &(field, value) in finite.iter() {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        if self.damping <= 0.0 || self.damping > 1.0 {
            return Err(invalid("damping", "must lie in (0, 1]"));
        }
        if self.life_decay <= 0.0 {
            return Err(invalid("life_decay", "must be positive or particles never expire"));
        }
        if self.burst_min_distance > self.burst_max_distance {
            return Err(invalid("burst_min_distance", "exceeds burst_max_distance"));
        }
        if self.core_opacity > 1.0 {
            return Err(invalid("core_opacity", "must lie in [0, 1]"));
        }
        if self.trail_opacity > 1.0 {
            return Err(invalid("trail_opacity", "must lie in [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
