//! Data-driven animation constants
//!
//! Every tuned number lives here so the look can be adjusted without a
//! rebuild. JSON overrides are partial: missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Creature size ===
    pub sheep_width: f32,
    pub sheep_height: f32,

    // === Walking ===
    /// Radians/s
    pub base_speed: f32,
    /// Max signed speed jitter (radians/s), must stay below `base_speed`
    pub speed_variance: f32,
    /// Radians past the visible arc before wrapping to the other side
    pub wrap_margin: f32,
    /// Leg cycles per second
    pub leg_cycle_rate: f32,
    /// Leg swing amplitude (logical drawing units)
    pub leg_swing: f32,

    // === Jumping ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub jump_seed_height: f32,

    // === Interaction ===
    pub hit_radius_factor: f32,
    pub double_click_ms: f64,

    // === Frame timing ===
    pub first_frame_dt: f32,
    pub max_frame_dt: f32,

    // === Shadow ===
    pub shadow_min_height: f32,
    pub shadow_fade_height: f32,
    pub shadow_min_scale: f32,

    // === Starfield ===
    pub dot_stars: usize,
    pub accent_stars: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sheep_width: SHEEP_WIDTH,
            sheep_height: SHEEP_HEIGHT,

            base_speed: BASE_ANGULAR_SPEED,
            speed_variance: SPEED_VARIANCE,
            wrap_margin: WRAP_MARGIN,
            leg_cycle_rate: LEG_CYCLE_RATE,
            leg_swing: LEG_SWING,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_seed_height: JUMP_SEED_HEIGHT,

            hit_radius_factor: HIT_RADIUS_FACTOR,
            double_click_ms: DOUBLE_CLICK_MS,

            first_frame_dt: FIRST_FRAME_DT,
            max_frame_dt: MAX_FRAME_DT,

            shadow_min_height: SHADOW_MIN_HEIGHT,
            shadow_fade_height: SHADOW_FADE_HEIGHT,
            shadow_min_scale: SHADOW_MIN_SCALE,

            dot_stars: DOT_STAR_COUNT,
            accent_stars: ACCENT_STAR_COUNT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall the walk or break frame timing
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("base_speed", self.base_speed),
            ("first_frame_dt", self.first_frame_dt),
            ("max_frame_dt", self.max_frame_dt),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidTuning(format!("{} must be > 0, got {}", name, value)));
            }
        }

        if self.wrap_margin.is_nan() || self.wrap_margin < 0.0 {
            return Err(Error::InvalidTuning(format!(
                "wrap_margin must be >= 0, got {}",
                self.wrap_margin
            )));
        }

        // Jitter must never cancel the base speed: sheep only walk forward
        if self.speed_variance.is_nan()
            || self.speed_variance < 0.0
            || self.speed_variance >= self.base_speed
        {
            return Err(Error::InvalidTuning(format!(
                "speed_variance must be in [0, {}), got {}",
                self.base_speed, self.speed_variance
            )));
        }

        Ok(())
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Hit circle radius in pixels
    pub fn hit_radius(&self) -> f32 {
        self.sheep_width.max(self.sheep_height) * self.hit_radius_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_forward_motion() {
        let t = Tuning::default();
        assert!(t.base_speed > t.speed_variance);
        assert_eq!(t.wrap_margin, 0.25);
        assert_eq!(t.hit_radius_factor, 0.55);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{"wrap_margin": 0.4, "dot_stars": 10}"#).unwrap();
        assert_eq!(t.wrap_margin, 0.4);
        assert_eq!(t.dot_stars, 10);
        assert_eq!(t.gravity, GRAVITY);
        assert_eq!(t.double_click_ms, DOUBLE_CLICK_MS);
    }

    #[test]
    fn test_hit_radius_uses_larger_dimension() {
        let t = Tuning::default();
        assert!((t.hit_radius() - 44.0).abs() < 1e-4);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("[1, 2").is_err());
    }

    fn rejected(json: &str) -> bool {
        matches!(Tuning::from_json(json), Err(Error::InvalidTuning(_)))
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_frame_timing() {
        assert!(rejected(r#"{"max_frame_dt": -0.1}"#));
        assert!(rejected(r#"{"max_frame_dt": 0.0}"#));
        assert!(rejected(r#"{"first_frame_dt": 0.0}"#));
    }

    #[test]
    fn test_rejects_variance_that_stalls_sheep() {
        assert!(rejected(r#"{"speed_variance": 0.2}"#));
        assert!(rejected(r#"{"speed_variance": 0.06}"#));
        assert!(rejected(r#"{"speed_variance": -0.01}"#));
        assert!(rejected(r#"{"base_speed": 0.0}"#));
    }

    #[test]
    fn test_rejects_negative_wrap_margin() {
        assert!(rejected(r#"{"wrap_margin": -0.1}"#));
        assert!(Tuning::from_json(r#"{"wrap_margin": 0.0}"#).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_jump_physics() {
        assert!(rejected(r#"{"gravity": 0.0}"#));
        assert!(rejected(r#"{"gravity": -400.0}"#));
        assert!(rejected(r#"{"jump_velocity": 0.0}"#));
    }
}
