//! Draw Sheep - hand-drawn sheep walking on a little planet
//!
//! Core modules:
//! - `sim`: Planet geometry, creature motion and hit-testing (pure, seeded)
//! - `renderer`: Triangle tessellation of the scene and the WebGPU pipeline
//! - `scene`: Frame driver tying roster, simulation and rendering together
//! - `drawing`: The stroke/drawing data contract shared with the host page
//! - `tuning`: Data-driven animation constants

pub mod drawing;
pub mod error;
pub mod renderer;
pub mod samples;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use drawing::{Drawing, Point, Stroke};
pub use error::Error;
pub use scene::{ClickOutcome, Scene};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Animation and layout constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical drawing canvas the strokes are captured in
    pub const DRAWING_WIDTH: f32 = 300.0;
    pub const DRAWING_HEIGHT: f32 = 240.0;

    /// On-screen creature size in pixels
    pub const SHEEP_WIDTH: f32 = 80.0;
    pub const SHEEP_HEIGHT: f32 = 64.0;

    /// Planet placement relative to the viewport
    pub const PLANET_RADIUS_FACTOR: f32 = 1.0;
    pub const PLANET_CENTER_X_FACTOR: f32 = 0.48;
    pub const PLANET_CENTER_Y_FACTOR: f32 = 1.6;

    /// Walking speed along the rim (radians/s)
    pub const BASE_ANGULAR_SPEED: f32 = 0.06;
    /// Max signed jitter added to the base speed (radians/s)
    pub const SPEED_VARIANCE: f32 = 0.02;
    /// Angular buffer past the visible arc before a creature wraps
    pub const WRAP_MARGIN: f32 = 0.25;
    /// Leg cycles per second
    pub const LEG_CYCLE_RATE: f32 = 3.0;
    /// Leg swing amplitude in logical drawing units
    pub const LEG_SWING: f32 = 8.0;

    /// Jump physics (pixels/s² and pixels/s)
    pub const GRAVITY: f32 = 400.0;
    pub const JUMP_VELOCITY: f32 = 180.0;
    /// Initial height so the creature is airborne immediately
    pub const JUMP_SEED_HEIGHT: f32 = 0.1;

    /// Hit circle radius as a fraction of the larger creature dimension
    pub const HIT_RADIUS_FACTOR: f32 = 0.55;
    /// Second click on the same creature within this window removes it
    pub const DOUBLE_CLICK_MS: f64 = 400.0;

    /// Frame delta handling
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ground shadow
    pub const SHADOW_MIN_HEIGHT: f32 = 5.0;
    pub const SHADOW_FADE_HEIGHT: f32 = 200.0;
    pub const SHADOW_MIN_SCALE: f32 = 0.3;

    /// Starfield population
    pub const DOT_STAR_COUNT: usize = 80;
    pub const ACCENT_STAR_COUNT: usize = 15;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert polar (r, theta) around `center` to screen space (y grows downward)
#[inline]
pub fn polar_to_screen(center: Vec2, r: f32, theta: f32) -> Vec2 {
    Vec2::new(center.x + r * theta.cos(), center.y - r * theta.sin())
}

/// `asin` with its argument clamped into the domain first
#[inline]
pub fn clamped_asin(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).asin()
}

/// `acos` with its argument clamped into the domain first
#[inline]
pub fn clamped_acos(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).acos()
}
