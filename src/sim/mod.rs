//! Simulation module
//!
//! Planet geometry, creature motion and hit-testing. Everything here is pure
//! and deterministic:
//! - Randomness only through an injected, seedable RNG
//! - Operations return new state instead of mutating their inputs
//! - No rendering or platform dependencies

pub mod geometry;
pub mod hit;
pub mod motion;

pub use geometry::{
    PlanetGeometry, Viewport, VisibleArc, planet_geometry, surface_position, visible_arc_range,
};
pub use hit::{hit_test, visual_center};
pub use motion::RunningCreature;
