//! Pointer hit-testing
//!
//! A bounding circle around the creature's visual centre. Generous on
//! purpose: drawings are small and sparse, so precision is not worth a
//! polygon test.

use glam::Vec2;

use super::geometry::{PlanetGeometry, surface_position};
use super::motion::RunningCreature;
use crate::tuning::Tuning;

/// Screen-space centre of a creature's silhouette
pub fn visual_center(creature: &RunningCreature, geo: &PlanetGeometry, tuning: &Tuning) -> Vec2 {
    surface_position(
        geo,
        creature.angle,
        creature.jump_height + tuning.sheep_height / 2.0,
    )
}

/// Whether `point` falls within the creature's clickable circle
pub fn hit_test(
    point: Vec2,
    creature: &RunningCreature,
    geo: &PlanetGeometry,
    tuning: &Tuning,
) -> bool {
    let radius = tuning.hit_radius();
    (point - visual_center(creature, geo, tuning)).length_squared() <= radius * radius
}
