//! Drawing a creature standing on the rim
//!
//! The drawing's 300x240 logical canvas is scaled down to the creature size,
//! its bottom-centre pinned to the feet position, and rotated so local "up"
//! points away from the planet centre.

use glam::{Affine2, Vec2};
use std::f32::consts::FRAC_PI_2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{DRAWING_HEIGHT, DRAWING_WIDTH};
use crate::drawing::{Layer, Stroke, parse_css_color};
use crate::settings::Settings;
use crate::sim::{PlanetGeometry, RunningCreature, surface_position};
use crate::tuning::Tuning;

/// Transform from logical drawing space to screen space for a creature
pub fn creature_transform(
    creature: &RunningCreature,
    geo: &PlanetGeometry,
    tuning: &Tuning,
) -> Affine2 {
    let feet = surface_position(geo, creature.angle, creature.jump_height);
    let scale = Vec2::new(tuning.sheep_width / DRAWING_WIDTH, tuning.sheep_height / DRAWING_HEIGHT);

    Affine2::from_translation(feet)
        * Affine2::from_angle(FRAC_PI_2 - creature.angle)
        * Affine2::from_scale(scale)
        * Affine2::from_translation(Vec2::new(-DRAWING_WIDTH / 2.0, -DRAWING_HEIGHT))
}

/// Shadow, hind legs, body and front legs; every vertex is planet-clipped
pub fn creature(
    creature: &RunningCreature,
    geo: &PlanetGeometry,
    tuning: &Tuning,
    settings: &Settings,
) -> Vec<Vertex> {
    let segments = settings.quality.join_segments();
    let mut vertices = Vec::new();

    if settings.shadows && creature.jump_height > tuning.shadow_min_height {
        let ground = surface_position(geo, creature.angle, 0.0);
        let scale = (1.0 - creature.jump_height / tuning.shadow_fade_height)
            .max(tuning.shadow_min_scale);
        vertices.extend(shapes::ellipse(
            ground,
            tuning.sheep_width * 0.35 * scale,
            4.0 * scale,
            FRAC_PI_2 - creature.angle,
            colors::SHADOW,
            settings.quality.circle_segments(),
        ));
    }

    let base = creature_transform(creature, geo, tuning);
    let leg_offset = creature.leg_offset(tuning);

    for layer in Layer::PAINT_ORDER {
        let offset = match layer {
            Layer::HindLegs => leg_offset,
            Layer::Body => 0.0,
            Layer::FrontLegs => -leg_offset,
        };
        let transform = base * Affine2::from_translation(Vec2::new(0.0, offset));
        for stroke in creature.drawing.layer(layer) {
            vertices.extend(stroke_vertices(stroke, &transform, segments));
        }
    }

    for v in &mut vertices {
        v.clip = 1.0;
    }
    vertices
}

/// Tessellate one stroke in logical space and map it through `transform`
fn stroke_vertices(stroke: &Stroke, transform: &Affine2, join_segments: u32) -> Vec<Vertex> {
    if !stroke.is_drawable() {
        return Vec::new();
    }

    let color = parse_css_color(&stroke.color).unwrap_or(colors::INK);
    let points: Vec<Vec2> = stroke.points.iter().map(|&p| p.into()).collect();

    let mut vertices = shapes::polyline(&points, stroke.size, color, join_segments);
    for v in &mut vertices {
        let p = transform.transform_point2(Vec2::from(v.position));
        v.position = p.to_array();
    }
    vertices
}
