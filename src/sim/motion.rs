//! Per-creature motion
//!
//! Creatures walk along the visible rim from higher to lower angle (left to
//! right on screen), cycle their legs, and can hop. Updates are pure: every
//! operation returns a new state and leaves its input untouched.

use std::sync::Arc;

use rand::Rng;

use super::geometry::{Viewport, VisibleArc, planet_geometry, visible_arc_range};
use crate::drawing::Drawing;
use crate::tuning::Tuning;

/// Simulation state bound to one drawing
#[derive(Debug, Clone)]
pub struct RunningCreature {
    pub drawing: Arc<Drawing>,
    /// Position on the rim (radians)
    pub angle: f32,
    /// Angular speed (radians/s), fixed per creature
    pub speed: f32,
    /// Walk cycle in [0, 1)
    pub leg_phase: f32,
    /// Positive = away from the surface (pixels/s)
    pub jump_velocity: f32,
    /// Height above the surface (pixels), 0 when grounded
    pub jump_height: f32,
}

impl RunningCreature {
    /// Place a new creature at a random spot on the visible arc
    pub fn spawn<R: Rng + ?Sized>(
        drawing: Arc<Drawing>,
        viewport: Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let arc = visible_arc_range(&planet_geometry(viewport), viewport);
        let jitter = (rng.random::<f32>() - 0.5) * tuning.speed_variance * 2.0;
        let speed = tuning.base_speed + jitter;

        let angle = if arc.is_degenerate() {
            arc.end
        } else {
            arc.end + rng.random::<f32>() * arc.span()
        };

        Self {
            drawing,
            angle,
            speed,
            leg_phase: rng.random::<f32>(),
            jump_velocity: 0.0,
            jump_height: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.drawing.id
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.jump_height > 0.0
    }

    /// Advance by `dt` seconds against the arc for `viewport`.
    ///
    /// `dt` should already be clamped by the caller.
    pub fn advance(&self, dt: f32, viewport: Viewport, tuning: &Tuning) -> Self {
        let arc = visible_arc_range(&planet_geometry(viewport), viewport);
        self.advance_on_arc(dt, &arc, tuning)
    }

    /// Same as [`advance`](Self::advance) with a precomputed arc
    pub fn advance_on_arc(&self, dt: f32, arc: &VisibleArc, tuning: &Tuning) -> Self {
        let mut next = self.clone();

        next.angle -= self.speed * dt;
        if !arc.is_degenerate() && next.angle < arc.end - tuning.wrap_margin {
            next.angle = arc.start + tuning.wrap_margin;
        }

        next.leg_phase = (self.leg_phase + dt * tuning.leg_cycle_rate).rem_euclid(1.0);

        if self.jump_velocity != 0.0 || self.jump_height > 0.0 {
            next.jump_height += self.jump_velocity * dt;
            next.jump_velocity -= tuning.gravity * dt;
            if next.jump_height <= 0.0 {
                next.jump_height = 0.0;
                next.jump_velocity = 0.0;
            }
        }

        next
    }

    /// Launch a hop; no-op while already airborne
    pub fn trigger_jump(&self, tuning: &Tuning) -> Self {
        if self.is_airborne() {
            return self.clone();
        }
        Self {
            jump_velocity: tuning.jump_velocity,
            jump_height: tuning.jump_seed_height,
            ..self.clone()
        }
    }

    /// Vertical offset of the hind legs (front legs use the negation)
    pub fn leg_offset(&self, tuning: &Tuning) -> f32 {
        (self.leg_phase * std::f32::consts::TAU).sin() * tuning.leg_swing
    }
}
