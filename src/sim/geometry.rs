//! Planet geometry
//!
//! The planet is a large circle centred well below the viewport so only a
//! shallow arc of its rim shows at the bottom of the screen. Everything that
//! turns simulation state into pixels goes through [`surface_position`].

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamped_acos, clamped_asin, polar_to_screen};

/// Viewport size in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether anything can be drawn into this viewport
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// The planet circle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetGeometry {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl PlanetGeometry {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }

    /// Screen y of the highest point of the rim
    #[inline]
    pub fn surface_top(&self) -> f32 {
        self.cy - self.radius
    }
}

/// Angular window of the rim that is on screen; `start > end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleArc {
    pub start: f32,
    pub end: f32,
}

impl VisibleArc {
    /// A collapsed arc: nothing on the rim is visible
    pub const EMPTY: VisibleArc = VisibleArc { start: 0.0, end: 0.0 };

    #[inline]
    pub fn span(&self) -> f32 {
        self.start - self.end
    }

    /// True when the arc has no positive, finite span
    pub fn is_degenerate(&self) -> bool {
        !(self.start.is_finite() && self.end.is_finite() && self.start > self.end)
    }

    pub fn contains(&self, angle: f32) -> bool {
        !self.is_degenerate() && angle >= self.end && angle <= self.start
    }
}

/// Planet placement for a viewport. Recompute whenever the viewport resizes.
pub fn planet_geometry(viewport: Viewport) -> PlanetGeometry {
    PlanetGeometry {
        cx: viewport.width * PLANET_CENTER_X_FACTOR,
        cy: viewport.height * PLANET_CENTER_Y_FACTOR,
        radius: viewport.height * PLANET_RADIUS_FACTOR,
    }
}

/// Map (angle, height above the surface) to screen pixels
#[inline]
pub fn surface_position(geo: &PlanetGeometry, angle: f32, height_above_surface: f32) -> Vec2 {
    polar_to_screen(geo.center(), geo.radius + height_above_surface, angle)
}

/// Angular range of the rim inside the viewport.
///
/// Bounded by where the rim drops below the bottom edge and where it leaves
/// the left/right edges. Returns [`VisibleArc::EMPTY`] for a planet with no
/// radius; callers must still check [`VisibleArc::is_degenerate`].
pub fn visible_arc_range(geo: &PlanetGeometry, viewport: Viewport) -> VisibleArc {
    if !(geo.radius > 0.0) {
        return VisibleArc::EMPTY;
    }

    // cy - R*sin(a) = h
    let bottom_angle = clamped_asin((geo.cy - viewport.height) / geo.radius);
    // cx + R*cos(a) = 0
    let left_angle = clamped_acos(-geo.cx / geo.radius);
    // cx + R*cos(a) = w
    let right_angle = clamped_acos((viewport.width - geo.cx) / geo.radius);

    VisibleArc {
        start: left_angle.min(PI - bottom_angle),
        end: right_angle.max(bottom_angle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const HD: Viewport = Viewport::new(1920.0, 1080.0);

    #[test]
    fn test_planet_center_below_viewport() {
        let geo = planet_geometry(HD);
        assert!(geo.cy > HD.height);
        assert!(geo.radius > 0.0);
        let top = geo.surface_top();
        assert!(top > HD.height * 0.4);
        assert!(top < HD.height * 0.8);
    }

    #[test]
    fn test_surface_position_top_of_circle() {
        let geo = planet_geometry(HD);
        let pos = surface_position(&geo, FRAC_PI_2, 0.0);
        assert!((pos.x - geo.cx).abs() < 0.01);
        assert!((pos.y - geo.surface_top()).abs() < 0.01);
    }

    #[test]
    fn test_height_moves_up_screen() {
        let geo = planet_geometry(HD);
        let ground = surface_position(&geo, FRAC_PI_2, 0.0);
        let above = surface_position(&geo, FRAC_PI_2, 50.0);
        assert!(above.y < ground.y);
    }

    #[test]
    fn test_visible_arc_hd() {
        let geo = planet_geometry(HD);
        let arc = visible_arc_range(&geo, HD);
        assert!(arc.start > arc.end);
        assert!(!arc.is_degenerate());
        // Bottom edge bounds both ends on a wide screen: asin(0.6)
        assert!((arc.end - 0.6435).abs() < 1e-3);
        assert!((arc.start - (PI - 0.6435)).abs() < 1e-3);
    }

    #[test]
    fn test_visible_arc_narrow_viewport_uses_side_edges() {
        let vp = Viewport::new(400.0, 1000.0);
        let geo = planet_geometry(vp);
        let arc = visible_arc_range(&geo, vp);
        assert!(!arc.is_degenerate());
        // Side edges cut the arc before the bottom edge does
        let bottom = clamped_asin((geo.cy - vp.height) / geo.radius);
        assert!(arc.end > bottom);
        assert!(arc.start < PI - bottom);
    }

    #[test]
    fn test_degenerate_viewport() {
        let vp = Viewport::new(0.0, 0.0);
        assert!(!vp.is_drawable());
        let arc = visible_arc_range(&planet_geometry(vp), vp);
        assert!(arc.is_degenerate());
        assert!(!arc.contains(1.0));
    }

    #[test]
    fn test_nan_arc_is_degenerate() {
        let arc = VisibleArc { start: f32::NAN, end: 0.5 };
        assert!(arc.is_degenerate());
    }
}
