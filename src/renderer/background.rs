//! Sky, starfield and planet backdrop
//!
//! The star layout is owned state keyed by the viewport it was generated
//! for. It only regenerates when the viewport changes (or after an explicit
//! [`Starfield::reset`]), so stars do not swim from frame to frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::PI;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::polar_to_screen;
use crate::settings::Settings;
use crate::sim::{PlanetGeometry, Viewport};
use crate::tuning::Tuning;

/// Decorative craters as (angle, fraction of radius, size in px)
const CRATERS: [(f32, f32, f32); 5] = [
    (1.2, 0.92, 25.0),
    (0.8, 0.95, 15.0),
    (1.6, 0.88, 20.0),
    (0.5, 0.93, 12.0),
    (2.0, 0.90, 18.0),
];

/// Stars stay this far above the rim
const SKY_CLEARANCE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    /// Small round dot
    Dot,
    /// Larger four-pointed star
    Accent,
}

#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub kind: StarKind,
    /// Fixed per-star phase seed for the twinkle, in [0, 1)
    pub brightness: f32,
}

impl Star {
    /// Twinkling alpha at `time` seconds, in [0.4, 1.0]
    pub fn alpha(&self, time: f32) -> f32 {
        let twinkle = 0.5 + 0.5 * (time * 1.5 + self.brightness * 12.0).sin();
        0.4 + twinkle * 0.6
    }
}

/// Owned star layout
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    generated_for: Option<Viewport>,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            generated_for: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Forget the layout; the next frame regenerates it
    pub fn reset(&mut self) {
        self.stars.clear();
        self.generated_for = None;
    }

    #[cfg(test)]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Regenerate the layout if `viewport` differs from the one it was built for.
    /// Returns true when a new layout was generated.
    pub fn ensure(&mut self, viewport: Viewport, geo: &PlanetGeometry, tuning: &Tuning) -> bool {
        if self.generated_for == Some(viewport) {
            return false;
        }

        let sky_height = (geo.surface_top() - SKY_CLEARANCE).max(0.0);
        let rng = &mut self.rng;
        self.stars.clear();
        self.stars.reserve(tuning.dot_stars + tuning.accent_stars);

        for _ in 0..tuning.dot_stars {
            self.stars.push(Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.width,
                    rng.random::<f32>() * sky_height,
                ),
                size: rng.random::<f32>() * 1.2 + 0.5,
                kind: StarKind::Dot,
                brightness: rng.random::<f32>(),
            });
        }
        for _ in 0..tuning.accent_stars {
            self.stars.push(Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.width,
                    rng.random::<f32>() * sky_height * 0.9,
                ),
                size: rng.random::<f32>() * 5.0 + 3.0,
                kind: StarKind::Accent,
                brightness: rng.random::<f32>(),
            });
        }

        self.generated_for = Some(viewport);
        log::debug!(
            "Generated {} stars for {}x{}",
            self.stars.len(),
            viewport.width,
            viewport.height
        );
        true
    }

    /// Sky, stars, planet, craters and rim highlight for one frame
    pub fn render(
        &mut self,
        viewport: Viewport,
        geo: &PlanetGeometry,
        time: f32,
        tuning: &Tuning,
        settings: &Settings,
    ) -> Vec<Vertex> {
        self.ensure(viewport, geo, tuning);

        let segments = settings.quality.circle_segments();
        let mut vertices = shapes::vertical_gradient_rect(
            Vec2::ZERO,
            Vec2::new(viewport.width, viewport.height),
            &colors::SKY,
        );

        for star in &self.stars {
            let alpha = if settings.effective_twinkle() {
                star.alpha(time)
            } else {
                1.0
            };
            match star.kind {
                StarKind::Dot => vertices.extend(shapes::circle(
                    star.pos,
                    star.size,
                    colors::with_alpha(colors::DOT_STAR, alpha),
                    segments / 2,
                )),
                StarKind::Accent => vertices.extend(shapes::four_pointed_star(
                    star.pos,
                    star.size,
                    colors::with_alpha(colors::ACCENT_STAR, alpha),
                )),
            }
        }

        vertices.extend(planet(geo, settings));
        vertices
    }
}

/// Radially shaded planet disc with craters and a faint rim highlight
fn planet(geo: &PlanetGeometry, settings: &Settings) -> Vec<Vertex> {
    let center = geo.center();
    let r = geo.radius;
    let gradient = shapes::RadialGradient {
        inner_center: Vec2::new(geo.cx + r * 0.12, geo.cy - r * 0.88),
        inner_radius: r * 0.05,
        outer_center: center,
        outer_radius: r,
        stops: colors::PLANET.to_vec(),
    };

    let quality = settings.quality;
    let mut vertices = shapes::shaded_disc(
        center,
        r,
        &gradient,
        quality.planet_rings(),
        quality.planet_segments(),
    );

    for (angle, dist, size) in CRATERS {
        let pos = polar_to_screen(center, r * dist, angle);
        vertices.extend(shapes::circle(pos, size, colors::CRATER, quality.circle_segments()));
        vertices.extend(shapes::ring(
            pos - Vec2::splat(2.0),
            size,
            1.0,
            colors::CRATER_RIM,
            quality.circle_segments(),
        ));
    }

    vertices.extend(shapes::arc_band(
        center,
        r - 1.0,
        r + 1.0,
        -PI * 0.75,
        -PI * 0.25,
        colors::RIM_HIGHLIGHT,
        quality.planet_segments() / 4,
    ));

    vertices
}
