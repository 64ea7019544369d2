//! Rendering module
//!
//! The scene is tessellated on the CPU into one triangle list per frame
//! ([`FrameBatch`]) and drawn by a small WebGPU pipeline. Creature vertices
//! carry a clip flag; the fragment shader cuts them away inside the planet
//! disc so sheep walking off the visible rim disappear behind it.

pub mod background;
pub mod creature;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use background::Starfield;
pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::{PlanetGeometry, Viewport};

/// Clip disc is the planet shrunk by this many pixels
pub const CLIP_INSET: f32 = 1.0;

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct FrameBatch {
    pub viewport: Viewport,
    pub planet: PlanetGeometry,
    /// Triangle list in screen pixels, back to front
    pub vertices: Vec<Vertex>,
}

impl FrameBatch {
    pub fn new(viewport: Viewport, planet: PlanetGeometry) -> Self {
        Self {
            viewport,
            planet,
            vertices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Radius of the planet-shaped cutout applied to clipped vertices
    pub fn clip_radius(&self) -> f32 {
        (self.planet.radius - CLIP_INSET).max(0.0)
    }
}
