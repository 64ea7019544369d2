//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in screen pixels with colour and planet-clip flag
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    /// 1.0 = discard fragments inside the planet disc
    pub clip: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
            clip: 0.0,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Scene palette
pub mod colors {
    /// Sky gradient stops, top to bottom
    pub const SKY: [(f32, [f32; 4]); 4] = [
        (0.0, rgb(0x0c, 0x14, 0x45)),
        (0.3, rgb(0x15, 0x20, 0x58)),
        (0.6, rgb(0x1c, 0x2d, 0x6a)),
        (1.0, rgb(0x1a, 0x28, 0x60)),
    ];
    /// Planet radial shading stops, highlight to limb
    pub const PLANET: [(f32, [f32; 4]); 4] = [
        (0.0, rgb(0x8a, 0x90, 0xa2)),
        (0.3, rgb(0x71, 0x77, 0x88)),
        (0.6, rgb(0x5c, 0x62, 0x72)),
        (1.0, rgb(0x3e, 0x43, 0x52)),
    ];
    pub const DOT_STAR: [f32; 4] = rgb(255, 220, 100);
    pub const ACCENT_STAR: [f32; 4] = rgb(255, 215, 80);
    pub const CRATER: [f32; 4] = [0.0, 0.0, 0.0, 0.06];
    pub const CRATER_RIM: [f32; 4] = [1.0, 1.0, 1.0, 0.04];
    pub const RIM_HIGHLIGHT: [f32; 4] = [160.0 / 255.0, 165.0 / 255.0, 185.0 / 255.0, 0.15];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.15];
    /// Fallback for stroke colours that fail to parse
    pub const INK: [f32; 4] = rgb(0x33, 0x33, 0x33);
    pub const BACKGROUND: [f32; 4] = rgb(0x0c, 0x14, 0x45);

    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Same colour with a different alpha
    pub const fn with_alpha(c: [f32; 4], a: f32) -> [f32; 4] {
        [c[0], c[1], c[2], a]
    }

    /// Sample a sorted list of gradient stops at `t`
    pub fn sample(stops: &[(f32, [f32; 4])], t: f32) -> [f32; 4] {
        let Some(&(first_t, first)) = stops.first() else {
            return [0.0; 4];
        };
        if t <= first_t {
            return first;
        }
        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let u = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
                return std::array::from_fn(|i| c0[i] + (c1[i] - c0[i]) * u);
            }
        }
        stops[stops.len() - 1].1
    }

}
