//! Vertex type and colour palettes

use bytemuck::{Pod, Zeroable};

use crate::sim::PowerUpKind;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
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
            ],
        }
    }
}

/// Colors for scene elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub wall: [f32; 4],
    pub floor: [f32; 4],
    pub window_body: [f32; 4],
    pub window_title: [f32; 4],
    pub window_border: [f32; 4],
    pub player: [f32; 4],
    pub player_face: [f32; 4],
    pub good_item: [f32; 4],
    pub bad_item: [f32; 4],
    pub double_score: [f32; 4],
    pub invincibility: [f32; 4],
    pub extra_life: [f32; 4],
    pub battery: [f32; 4],
    pub battery_cell: [f32; 4],
    pub battery_low: [f32; 4],
    pub text: [f32; 4],
}

impl Palette {
    /// Platinum desktop look
    pub const STANDARD: Palette = Palette {
        background: [0.40, 0.40, 0.62, 1.0],
        wall: [0.30, 0.30, 0.45, 1.0],
        floor: [0.22, 0.22, 0.32, 1.0],
        window_body: [0.87, 0.87, 0.87, 1.0],
        window_title: [0.70, 0.70, 0.76, 1.0],
        window_border: [0.10, 0.10, 0.10, 1.0],
        player: [0.85, 0.82, 0.70, 1.0],
        player_face: [0.10, 0.10, 0.12, 1.0],
        good_item: [0.30, 0.75, 0.40, 1.0],
        bad_item: [0.90, 0.30, 0.25, 1.0],
        double_score: [0.95, 0.75, 0.20, 1.0],
        invincibility: [0.45, 0.75, 1.00, 1.0],
        extra_life: [0.95, 0.45, 0.75, 1.0],
        battery: [0.95, 0.95, 0.95, 1.0],
        battery_cell: [0.35, 0.85, 0.35, 1.0],
        battery_low: [0.95, 0.30, 0.25, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
    };

    /// Black and white with saturated item colours
    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        wall: [0.5, 0.5, 0.5, 1.0],
        floor: [1.0, 1.0, 1.0, 1.0],
        window_body: [1.0, 1.0, 1.0, 1.0],
        window_title: [0.0, 0.0, 0.0, 1.0],
        window_border: [1.0, 1.0, 0.0, 1.0],
        player: [0.0, 1.0, 1.0, 1.0],
        player_face: [0.0, 0.0, 0.0, 1.0],
        good_item: [0.0, 1.0, 0.0, 1.0],
        bad_item: [1.0, 0.0, 0.0, 1.0],
        double_score: [1.0, 1.0, 0.0, 1.0],
        invincibility: [0.0, 0.5, 1.0, 1.0],
        extra_life: [1.0, 0.0, 1.0, 1.0],
        battery: [1.0, 1.0, 1.0, 1.0],
        battery_cell: [0.0, 1.0, 0.0, 1.0],
        battery_low: [1.0, 0.0, 0.0, 1.0],
        text: [1.0, 1.0, 0.0, 1.0],
    };

    pub fn new(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }

    pub fn power_up(&self, kind: PowerUpKind) -> [f32; 4] {
        match kind {
            PowerUpKind::DoubleScore => self.double_score,
            PowerUpKind::Invincibility => self.invincibility,
            PowerUpKind::ExtraLife => self.extra_life,
        }
    }
}

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
