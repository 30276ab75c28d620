//! Vertex types and related functionality

use bytemuck::{Pod, Zeroable};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// RGBA color with floating point channels
pub type Color4f = [f32; 4];

/// One strand sample as written by the helix kernel.
///
/// The layout matches the WGSL `HelixVertex` struct in storage address space:
/// two `vec4<f32>` members, 32 bytes, no padding.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct HelixVertex {
    pub position: [f32; 4],
    pub color: Color4f,
}

impl HelixVertex {
    /// Size of one vertex record in bytes
    pub const SIZE: usize = std::mem::size_of::<HelixVertex>();

    /// Byte offset of the color attribute
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 4]>();

    /// Create a vertex from a homogeneous position and a color
    pub fn new(position: [f32; 4], color: Color4f) -> Self {
        Self { position, color }
    }

    /// Position without the homogeneous component
    pub fn point(&self) -> Point3f {
        Point3f::new(self.position[0], self.position[1], self.position[2])
    }

    /// Distance from the helix axis (the y axis)
    pub fn axial_radius(&self) -> f32 {
        self.position[0].hypot(self.position[2])
    }
}

impl Default for HelixVertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
