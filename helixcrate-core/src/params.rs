//! Helix generation parameters

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Invocation-wide constants for one helix dispatch.
///
/// All fields use `#[serde(default)]` so a partial TOML table only overrides
/// the values it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixParams {
    /// Radius of the inner strand
    pub radius1: f32,
    /// Radius of the outer strand
    pub radius2: f32,
    /// Vertical extent, centered on y = 0
    pub height: f32,
    /// Number of full rotations along the height
    pub num_twists: f32,
    /// Number of steps per strand; each strand has `num_steps + 1` samples
    pub num_steps: u32,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            radius1: 1.0,
            radius2: 7.0,
            height: 24.0,
            num_twists: 4.0,
            num_steps: 320,
        }
    }
}

impl HelixParams {
    /// Create parameters with explicit values
    pub fn new(radius1: f32, radius2: f32, height: f32, num_twists: f32, num_steps: u32) -> Self {
        Self {
            radius1,
            radius2,
            height,
            num_twists,
            num_steps,
        }
    }

    /// Set both strand radii
    pub fn with_radii(mut self, radius1: f32, radius2: f32) -> Self {
        self.radius1 = radius1;
        self.radius2 = radius2;
        self
    }

    /// Set the vertical extent
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the number of full rotations
    pub fn with_twists(mut self, num_twists: f32) -> Self {
        self.num_twists = num_twists;
        self
    }

    /// Set the number of steps per strand
    pub fn with_steps(mut self, num_steps: u32) -> Self {
        self.num_steps = num_steps;
        self
    }

    /// Check the preconditions of the kernel.
    ///
    /// `num_steps` must be at least 1 (it is a divisor in every formula) and
    /// all float parameters must be finite. Negative radii are accepted; they
    /// mirror the strand through the axis.
    pub fn validate(&self) -> Result<()> {
        if self.num_steps == 0 {
            return Err(Error::InvalidParams("num_steps must be at least 1".to_string()));
        }

        let floats = [
            ("radius1", self.radius1),
            ("radius2", self.radius2),
            ("height", self.height),
            ("num_twists", self.num_twists),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(Error::InvalidParams(format!("{} must be finite, got {}", name, value)));
            }
        }

        Ok(())
    }

    /// Number of valid invocation indices, `num_steps + 1`
    pub fn invocation_count(&self) -> usize {
        self.num_steps as usize + 1
    }

    /// Number of vertex slots the output buffer must hold
    pub fn vertex_count(&self) -> usize {
        2 * self.invocation_count()
    }

    /// Number of triangle-list indices joining the two strands
    pub fn index_count(&self) -> usize {
        6 * self.num_steps as usize
    }

    /// Vertical distance between consecutive samples
    pub fn y_step(&self) -> f32 {
        self.height / self.num_steps as f32
    }

    /// Rotation angle between consecutive samples, in radians
    pub fn angle_step(&self) -> f32 {
        self.num_twists * 2.0 * PI / self.num_steps as f32
    }

    /// Parameters for one frame of the breathing animation.
    ///
    /// The radii swing through `10 * cos` and `10 * sin` with a period of 200
    /// frames; everything else is taken from `self`.
    pub fn animated(&self, frame: u64) -> Self {
        let phase = (frame % 200) as f32 * PI / 100.0;
        Self {
            radius1: phase.cos() * 10.0,
            radius2: phase.sin() * 10.0,
            ..*self
        }
    }
}
