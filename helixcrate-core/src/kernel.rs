//! The per-index helix kernel.
//!
//! Every function here is pure: the invocation index is an explicit argument
//! and nothing is shared between invocations. The WGSL shader in
//! `helixcrate-gpu` computes the same values; keep the two in sync.

use crate::{HelixParams, HelixVertex};

/// Per-index values shared by both strands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixSample {
    /// Fractional progress along the helix, 0 at the bottom and 1 at the top
    pub t: f32,
    /// Vertical position, centered on 0
    pub y: f32,
    /// Cumulative rotation angle in radians
    pub angle: f32,
}

impl HelixSample {
    /// Color shared by both strand vertices: red with a green ramp
    pub fn color(&self) -> [f32; 4] {
        [1.0, self.t, 0.0, 1.0]
    }

    /// Vertex on the circle of the given radius at this sample
    pub fn vertex(&self, radius: f32) -> HelixVertex {
        let (sin, cos) = self.angle.sin_cos();
        HelixVertex::new([cos * radius, self.y, sin * radius, 1.0], self.color())
    }
}

/// Compute progress, height and angle for invocation `i`.
///
/// `params.num_steps` must be non-zero; see [`HelixParams::validate`].
pub fn sample(i: u32, params: &HelixParams) -> HelixSample {
    let steps = params.num_steps as f32;
    let fi = i as f32;
    HelixSample {
        t: fi * (1.0 / steps),
        y: fi * (params.height / steps) - params.height * 0.5,
        angle: fi * (params.num_twists * 2.0 * std::f32::consts::PI / steps),
    }
}

/// Inner and outer strand vertices for invocation `i`, in slot order
pub fn strand_pair(i: u32, params: &HelixParams) -> [HelixVertex; 2] {
    let sample = sample(i, params);
    [sample.vertex(params.radius1), sample.vertex(params.radius2)]
}

/// The guarded kernel body: `None` for indices past `num_steps`.
pub fn invoke(i: u32, params: &HelixParams) -> Option<[HelixVertex; 2]> {
    (i <= params.num_steps).then(|| strand_pair(i, params))
}

/// Write slots `2i` and `2i + 1` of `out` if `i <= num_steps`.
///
/// Returns whether the invocation wrote. Indices past `num_steps` leave the
/// buffer untouched.
///
/// # Panics
///
/// Panics if `out` holds fewer than `2i + 2` vertices for a valid `i`. The
/// dispatchers check the buffer length up front.
pub fn write_invocation(i: u32, params: &HelixParams, out: &mut [HelixVertex]) -> bool {
    match invoke(i, params) {
        Some(pair) => {
            let slot = 2 * i as usize;
            out[slot..slot + 2].copy_from_slice(&pair);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_first_sample_with_defaults() {
        let params = HelixParams::default();
        let [inner, outer] = strand_pair(0, &params);

        assert_relative_eq!(inner.position[0], 1.0);
        assert_relative_eq!(inner.position[1], -12.0);
        assert_relative_eq!(inner.position[2], 0.0);
        assert_relative_eq!(inner.position[3], 1.0);

        assert_relative_eq!(outer.position[0], 7.0);
        assert_relative_eq!(outer.position[1], -12.0);
        assert_relative_eq!(outer.position[2], 0.0);

        assert_eq!(inner.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(outer.color, inner.color);
    }

    #[test]
    fn test_last_sample_with_defaults() {
        let params = HelixParams::default();
        let last = sample(320, &params);
        assert_relative_eq!(last.y, 12.0, epsilon = 1e-4);
        assert_relative_eq!(last.angle, 8.0 * PI, epsilon = 1e-4);
        assert_relative_eq!(last.t, 1.0, epsilon = 1e-6);

        let [inner, outer] = strand_pair(320, &params);
        // 8 pi is a whole number of turns, back to the +x axis
        assert_relative_eq!(inner.position[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(inner.position[2], 0.0, epsilon = 1e-3);
        assert_relative_eq!(outer.position[0], 7.0, epsilon = 1e-3);
        assert_relative_eq!(outer.color[1], 1.0, epsilon = 1e-6);
        assert_eq!(outer.color[0], 1.0);
        assert_eq!(outer.color[2], 0.0);
    }

    #[test]
    fn test_strands_stay_on_their_radii() {
        let params = HelixParams::default().with_radii(2.5, 4.0).with_steps(97);
        for i in 0..=params.num_steps {
            let [inner, outer] = strand_pair(i, &params);
            assert_relative_eq!(inner.axial_radius(), 2.5, epsilon = 1e-4);
            assert_relative_eq!(outer.axial_radius(), 4.0, epsilon = 1e-4);
            assert_eq!(inner.position[1], outer.position[1]);
        }
    }

    #[test]
    fn test_height_and_color_are_monotonic() {
        let params = HelixParams::default();
        let mut previous = sample(0, &params);
        for i in 1..=params.num_steps {
            let current = sample(i, &params);
            assert!(current.y > previous.y, "y must increase at step {}", i);
            assert!(current.t >= previous.t, "green ramp must not decrease at step {}", i);
            previous = current;
        }
    }

    #[test]
    fn test_uniform_twist_rate() {
        let params = HelixParams::default().with_twists(2.5).with_steps(50);
        let expected = params.angle_step();
        for i in 0..params.num_steps {
            let delta = sample(i + 1, &params).angle - sample(i, &params).angle;
            assert_relative_eq!(delta, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_guard_skips_out_of_range_indices() {
        let params = HelixParams::default().with_steps(4);
        let sentinel = HelixVertex::new([-1.0; 4], [-1.0; 4]);
        let mut out = vec![sentinel; params.vertex_count()];

        assert!(!write_invocation(5, &params, &mut out));
        assert!(!write_invocation(63, &params, &mut out));
        assert!(out.iter().all(|v| *v == sentinel));
        assert!(invoke(5, &params).is_none());
    }

    #[test]
    fn test_write_touches_only_its_slots() {
        let params = HelixParams::default().with_steps(4);
        let sentinel = HelixVertex::new([-1.0; 4], [-1.0; 4]);
        let mut out = vec![sentinel; params.vertex_count()];

        assert!(write_invocation(2, &params, &mut out));
        for (slot, vertex) in out.iter().enumerate() {
            if slot == 4 || slot == 5 {
                assert_ne!(*vertex, sentinel);
            } else {
                assert_eq!(*vertex, sentinel);
            }
        }
        assert_eq!(&out[4..6], &strand_pair(2, &params));
    }
}
