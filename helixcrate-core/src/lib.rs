//! Core data structures and the helix vertex kernel for helixcrate
//!
//! This crate provides the vertex record, generation parameters, the pure
//! per-index kernel that samples both strands of a double helix, and a CPU
//! dispatcher that runs the kernel in 64-wide workgroups on a rayon pool.
//!
//! ## Example Usage
//!
//! ```rust
//! use helixcrate_core::{generate, HelixParams};
//!
//! let params = HelixParams::default();
//! let vertices = generate(&params).unwrap();
//! assert_eq!(vertices.len(), params.vertex_count());
//! ```

pub mod vertex;
pub mod params;
pub mod config;
pub mod kernel;
pub mod dispatch;
pub mod parallel;
pub mod mesh;
pub mod traits;
pub mod error;

pub use vertex::*;
pub use params::*;
pub use config::*;
pub use kernel::{sample, strand_pair, write_invocation, HelixSample};
pub use dispatch::*;
pub use parallel::ParallelConfig;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
