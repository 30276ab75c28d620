//! # HelixCrate GPU
//!
//! GPU helix generation using WGPU compute shaders.
//!
//! The helix kernel runs as a WGSL compute shader writing straight into a
//! storage buffer that doubles as a vertex buffer, so generated geometry can
//! be drawn without a round trip through host memory.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use helixcrate_gpu::{GpuContext, HelixPipeline};
//! use helixcrate_core::HelixParams;
//!
//! async fn example() -> helixcrate_core::Result<()> {
//!     let gpu_context = GpuContext::new().await?;
//!     let pipeline = HelixPipeline::new(&gpu_context)?;
//!
//!     let params = HelixParams::default();
//!     let vertex_buffer = pipeline.create_vertex_buffer(&gpu_context, &params)?;
//!
//!     // Once per frame
//!     pipeline.dispatch(&gpu_context, &params.animated(0), &vertex_buffer)?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod helix;
pub mod layout;

// Re-export commonly used items
pub use device::GpuContext;
pub use helix::{gpu_generate_helix, HelixPipeline, HelixUniform};
pub use layout::helix_vertex_layout;
