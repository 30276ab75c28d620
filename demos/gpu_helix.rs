//! GPU helix generation example
//!
//! Compiles the WGSL helix kernel, dispatches it into a vertex buffer, reads
//! the result back and compares it with the CPU kernel.

mod cli;

use std::time::Instant;

use clap::Parser;
use helixcrate_core::{generate, Drawable, HelixMesh};
use helixcrate_gpu::{GpuContext, HelixPipeline};

#[derive(Debug, Parser)]
#[command(about = "Generate a double helix with a compute shader")]
struct Cli {
    #[command(flatten)]
    helix: cli::HelixArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let config = args.helix.resolve()?;
    let params = config.helix;

    println!("Double helix on the GPU");
    println!("=======================");

    let gpu_context = GpuContext::new().await?;
    let pipeline = HelixPipeline::with_workgroup_size(&gpu_context, config.workgroup_size)?;
    println!(
        "Pipeline ready: {} workgroups x {} invocations",
        pipeline.workgroups_for(&params),
        pipeline.workgroup_size()
    );

    let start = Instant::now();
    let vertices = pipeline.generate(&gpu_context, &params).await?;
    let gpu_time = start.elapsed();
    let mesh = HelixMesh::from_vertices(&params, vertices)?;
    println!("\nGPU generation + readback: {:?}", gpu_time);

    let start = Instant::now();
    let reference = generate(&params)?;
    let cpu_time = start.elapsed();
    println!("CPU generation: {:?}", cpu_time);

    let max_error = mesh
        .vertices
        .iter()
        .zip(&reference)
        .flat_map(|(g, c)| g.position.iter().zip(&c.position).map(|(a, b)| (a - b).abs()))
        .fold(0.0f32, f32::max);
    println!("Max position difference GPU vs CPU: {:.2e}", max_error);

    let (min, max) = mesh.bounding_box();
    println!("\nMesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.face_count());
    println!("   - Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})", min.x, min.y, min.z, max.x, max.y, max.z);

    if let (Some(first), Some(last)) = (mesh.vertices.first(), mesh.vertices.last()) {
        println!("   - First: {}", cli::describe(first));
        println!("   - Last:  {}", cli::describe(last));
    }

    Ok(())
}
