//! Per-frame helix regeneration example
//!
//! Keeps one vertex buffer alive and re-dispatches the kernel every frame with
//! breathing radii, the way a render loop would before drawing the buffer.

mod cli;

use clap::Parser;
use helixcrate_core::HelixVertex;
use helixcrate_gpu::{GpuContext, HelixPipeline};

#[derive(Debug, Parser)]
#[command(about = "Regenerate a helix every frame with animated radii")]
struct Cli {
    #[command(flatten)]
    helix: cli::HelixArgs,

    /// Frames to simulate
    #[arg(long, default_value_t = 200)]
    frames: u64,

    /// Read back and print every n-th frame
    #[arg(long, default_value_t = 25)]
    report_every: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let config = args.helix.resolve()?;
    let base = config.helix;

    let gpu_context = GpuContext::new().await?;
    let pipeline = HelixPipeline::with_workgroup_size(&gpu_context, config.workgroup_size)?;
    let vertex_buffer = pipeline.create_vertex_buffer(&gpu_context, &base)?;
    let index_buffer = pipeline.create_index_buffer(&gpu_context, base.num_steps);
    log::info!(
        "Allocated {} byte vertex buffer and {} byte index buffer",
        vertex_buffer.size(),
        index_buffer.size()
    );

    for frame in 0..args.frames {
        let params = base.animated(frame);
        pipeline.dispatch(&gpu_context, &params, &vertex_buffer)?;

        if args.report_every > 0 && frame % args.report_every == 0 {
            let vertices: Vec<HelixVertex> = gpu_context.read_buffer(&vertex_buffer, base.vertex_count()).await?;
            println!(
                "frame {:4}: radius1 {:7.3} radius2 {:7.3} | {}",
                frame,
                params.radius1,
                params.radius2,
                cli::describe(&vertices[0])
            );
        }
    }

    Ok(())
}
