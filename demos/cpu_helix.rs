//! CPU helix generation example
//!
//! Runs the helix kernel in 64-wide workgroups on a rayon pool and prints
//! the resulting mesh summary.

mod cli;

use std::time::Instant;

use clap::Parser;
use helixcrate_core::{CpuDispatcher, Drawable, HelixMesh, HelixVertex};

#[derive(Debug, Parser)]
#[command(about = "Generate a double helix on the CPU")]
struct Cli {
    #[command(flatten)]
    helix: cli::HelixArgs,

    /// Dedicated worker threads (default: rayon global pool)
    #[arg(long)]
    threads: Option<usize>,

    /// Extra workgroups past the minimal dispatch, to exercise the bounds guard
    #[arg(long, default_value_t = 0)]
    extra_groups: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut config = args.helix.resolve()?;
    if let Some(threads) = args.threads {
        config.parallel = config.parallel.with_threads(threads);
    }
    let params = config.helix;

    println!("Double helix on the CPU");
    println!("=======================");
    println!("{:#?}", params);

    let dispatcher = CpuDispatcher::from_config(&config)?;
    let workgroups = dispatcher.workgroups_for(&params).saturating_add(args.extra_groups);

    let mut vertices = vec![HelixVertex::default(); params.vertex_count()];
    let start = Instant::now();
    let stats = dispatcher.dispatch(&params, &mut vertices, workgroups)?;
    let elapsed = start.elapsed();

    println!("\nDispatched {} workgroups x {} in {:?}", stats.workgroups, dispatcher.workgroup_size(), elapsed);
    println!("   - Written: {} samples", stats.written);
    println!("   - Guarded: {} invocations", stats.guarded);

    let mesh = HelixMesh::from_vertices(&params, vertices)?;
    let (min, max) = mesh.bounding_box();
    println!("\nMesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.face_count());
    println!("   - Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})", min.x, min.y, min.z, max.x, max.y, max.z);

    if let (Some(first), Some(last)) = (mesh.vertices.first(), mesh.vertices.last()) {
        println!("   - First: {}", cli::describe(first));
        println!("   - Last:  {}", cli::describe(last));
    }

    Ok(())
}
