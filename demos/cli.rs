//! Command line arguments shared by the helix examples

use std::path::PathBuf;

use clap::Args;
use helixcrate_core::{HelixConfig, HelixVertex};

/// Helix parameters; each flag overrides the value from `--config`
#[derive(Debug, Args)]
pub struct HelixArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Inner strand radius
    #[arg(long)]
    pub radius1: Option<f32>,

    /// Outer strand radius
    #[arg(long)]
    pub radius2: Option<f32>,

    /// Vertical extent
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of full rotations
    #[arg(long)]
    pub twists: Option<f32>,

    /// Steps per strand
    #[arg(long)]
    pub steps: Option<u32>,

    /// Invocations per workgroup
    #[arg(long)]
    pub workgroup_size: Option<u32>,
}

impl HelixArgs {
    /// Load the config file (or defaults) and apply command line overrides
    pub fn resolve(&self) -> anyhow::Result<HelixConfig> {
        let mut config = match &self.config {
            Some(path) => HelixConfig::load(path)?,
            None => HelixConfig::default(),
        };

        let helix = &mut config.helix;
        if let Some(radius1) = self.radius1 {
            helix.radius1 = radius1;
        }
        if let Some(radius2) = self.radius2 {
            helix.radius2 = radius2;
        }
        if let Some(height) = self.height {
            helix.height = height;
        }
        if let Some(twists) = self.twists {
            helix.num_twists = twists;
        }
        if let Some(steps) = self.steps {
            helix.num_steps = steps;
        }
        if let Some(workgroup_size) = self.workgroup_size {
            config.workgroup_size = workgroup_size;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Print a vertex as `position / color`
pub fn describe(vertex: &HelixVertex) -> String {
    let [x, y, z, w] = vertex.position;
    let [r, g, b, a] = vertex.color;
    format!(
        "pos ({:7.3}, {:7.3}, {:7.3}, {:.1})  color ({:.3}, {:.3}, {:.3}, {:.1})",
        x, y, z, w, r, g, b, a
    )
}
