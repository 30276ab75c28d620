//! CPU dispatch of the helix kernel
//!
//! Invocations are grouped into workgroups the same way the GPU path groups
//! them, so over-dispatch (a group count rounded up past `num_steps + 1`)
//! exercises the kernel's bounds guard on both paths. Each workgroup owns a
//! disjoint slab of the output slice; no synchronization is needed.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::{kernel, Error, HelixConfig, HelixParams, HelixVertex, Result};

/// Invocations per workgroup. A scheduling knob, not a correctness dependency.
pub const WORKGROUP_SIZE: u32 = 64;

/// Smallest number of groups of `group_size` that covers indices `0..=num_steps`.
///
/// Saturates at `u32::MAX` when `num_steps = u32::MAX` and `group_size = 1`.
pub fn workgroup_count(num_steps: u32, group_size: u32) -> u32 {
    let invocations = num_steps as u64 + 1;
    u32::try_from(invocations.div_ceil(group_size.max(1) as u64)).unwrap_or(u32::MAX)
}

/// Outcome of one CPU dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchStats {
    /// Workgroups dispatched
    pub workgroups: u32,
    /// Total invocations, `workgroups * group_size`
    pub invocations: usize,
    /// Invocations that wrote their slot pair
    pub written: usize,
    /// Invocations stopped by the bounds guard
    pub guarded: usize,
}

impl DispatchStats {
    /// Whether every index in `0..=num_steps` was written
    pub fn is_complete(&self, params: &HelixParams) -> bool {
        self.written == params.invocation_count()
    }
}

/// Runs the helix kernel over a caller-owned vertex slice
#[derive(Debug, Clone)]
pub struct CpuDispatcher {
    workgroup_size: u32,
    parallel: bool,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for CpuDispatcher {
    fn default() -> Self {
        Self {
            workgroup_size: WORKGROUP_SIZE,
            parallel: true,
            pool: None,
        }
    }
}

impl CpuDispatcher {
    /// Create a dispatcher on rayon's global pool with the default group size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher from a loaded configuration
    pub fn from_config(config: &HelixConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            workgroup_size: config.workgroup_size,
            parallel: config.parallel.enabled,
            pool: config.parallel.build_pool()?,
        })
    }

    /// Override the workgroup size
    pub fn with_workgroup_size(mut self, workgroup_size: u32) -> Result<Self> {
        if workgroup_size == 0 {
            return Err(Error::InvalidParams("workgroup size must be at least 1".to_string()));
        }
        self.workgroup_size = workgroup_size;
        Ok(self)
    }

    /// Run sequentially on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Invocations per workgroup
    pub fn workgroup_size(&self) -> u32 {
        self.workgroup_size
    }

    /// Groups needed to cover every index of `params`
    pub fn workgroups_for(&self, params: &HelixParams) -> u32 {
        workgroup_count(params.num_steps, self.workgroup_size)
    }

    /// Run `workgroups * workgroup_size` invocations of the kernel into `out`.
    ///
    /// `out` must hold at least `params.vertex_count()` vertices; extra slots
    /// past that are never touched. Fewer groups than
    /// [`workgroups_for`](Self::workgroups_for) leaves the tail unwritten.
    pub fn dispatch(
        &self,
        params: &HelixParams,
        out: &mut [HelixVertex],
        workgroups: u32,
    ) -> Result<DispatchStats> {
        params.validate()?;

        let required = params.vertex_count();
        if out.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: out.len(),
            });
        }

        let group = self.workgroup_size as usize;
        let invocations = workgroups as usize * group;
        log::debug!(
            "CPU dispatch: {} workgroups x {} invocations for {} steps",
            workgroups,
            group,
            params.num_steps
        );

        // Group `g` owns slots [2 * g * group, 2 * (g + 1) * group)
        let run_group = |(g, slab): (usize, &mut [HelixVertex])| -> usize {
            let base = g * group;
            let mut written = 0;
            for local in 0..group {
                if let Some(pair) = kernel::invoke((base + local) as u32, params) {
                    slab[2 * local..2 * local + 2].copy_from_slice(&pair);
                    written += 1;
                }
            }
            written
        };

        let active = &mut out[..required];
        let groups = workgroups as usize;
        let written: usize = match (&self.pool, self.parallel) {
            (Some(pool), true) => pool.install(|| {
                active
                    .par_chunks_mut(2 * group)
                    .enumerate()
                    .take(groups)
                    .map(run_group)
                    .sum()
            }),
            (None, true) => active
                .par_chunks_mut(2 * group)
                .enumerate()
                .take(groups)
                .map(run_group)
                .sum(),
            (_, false) => active
                .chunks_mut(2 * group)
                .enumerate()
                .take(groups)
                .map(run_group)
                .sum(),
        };

        let stats = DispatchStats {
            workgroups,
            invocations,
            written,
            guarded: invocations - written,
        };

        if !stats.is_complete(params) {
            log::warn!(
                "Under-dispatch: {} of {} helix samples written ({} workgroups, need {})",
                written,
                params.invocation_count(),
                workgroups,
                self.workgroups_for(params)
            );
        }

        Ok(stats)
    }

    /// Allocate an exactly-sized buffer and fill it with the minimal dispatch
    pub fn generate(&self, params: &HelixParams) -> Result<Vec<HelixVertex>> {
        params.validate()?;
        let mut vertices = vec![HelixVertex::default(); params.vertex_count()];
        self.dispatch(params, &mut vertices, self.workgroups_for(params))?;
        Ok(vertices)
    }
}

/// Run the kernel into `out` on rayon's global pool with 64-wide workgroups
pub fn dispatch(params: &HelixParams, out: &mut [HelixVertex], workgroups: u32) -> Result<DispatchStats> {
    CpuDispatcher::new().dispatch(params, out, workgroups)
}

/// Generate both strands of a helix on the CPU
pub fn generate(params: &HelixParams) -> Result<Vec<HelixVertex>> {
    CpuDispatcher::new().generate(params)
}
