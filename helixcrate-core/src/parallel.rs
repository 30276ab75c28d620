//! Thread pool configuration for CPU dispatch
//!
//! By default the CPU dispatcher runs on rayon's global pool. A dedicated pool
//! can be requested through [`ParallelConfig`], e.g. to pin the generator to a
//! fixed number of threads next to a render loop.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Thread pool configuration for parallel processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of threads to use (None = rayon's global pool)
    pub num_threads: Option<usize>,
    /// Thread name prefix for a dedicated pool
    pub thread_name_prefix: String,
    /// Enable parallel processing (can be disabled for debugging)
    pub enabled: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "helixcrate-cpu".to_string(),
            enabled: true,
        }
    }
}

impl ParallelConfig {
    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Enable or disable parallel processing
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the dedicated pool, if one was requested.
    ///
    /// Returns `Ok(None)` when the global pool should be used or parallelism
    /// is disabled.
    pub fn build_pool(&self) -> Result<Option<Arc<ThreadPool>>> {
        let Some(num_threads) = self.num_threads.filter(|_| self.enabled) else {
            return Ok(None);
        };

        if num_threads == 0 {
            return Err(Error::Parallel("num_threads must be at least 1".to_string()));
        }

        let mut builder = ThreadPoolBuilder::new().num_threads(num_threads);
        if !self.thread_name_prefix.is_empty() {
            let prefix = self.thread_name_prefix.clone();
            builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
        }

        let pool = builder
            .build()
            .map_err(|e| Error::Parallel(format!("Failed to create thread pool: {}", e)))?;

        log::debug!("Created CPU dispatch pool with {} threads", num_threads);
        Ok(Some(Arc::new(pool)))
    }
}
