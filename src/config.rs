//! Solver knobs.

use serde::{Deserialize, Serialize};

/// Stack reserved for every worker thread. The search recurses once per agent step.
pub const DEFAULT_WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on threads working at once. Values below 1 act as 1.
    pub max_threads: usize,
    /// Run the relaxed pass when the strict pass finds nothing.
    pub combo_fallback: bool,
    pub worker_stack_size: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_threads: 1,
            combo_fallback: true,
            worker_stack_size: DEFAULT_WORKER_STACK_SIZE,
        }
    }
}

impl SolverConfig {
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads.max(1);
        self
    }

    pub fn with_combo_fallback(mut self, enabled: bool) -> Self {
        self.combo_fallback = enabled;
        self
    }

    pub fn with_worker_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = bytes;
        self
    }
}
