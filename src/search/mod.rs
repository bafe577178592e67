//! Route search: a strict pass, then optionally a relaxed pass with combos enabled.

pub mod combo;
pub mod engine;
pub mod feasibility;
pub mod parallel;
pub mod stats;

use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SolverConfig;
use crate::puzzle::Puzzle;
use crate::solution::Solution;

use self::engine::Explorer;
use self::parallel::SharedContext;
use self::stats::SearchStats;

/// Extra steps the relaxed pass grants each agent when estimating what it can still reach.
///
/// Combos clear cells nobody walks over, so the pruner has to look a little further.
pub const COMBO_TOLERANCE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    /// Exact budgets, no combos, cells without obligations tried first.
    Strict,
    /// Combos fire at every depth boundary and the pruner allows [`COMBO_TOLERANCE`].
    Relaxed,
}

impl Pass {
    #[inline]
    pub fn tolerance(self) -> u32 {
        match self {
            Pass::Strict => 0,
            Pass::Relaxed => COMBO_TOLERANCE,
        }
    }

    #[inline]
    pub fn fires_combos(self) -> bool {
        matches!(self, Pass::Relaxed)
    }

    #[inline]
    pub fn defers_obligations(self) -> bool {
        matches!(self, Pass::Strict)
    }

    pub fn label(self) -> &'static str {
        match self {
            Pass::Strict => "strict",
            Pass::Relaxed => "relaxed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PassReport {
    pub pass: Pass,
    pub elapsed: Duration,
    pub stats: SearchStats,
    pub solution: Option<Solution>,
}

/// Every pass that ran, in order.
#[derive(Debug, Clone, Default)]
pub struct SolveReport {
    pub passes: Vec<PassReport>,
}

impl SolveReport {
    /// The first solution found, if any pass found one.
    pub fn solution(&self) -> Option<&Solution> {
        self.passes.iter().find_map(|p| p.solution.as_ref())
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

pub struct Solver<'p> {
    puzzle: &'p Puzzle,
    config: SolverConfig,
    shared: SharedContext,
    pool: Option<ThreadPool>,
}

impl<'p> Solver<'p> {
    /// Every pass runs on a worker with `worker_stack_size` of stack, even with a single thread.
    pub fn new(puzzle: &'p Puzzle, config: SolverConfig) -> Self {
        let wanted = config.max_threads.max(1);
        let built = ThreadPoolBuilder::new()
            .num_threads(wanted)
            .stack_size(config.worker_stack_size)
            .thread_name(|i| format!("sweep-worker-{i}"))
            .build();
        let pool = match built {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(
                    error = %err,
                    threads = wanted,
                    "worker pool unavailable, searching serially on the calling thread"
                );
                None
            }
        };
        let threads = if pool.is_some() { wanted } else { 1 };

        Self {
            puzzle,
            config,
            shared: SharedContext::new(threads),
            pool,
        }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Thread accounting and the solved flag of the most recent pass.
    #[inline]
    pub fn shared(&self) -> &SharedContext {
        &self.shared
    }

    pub fn run_pass(&self, pass: Pass) -> PassReport {
        self.shared.reset();
        info!(
            pass = pass.label(),
            threads = self.shared.max_threads(),
            "search pass started"
        );

        let started = Instant::now();
        let mut explorer = Explorer::new(self.puzzle, pass, &self.shared);
        let found = match &self.pool {
            Some(pool) => pool.install(|| explorer.explore(0, 0)),
            None => explorer.explore(0, 0),
        };
        let elapsed = started.elapsed();

        let (state, stats) = explorer.into_parts();
        let solution = found.then(|| Solution::from_routes(self.puzzle, pass, &state.routes));

        info!(
            pass = pass.label(),
            solved = found,
            elapsed_ms = elapsed.as_millis() as u64,
            nodes = stats.nodes,
            pruned = stats.pruned,
            combos = stats.combos,
            fan_outs = stats.fan_outs,
            peak_threads = self.shared.peak(),
            "search pass finished"
        );

        PassReport {
            pass,
            elapsed,
            stats,
            solution,
        }
    }

    /// Strict pass first; the relaxed pass runs only if that fails and the fallback is enabled.
    pub fn solve(&self) -> SolveReport {
        let mut report = SolveReport::default();

        let strict = self.run_pass(Pass::Strict);
        let solved = strict.solution.is_some();
        report.passes.push(strict);

        if !solved && self.config.combo_fallback {
            report.passes.push(self.run_pass(Pass::Relaxed));
        }
        report
    }
}

/// Build a solver for `puzzle` and run it to completion.
pub fn solve(puzzle: &Puzzle, config: SolverConfig) -> SolveReport {
    Solver::new(puzzle, config).solve()
}
