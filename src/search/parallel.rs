//! Thread budget and branch fan-out.
//!
//! A branch point runs its moves concurrently only if the extra threads fit the budget at that
//! moment; otherwise it falls back to the serial loop. The main search thread counts as one
//! committed thread, so a budget of 1 never fans out.
//!
//! Every concurrent branch works on its own copy of the search state. The first branch to reach a
//! complete solution raises the shared solved flag; the remaining branches stop at their next call.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::debug;

use crate::board::step::apply_step;
use crate::core::cell::Cell;
use crate::search::engine::Explorer;

#[derive(Debug, Clone, Copy)]
struct Committed {
    current: usize,
    peak: usize,
}

/// State shared by every branch of one solver.
#[derive(Debug)]
pub struct SharedContext {
    max_threads: usize,
    committed: Mutex<Committed>,
    solved: AtomicBool,
}

impl SharedContext {
    pub fn new(max_threads: usize) -> Self {
        Self {
            max_threads: max_threads.max(1),
            committed: Mutex::new(Committed {
                current: 1,
                peak: 1,
            }),
            solved: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Threads currently working, the main thread included.
    pub fn committed(&self) -> usize {
        self.committed.lock().current
    }

    /// High-water mark of [`Self::committed`] since the last [`Self::reset`].
    pub fn peak(&self) -> usize {
        self.committed.lock().peak
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solved.load(Ordering::Acquire)
    }

    pub(crate) fn mark_solved(&self) {
        self.solved.store(true, Ordering::Release);
    }

    /// Prepare for a new pass.
    pub fn reset(&self) {
        self.solved.store(false, Ordering::Release);
        let mut c = self.committed.lock();
        c.peak = c.current;
    }

    /// Commit `extra` more threads if the budget has room for all of them.
    ///
    /// The slots are handed back when the returned guard drops.
    pub fn try_reserve(&self, extra: usize) -> Option<Reservation<'_>> {
        let mut c = self.committed.lock();
        if c.current >= self.max_threads || c.current + extra > self.max_threads {
            return None;
        }
        c.current += extra;
        c.peak = c.peak.max(c.current);
        Some(Reservation {
            shared: self,
            slots: extra,
        })
    }

    fn release(&self, slots: usize) {
        let mut c = self.committed.lock();
        c.current = c.current.saturating_sub(slots);
    }
}

/// Threads committed to one fan-out.
#[must_use]
#[derive(Debug)]
pub struct Reservation<'a> {
    shared: &'a SharedContext,
    slots: usize,
}

impl Reservation<'_> {
    pub fn slots(&self) -> usize {
        self.slots
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.shared.release(self.slots);
    }
}

impl<'p> Explorer<'p> {
    /// Run every move of agent `index` on its own copy of the state and join them all.
    ///
    /// On success the state of the first successful branch (in move order) is adopted, so
    /// `state.routes` holds that branch's records.
    pub(super) fn fan_out(
        &mut self,
        depth: u32,
        index: usize,
        moves: &[Cell],
        reservation: Reservation<'_>,
    ) -> bool {
        self.stats.bump_fan_outs();
        debug!(
            depth,
            agent = index,
            branches = moves.len(),
            committed = self.shared.committed(),
            "fan-out"
        );

        let this = &*self;
        let branches: Vec<(bool, Explorer<'p>)> = moves
            .par_iter()
            .map(|&to| {
                let mut child = this.fork();
                apply_step(
                    &mut child.state.board,
                    child.puzzle.proximity(),
                    &mut child.state.agents[index],
                    to,
                );
                let found = child.explore(depth, index + 1);
                if found {
                    child.state.routes[index].push_front(to);
                }
                (found, child)
            })
            .collect();
        drop(reservation);

        let mut adopted = false;
        for (found, child) in branches {
            self.stats.merge(&child.stats);
            if found && !adopted {
                self.state = child.state;
                adopted = true;
            }
        }
        adopted
    }
}
