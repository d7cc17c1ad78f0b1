//! Counters collected during one search.
//!
//! Workers bump these with relaxed atomics; the totals are read once the
//! fork/join region has ended, which orders every update before the read.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Totals for a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tasks started, the root included.
    pub tasks: usize,
    /// Successful claims.
    pub nodes_claimed: usize,
    /// Frontier entries dropped because another task had claimed them.
    pub claims_lost: usize,
    /// Largest number of tasks alive at the same time. A task is alive from
    /// the moment it is forked until its frontier is drained.
    pub peak_live_tasks: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    tasks: AtomicUsize,
    nodes_claimed: AtomicUsize,
    claims_lost: AtomicUsize,
    live: AtomicUsize,
    peak_live: AtomicUsize,
}

impl StatsRecorder {
    /// Count a task as alive until the guard drops.
    pub(crate) fn enter_task(&self) -> LiveTask<'_> {
        self.tasks.fetch_add(1, Ordering::Relaxed);
        let live = self.live.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_live.fetch_max(live, Ordering::Relaxed);
        LiveTask { recorder: self }
    }

    #[inline]
    pub(crate) fn claimed(&self) {
        self.nodes_claimed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn claim_lost(&self) {
        self.claims_lost.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> SearchStats {
        SearchStats {
            tasks: self.tasks.load(Ordering::Relaxed),
            nodes_claimed: self.nodes_claimed.load(Ordering::Relaxed),
            claims_lost: self.claims_lost.load(Ordering::Relaxed),
            peak_live_tasks: self.peak_live.load(Ordering::Relaxed),
        }
    }
}

pub(crate) struct LiveTask<'a> {
    recorder: &'a StatsRecorder,
}

impl Drop for LiveTask<'_> {
    fn drop(&mut self) {
        self.recorder.live.fetch_sub(1, Ordering::Relaxed);
    }
}
