//! Lock-free state shared by every task of one search.
//!
//! Node ids are dense, so both tables are flat arrays of atomics indexed by
//! id. Nothing here blocks: claims are a single `fetch_or`, predecessor
//! writes are a `compare_exchange` or a `store`, and the found flag is an
//! `AtomicBool`.

use crate::traits::NodeId;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

const WORD_BITS: usize = u64::BITS as usize;
const NO_PREDECESSOR: usize = usize::MAX;

/// Set of claimed nodes.
///
/// [`claim`](Self::claim) is the only way in, and it returns `true` to
/// exactly one caller per id.
#[derive(Debug)]
pub struct VisitedSet {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl VisitedSet {
    pub fn new(num_nodes: usize) -> Self {
        let words = (0..num_nodes.div_ceil(WORD_BITS))
            .map(|_| AtomicU64::new(0))
            .collect();
        Self {
            words,
            len: num_nodes,
        }
    }

    /// Capacity in nodes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.len
    }

    /// Atomically insert `id`; `true` if this call inserted it.
    ///
    /// # Panics
    /// Panics if `id >= capacity()`.
    #[inline]
    pub fn claim(&self, id: NodeId) -> bool {
        let (word, mask) = Self::locate(id);
        let prev = self.words[word].fetch_or(mask, Ordering::AcqRel);
        prev & mask == 0
    }

    /// Snapshot membership test. Only [`claim`](Self::claim) is authoritative.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        let (word, mask) = Self::locate(id);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Number of claimed nodes at the time of the call.
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// Claimed ids in ascending order.
    pub fn to_vec(&self) -> Vec<NodeId> {
        (0..self.len).filter(|&id| self.contains(id)).collect()
    }

    #[inline]
    fn locate(id: NodeId) -> (usize, u64) {
        (id / WORD_BITS, 1u64 << (id % WORD_BITS))
    }
}

/// Child → parent edges of the exploration tree.
#[derive(Debug)]
pub struct PredecessorMap {
    slots: Box<[AtomicUsize]>,
}

impl PredecessorMap {
    pub fn new(num_nodes: usize) -> Self {
        let slots = (0..num_nodes)
            .map(|_| AtomicUsize::new(NO_PREDECESSOR))
            .collect();
        Self { slots }
    }

    /// Record `parent` for a freshly discovered `child` if it has no entry yet.
    ///
    /// Returns `true` if this call wrote the entry.
    #[inline]
    pub fn record(&self, child: NodeId, parent: NodeId) -> bool {
        self.slots[child]
            .compare_exchange(
                NO_PREDECESSOR,
                parent,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Overwrite the entry for `child`.
    ///
    /// Only the task that claimed `child` calls this, so the value it stores
    /// is the edge that task actually walked.
    #[inline]
    pub fn settle(&self, child: NodeId, parent: NodeId) {
        self.slots[child].store(parent, Ordering::Release);
    }

    #[inline]
    pub fn lookup(&self, child: NodeId) -> Option<NodeId> {
        match self.slots.get(child)?.load(Ordering::Acquire) {
            NO_PREDECESSOR => None,
            parent => Some(parent),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One-shot "a goal was reached" signal.
#[derive(Debug, Default)]
pub struct FoundFlag(AtomicBool);

impl FoundFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    #[inline]
    pub fn signal_found(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Relaxed read for the frontier loop; a missed signal is seen on a later
    /// iteration.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything the tasks of one search share.
#[derive(Debug)]
pub struct SharedState {
    pub visited: VisitedSet,
    pub predecessors: PredecessorMap,
    pub found: FoundFlag,
}

impl SharedState {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            visited: VisitedSet::new(num_nodes),
            predecessors: PredecessorMap::new(num_nodes),
            found: FoundFlag::new(),
        }
    }
}
