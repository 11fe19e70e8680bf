//! Core engine — steps one simulation through its reference sequence.
//!
//! Owns the page table, frame table, fault counter, and the auxiliary
//! structures each policy needs (recency order for LRU, the remaining
//! future for Optimal). All mutation happens in `step`; everything else
//! is read-only.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, trace};

use crate::policy::lru::RecencyTracker;
use crate::policy::optimal;
use crate::types::{ConfigError, EngineState, Page, Policy, Snapshot, StepOutcome};

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// A single paging simulation: fixed capacity, fixed reference sequence,
/// one replacement policy. Construct one per run; state never persists
/// across instances.
#[derive(Debug)]
pub struct Simulator {
    policy: Policy,
    access_sequence: Vec<Page>,
    /// Resident page → frame index. Exact inverse of the non-empty
    /// `frame_table` slots. Ordered so the Optimal scan is deterministic.
    page_table: BTreeMap<Page, usize>,
    /// Physical slots, each holding at most one page.
    frame_table: Vec<Option<Page>>,
    /// Resident pages from least- to most-recently used (LRU only).
    recency: RecencyTracker,
    /// Suffix of the sequence not yet consumed (Optimal lookahead).
    future: VecDeque<Page>,
    /// Index of the next unconsumed reference.
    cursor: usize,
    fault_count: u64,
}

impl Simulator {
    /// Build an engine over `access_sequence` with `num_frames` physical
    /// frames. Fails if there are no frames or no references.
    pub fn new(
        num_frames: usize,
        access_sequence: Vec<Page>,
        policy: Policy,
    ) -> Result<Self, ConfigError> {
        if num_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if access_sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        let future = access_sequence.iter().copied().collect();

        Ok(Self {
            policy,
            page_table: BTreeMap::new(),
            frame_table: vec![None; num_frames],
            recency: RecencyTracker::new(),
            future,
            cursor: 0,
            fault_count: 0,
            access_sequence,
        })
    }

    /// Consume the next reference. Total: once the sequence is exhausted
    /// this is a no-op that keeps returning `Finished`.
    pub fn step(&mut self) -> StepOutcome {
        if self.cursor >= self.access_sequence.len() {
            return StepOutcome::Finished;
        }

        let page = self.access_sequence[self.cursor];
        self.future.pop_front();

        if self.page_table.contains_key(&page) {
            trace!(page = %page, cursor = self.cursor, "hit");
        } else {
            self.fault_count += 1;
            match self.lowest_free_frame() {
                Some(frame) => {
                    self.install(page, frame);
                    debug!(
                        page = %page,
                        frame,
                        faults = self.fault_count,
                        "page fault, filled free frame"
                    );
                }
                None => self.replace(page),
            }
        }

        if self.policy == Policy::Lru {
            self.recency.touch(page);
        }

        self.cursor += 1;
        if self.cursor == self.access_sequence.len() {
            StepOutcome::Finished
        } else {
            StepOutcome::Continuing
        }
    }

    /// Drive `step` until the sequence is exhausted; returns the total
    /// fault count. Produces exactly the same count as stepping manually.
    pub fn run_to_completion(&mut self) -> u64 {
        while let StepOutcome::Continuing = self.step() {}

        debug!(
            policy = %self.policy,
            references = self.access_sequence.len(),
            faults = self.fault_count,
            "run complete"
        );
        self.fault_count
    }

    /// Read-only view of the observable state. Never mutates.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frames: self.frame_table.clone(),
            fault_count: self.fault_count,
            consumed: self.cursor,
        }
    }

    /// Lifecycle state, derived from the cursor.
    pub fn state(&self) -> EngineState {
        if self.cursor == 0 {
            EngineState::Ready
        } else if self.cursor < self.access_sequence.len() {
            EngineState::Running
        } else {
            EngineState::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.access_sequence.len()
    }

    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    /// Index of the next unconsumed reference.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of references in the sequence.
    pub fn sequence_len(&self) -> usize {
        self.access_sequence.len()
    }

    /// References not yet consumed.
    pub fn remaining(&self) -> usize {
        self.access_sequence.len() - self.cursor
    }

    pub fn num_frames(&self) -> usize {
        self.frame_table.len()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    // -- Internals ---------------------------------------------------------

    fn lowest_free_frame(&self) -> Option<usize> {
        self.frame_table.iter().position(Option::is_none)
    }

    fn install(&mut self, page: Page, frame: usize) {
        self.frame_table[frame] = Some(page);
        self.page_table.insert(page, frame);
    }

    /// Capacity miss with no free frame: evict one resident page and
    /// install `page` in the freed slot, keeping the frame index.
    fn replace(&mut self, page: Page) {
        let victim = match self.policy {
            Policy::Lru => self.recency.pop_least_recent(),
            Policy::Optimal => optimal::select_victim(&self.page_table, &self.future),
        }
        .expect("full frame table always has a resident victim");

        let frame = self
            .page_table
            .remove(&victim)
            .expect("victim selected from resident pages");

        self.install(page, frame);
        debug!(
            page = %page,
            victim = %victim,
            frame,
            faults = self.fault_count,
            "page fault, evicted"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
