//! Shared types for the paging simulator.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that the engine, policy,
//! and comparator modules can depend on them without circular
//! references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A logical page, identified by an integer. Pages have no attributes
/// beyond identity; the access sequence is just an ordered list of these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Page(pub u32);

impl Page {
    /// The raw page identifier.
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Page {
    fn from(id: u32) -> Self {
        Page(id)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build an access sequence from raw page identifiers.
pub fn access_sequence(ids: &[u32]) -> Vec<Page> {
    ids.iter().copied().map(Page).collect()
}

// ---------------------------------------------------------------------------
// Replacement policy
// ---------------------------------------------------------------------------

/// Which eviction algorithm the engine runs on a capacity miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Evict the least-recently-used resident page.
    Lru,
    /// Evict the resident page whose next use lies farthest in the
    /// future (Belady's algorithm). Ties go to the smallest page id.
    Optimal,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Lru => write!(f, "LRU"),
            Policy::Optimal => write!(f, "Optimal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine lifecycle
// ---------------------------------------------------------------------------

/// Result of advancing the simulation by one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// More references remain to be consumed.
    Continuing,
    /// The last reference has been consumed (or already was).
    Finished,
}

impl StepOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, StepOutcome::Finished)
    }
}

/// Lifecycle state of an engine: `Ready → Running → Finished`.
/// `Finished` is terminal; further steps are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Running,
    Finished,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only view of the engine's observable state, taken between steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Per-frame contents, indexed by frame: `None` is an empty slot.
    pub frames: Vec<Option<Page>>,
    /// Page faults observed so far.
    pub fault_count: u64,
    /// How many references have been consumed.
    pub consumed: usize,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.frames.iter().enumerate() {
            match slot {
                Some(page) => writeln!(f, "Frame {i}: Page {page}")?,
                None => writeln!(f, "Frame {i}: Empty")?,
            }
        }
        write!(f, "Page Faults: {}", self.fault_count)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Configuration errors raised at construction time. Once an engine is
/// built, no operation on it can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("number of frames must be positive")]
    NoFrames,

    #[error("access sequence is empty")]
    EmptySequence,

    #[error("capacity range is empty: max_frames must be positive")]
    NoCapacityRange,

    #[error("page {page} outside address space of {num_pages} pages")]
    PageOutOfRange { page: Page, num_pages: u32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
