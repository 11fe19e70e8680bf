//! Replacement policies — victim selection on a capacity miss.
//!
//! The engine owns the bookkeeping these policies read (recency order
//! for LRU, remaining future references for Optimal) and consults the
//! policy only when a fault arrives with no free frame.

pub mod lru;
pub mod optimal;
