//! Batch policy comparison.
//!
//! Sweeps frame capacities `1..=max_frames`, replaying the same
//! reference sequence through a fresh LRU engine and a fresh Optimal
//! engine at each capacity, and collects the total fault counts into
//! two parallel series. Rendering the series (charts, tables) is the
//! caller's business; this module only produces the numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::engine::Simulator;
use crate::types::{ConfigError, Page, Policy};

// ---------------------------------------------------------------------------
// Comparison report
// ---------------------------------------------------------------------------

/// Fault counts per capacity for both policies. Index 0 corresponds to
/// capacity 1; both series have length `max_frames`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub max_frames: usize,
    pub lru_faults: Vec<u64>,
    pub optimal_faults: Vec<u64>,
}

impl ComparisonReport {
    /// Fault count for `policy` at `num_frames`, if it was part of the
    /// sweep.
    pub fn faults_at(&self, policy: Policy, num_frames: usize) -> Option<u64> {
        if num_frames == 0 {
            return None;
        }
        let series = match policy {
            Policy::Lru => &self.lru_faults,
            Policy::Optimal => &self.optimal_faults,
        };
        series.get(num_frames - 1).copied()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = vec![format!("{:>6}  {:>6}  {:>7}", "Frames", "LRU", "Optimal")];
        for (i, (lru, opt)) in self
            .lru_faults
            .iter()
            .zip(self.optimal_faults.iter())
            .enumerate()
        {
            lines.push(format!("{:>6}  {:>6}  {:>7}", i + 1, lru, opt));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Run both policies over `access_sequence` at every capacity in
/// `1..=max_frames`. `num_pages` declares the address-space size; every
/// referenced page id must fall below it. Each trial gets a freshly
/// constructed engine — no state crosses capacities.
pub fn compare(
    access_sequence: &[Page],
    num_pages: u32,
    max_frames: usize,
) -> Result<ComparisonReport, ConfigError> {
    if max_frames == 0 {
        return Err(ConfigError::NoCapacityRange);
    }
    if access_sequence.is_empty() {
        return Err(ConfigError::EmptySequence);
    }
    if let Some(&page) = access_sequence.iter().find(|p| p.id() >= num_pages) {
        return Err(ConfigError::PageOutOfRange { page, num_pages });
    }

    let mut lru_faults = Vec::with_capacity(max_frames);
    let mut optimal_faults = Vec::with_capacity(max_frames);

    for num_frames in 1..=max_frames {
        let mut lru = Simulator::new(num_frames, access_sequence.to_vec(), Policy::Lru)?;
        lru_faults.push(lru.run_to_completion());

        let mut opt = Simulator::new(num_frames, access_sequence.to_vec(), Policy::Optimal)?;
        optimal_faults.push(opt.run_to_completion());

        debug!(
            num_frames,
            lru = lru_faults[num_frames - 1],
            optimal = optimal_faults[num_frames - 1],
            "capacity trial complete"
        );
    }

    info!(
        max_frames,
        references = access_sequence.len(),
        "policy comparison complete"
    );

    Ok(ComparisonReport {
        max_frames,
        lru_faults,
        optimal_faults,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::access_sequence;

    const REFERENCE_IDS: [u32; 14] = [0, 2, 1, 3, 0, 4, 2, 1, 5, 6, 2, 0, 3, 7];

    #[test]
    fn test_series_have_requested_length() {
        let seq = access_sequence(&REFERENCE_IDS);
        let report = compare(&seq, 8, 10).unwrap();

        assert_eq!(report.max_frames, 10);
        assert_eq!(report.lru_faults.len(), 10);
        assert_eq!(report.optimal_faults.len(), 10);
    }

    #[test]
    fn test_series_bounded_by_sequence_length() {
        let seq = access_sequence(&REFERENCE_IDS);
        let report = compare(&seq, 8, 10).unwrap();

        for (lru, opt) in report.lru_faults.iter().zip(report.optimal_faults.iter()) {
            assert!(*lru <= seq.len() as u64);
            assert!(*opt <= seq.len() as u64);
        }
    }

    #[test]
    fn test_optimal_never_beats_lru_pointwise() {
        let seq = access_sequence(&REFERENCE_IDS);
        let report = compare(&seq, 8, 10).unwrap();

        for (lru, opt) in report.lru_faults.iter().zip(report.optimal_faults.iter()) {
            assert!(opt <= lru, "Optimal must not fault more than LRU");
        }
    }

    #[test]
    fn test_ample_capacity_faults_once_per_distinct_page() {
        // 8 distinct pages: any capacity >= 8 faults exactly 8 times.
        let seq = access_sequence(&REFERENCE_IDS);
        let report = compare(&seq, 8, 10).unwrap();

        assert_eq!(report.faults_at(Policy::Lru, 8), Some(8));
        assert_eq!(report.faults_at(Policy::Lru, 10), Some(8));
        assert_eq!(report.faults_at(Policy::Optimal, 8), Some(8));
        assert_eq!(report.faults_at(Policy::Optimal, 10), Some(8));
    }

    #[test]
    fn test_faults_at_out_of_sweep() {
        let seq = access_sequence(&[0, 1]);
        let report = compare(&seq, 2, 3).unwrap();

        assert_eq!(report.faults_at(Policy::Lru, 0), None);
        assert_eq!(report.faults_at(Policy::Lru, 4), None);
        assert!(report.faults_at(Policy::Optimal, 3).is_some());
    }

    #[test]
    fn test_rejects_zero_max_frames() {
        let seq = access_sequence(&[0, 1]);
        assert_eq!(compare(&seq, 2, 0).unwrap_err(), ConfigError::NoCapacityRange);
    }

    #[test]
    fn test_rejects_empty_sequence() {
        assert_eq!(compare(&[], 2, 5).unwrap_err(), ConfigError::EmptySequence);
    }

    #[test]
    fn test_rejects_page_outside_address_space() {
        let seq = access_sequence(&[0, 7, 3]);
        let err = compare(&seq, 4, 5).unwrap_err();

        assert_eq!(
            err,
            ConfigError::PageOutOfRange {
                page: Page(7),
                num_pages: 4
            }
        );
    }

    #[test]
    fn test_report_display_table() {
        let seq = access_sequence(&[0, 1, 0, 1]);
        let report = compare(&seq, 2, 2).unwrap();
        let rendered = format!("{report}");

        assert!(rendered.contains("Frames"));
        assert!(rendered.contains("LRU"));
        assert!(rendered.contains("Optimal"));
        assert_eq!(rendered.lines().count(), 3);
    }
}
