//! Optimal (Belady) victim selection.
//!
//! Picks the resident page whose next occurrence in the remaining
//! reference stream is farthest away; a page that never recurs is
//! infinitely far and preferred over any page that does. The scan is
//! O(residents × remaining references) per fault, which is fine at
//! simulation scale; large inputs would precompute per-page occurrence
//! positions instead of rescanning.

use std::collections::{BTreeMap, VecDeque};

use crate::types::Page;

/// Select the eviction victim among `residents` given the un-consumed
/// suffix of the access sequence.
///
/// Residents are scanned in ascending page order and a candidate is
/// replaced only by a strictly farther next use, so ties — including
/// several pages that never recur — fall to the smallest page id.
/// Returns `None` only when there are no residents.
pub fn select_victim(
    residents: &BTreeMap<Page, usize>,
    future: &VecDeque<Page>,
) -> Option<Page> {
    let mut victim: Option<(Page, Option<usize>)> = None;

    for &page in residents.keys() {
        let dist = next_use(page, future);
        match victim {
            Some((_, best)) if !farther(dist, best) => {}
            _ => victim = Some((page, dist)),
        }
    }

    victim.map(|(page, _)| page)
}

/// Position of the next use of `page` in the remaining references,
/// or `None` if it is never referenced again.
fn next_use(page: Page, future: &VecDeque<Page>) -> Option<usize> {
    future.iter().position(|&p| p == page)
}

/// Whether next-use distance `a` is strictly farther than `b`.
/// `None` (never used again) beats any finite distance.
fn farther(a: Option<usize>, b: Option<usize>) -> bool {
    match (a, b) {
        (None, None) => false,
        (None, Some(_)) => true,
        (Some(_), None) => false,
        (Some(x), Some(y)) => x > y,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn residents(pages: &[(u32, usize)]) -> BTreeMap<Page, usize> {
        pages.iter().map(|&(p, f)| (Page(p), f)).collect()
    }

    fn future(ids: &[u32]) -> VecDeque<Page> {
        ids.iter().copied().map(Page).collect()
    }

    #[test]
    fn test_farthest_next_use_evicted() {
        let res = residents(&[(0, 0), (1, 1), (2, 2)]);
        // Next uses: 0 -> pos 0, 2 -> pos 1, 1 -> pos 4
        let fut = future(&[0, 2, 0, 2, 1]);

        assert_eq!(select_victim(&res, &fut), Some(Page(1)));
    }

    #[test]
    fn test_never_used_again_preferred() {
        let res = residents(&[(0, 0), (1, 1), (2, 2)]);
        // Page 2 never recurs; 0 and 1 both do, far out
        let fut = future(&[3, 3, 3, 3, 0, 1]);

        assert_eq!(select_victim(&res, &fut), Some(Page(2)));
    }

    #[test]
    fn test_tie_between_dead_pages_takes_smallest_id() {
        let res = residents(&[(4, 0), (7, 1), (2, 2)]);
        // None of the residents recur
        let fut = future(&[9, 9, 9]);

        assert_eq!(select_victim(&res, &fut), Some(Page(2)));
    }

    #[test]
    fn test_empty_future_takes_smallest_id() {
        let res = residents(&[(6, 0), (2, 1), (0, 2)]);
        let fut = future(&[]);

        assert_eq!(select_victim(&res, &fut), Some(Page(0)));
    }

    #[test]
    fn test_no_residents() {
        let res = residents(&[]);
        let fut = future(&[1, 2, 3]);

        assert_eq!(select_victim(&res, &fut), None);
    }

    #[test]
    fn test_next_use_finds_first_occurrence() {
        let fut = future(&[3, 1, 3, 1]);
        assert_eq!(next_use(Page(1), &fut), Some(1));
        assert_eq!(next_use(Page(3), &fut), Some(0));
        assert_eq!(next_use(Page(8), &fut), None);
    }

    #[test]
    fn test_farther_ordering() {
        assert!(farther(None, Some(100)));
        assert!(!farther(Some(100), None));
        assert!(farther(Some(5), Some(4)));
        assert!(!farther(Some(4), Some(4)));
        assert!(!farther(None, None));
    }
}
