//! Worklist-driven MSD refinement.
//!
//! A pass on the most significant window leaves buckets whose members may
//! still differ in lower bits. Each bucket with more than one member becomes
//! a [`Task`] for the next window, until the windows run out or the bucket is
//! small enough for a comparison sort. Tasks live on an explicit stack, so
//! depth is bounded by the number of windows rather than the call stack.

use tracing::trace;

use crate::fallback::{insertion_sort_by_key, merge_sort_by_key};
use crate::key::RadixKey;
use crate::pass::{counting_pass, Scratch};
use crate::range::Window;

/// A sub-range of the item slice still to be ordered by `windows[level..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub start: usize,
    pub end: usize,
    pub level: usize,
}

impl Task {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How a sub-range of `len` elements is ordered at a given window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Nothing to do (0 or 1 elements).
    Done,
    Insertion,
    Merge,
    Radix,
}

/// Choose how to order `len` elements whose next window is `window`.
pub fn choose_strategy(len: usize, window: Window, insertion_threshold: usize) -> Strategy {
    if len <= 1 {
        Strategy::Done
    } else if len <= insertion_threshold {
        Strategy::Insertion
    } else if len < window.buckets() / 4 {
        // zeroing and scanning the histogram would dominate
        Strategy::Merge
    } else {
        Strategy::Radix
    }
}

/// Fully order `items` by key, given that all items already agree on every
/// bit above `windows[0]`.
///
/// Returns the number of counting passes executed.
pub fn refine<K: RadixKey>(
    items: &mut [u32],
    keys: &[K],
    windows: &[Window],
    insertion_threshold: usize,
    scratch: &mut Scratch,
) -> usize {
    if windows.is_empty() {
        return 0;
    }

    let mut passes = 0;
    let mut stack = vec![Task {
        start: 0,
        end: items.len(),
        level: 0,
    }];

    while let Some(task) = stack.pop() {
        let window = windows[task.level];
        let slice = &mut items[task.start..task.end];
        match choose_strategy(slice.len(), window, insertion_threshold) {
            Strategy::Done => {}
            Strategy::Insertion => insertion_sort_by_key(slice, keys),
            Strategy::Merge => merge_sort_by_key(slice, keys),
            Strategy::Radix => {
                let bounds = counting_pass(slice, keys, window, scratch);
                passes += 1;
                let next = task.level + 1;
                if next < windows.len() {
                    push_buckets(&mut stack, &bounds, task.start, next);
                }
            }
        }
    }

    trace!(items = items.len(), passes, "refine complete");
    passes
}

/// Push one task per bucket with at least two members.
pub(crate) fn push_buckets(stack: &mut Vec<Task>, bounds: &[usize], base: usize, level: usize) {
    for pair in bounds.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo > 1 {
            stack.push(Task {
                start: base + lo,
                end: base + hi,
                level,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::PassPlan;

    fn sorted_positions<K: RadixKey>(keys: &[K]) -> Vec<u32> {
        let mut expected: Vec<u32> = (0..keys.len() as u32).collect();
        expected.sort_by_key(|&i| keys[i as usize]);
        expected
    }

    #[test]
    fn strategy_thresholds() {
        let w16 = Window { shift: 0, width: 16 };
        let w4 = Window { shift: 0, width: 4 };
        assert_eq!(choose_strategy(1, w16, 32), Strategy::Done);
        assert_eq!(choose_strategy(20, w16, 32), Strategy::Insertion);
        assert_eq!(choose_strategy(1000, w16, 32), Strategy::Merge);
        assert_eq!(choose_strategy(1000, w4, 32), Strategy::Radix);
    }

    #[test]
    fn refines_two_levels() {
        // 12 significant bits, 6 per pass, with many duplicates
        let keys: Vec<u16> = (0..5000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 20) as u16).collect();
        let plan = PassPlan::new(12, 6);
        let mut items: Vec<u32> = (0..keys.len() as u32).collect();
        let passes = refine(&mut items, &keys, plan.windows(), 8, &mut Scratch::new());
        assert!(passes >= 2);
        assert_eq!(items, sorted_positions(&keys));
    }

    #[test]
    fn depth_bounded_by_windows() {
        let keys: Vec<u32> = (0..4096u32).rev().collect();
        let plan = PassPlan::new(12, 4);
        let mut items: Vec<u32> = (0..4096).collect();
        refine(&mut items, &keys, plan.windows(), 1, &mut Scratch::new());
        assert_eq!(items, sorted_positions(&keys));
    }

    #[test]
    fn no_windows_is_noop() {
        let keys: Vec<u8> = vec![3, 1, 2];
        let mut items: Vec<u32> = vec![0, 1, 2];
        assert_eq!(refine(&mut items, &keys, &[], 32, &mut Scratch::new()), 0);
        assert_eq!(items, vec![0, 1, 2]);
    }

    #[test]
    fn push_buckets_skips_trivial() {
        let mut stack = Vec::new();
        push_buckets(&mut stack, &[0, 0, 1, 4, 6], 10, 2);
        assert_eq!(
            stack,
            vec![
                Task { start: 11, end: 14, level: 2 },
                Task { start: 14, end: 16, level: 2 },
            ]
        );
    }
}
