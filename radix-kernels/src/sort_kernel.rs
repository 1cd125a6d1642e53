//! Radix sort driver.
//!
//! Plans MSD passes for the key range (at most [`MAX_PASS_BITS`] bits per
//! pass), runs the first pass over the whole slice and refines the resulting
//! buckets. Buckets are disjoint sub-slices, so for large inputs they are
//! handed to the rayon pool, each worker with its own scratch memory.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::key::RadixKey;
use crate::pass::{counting_pass, Scratch};
use crate::range::{PassPlan, MAX_PASS_BITS};
use crate::refine::{choose_strategy, refine, Strategy};

/// Tuning knobs for one sort call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixParams {
    /// Maximum bits per counting pass (1..=16).
    pub max_pass_bits: u32,
    /// Buckets with at most this many members use insertion sort.
    pub insertion_threshold: usize,
    /// Refine buckets on the rayon pool.
    pub parallel: bool,
    /// Minimum number of items before parallel refinement kicks in.
    pub parallel_threshold: usize,
}

impl Default for RadixParams {
    fn default() -> Self {
        Self {
            max_pass_bits: MAX_PASS_BITS,
            insertion_threshold: 32,
            parallel: true,
            parallel_threshold: 1 << 16,
        }
    }
}

/// Counters describing what a sort call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Windows in the pass plan.
    pub windows: usize,
    /// Counting passes actually executed (over all buckets).
    pub passes: usize,
    /// Whether buckets were refined on the rayon pool.
    pub parallel: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SortKernel {
    params: RadixParams,
}

impl SortKernel {
    pub fn new(params: RadixParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RadixParams {
        &self.params
    }

    /// Stably order `items` (positions into `keys`) by key.
    ///
    /// `bits` is the number of significant low bits in every key; bits above
    /// it must be zero for all items.
    pub fn sort<K: RadixKey>(&self, items: &mut [u32], keys: &[K], bits: u32) -> SortStats {
        let plan = PassPlan::new(bits.min(K::BITS), self.params.max_pass_bits);
        let mut stats = SortStats {
            windows: plan.passes(),
            ..SortStats::default()
        };
        if plan.is_empty() || items.len() <= 1 {
            return stats;
        }

        let windows = plan.windows();
        let use_pool = self.params.parallel
            && windows.len() > 1
            && items.len() >= self.params.parallel_threshold
            && choose_strategy(items.len(), windows[0], self.params.insertion_threshold)
                == Strategy::Radix;

        if !use_pool {
            let mut scratch = Scratch::new();
            stats.passes = refine(
                items,
                keys,
                windows,
                self.params.insertion_threshold,
                &mut scratch,
            );
        } else {
            let mut scratch = Scratch::new();
            let bounds = counting_pass(items, keys, windows[0], &mut scratch);
            drop(scratch);

            let chunks = split_buckets(items, &bounds);
            trace!(buckets = chunks.len(), "dispatching bucket refinement");
            let threshold = self.params.insertion_threshold;
            let rest = &windows[1..];
            let refined: usize = chunks
                .into_par_iter()
                .map_init(Scratch::new, |scratch, chunk| {
                    refine(chunk, keys, rest, threshold, scratch)
                })
                .sum();
            stats.passes = 1 + refined;
            stats.parallel = true;
        }

        debug!(
            items = items.len(),
            bits,
            windows = stats.windows,
            passes = stats.passes,
            parallel = stats.parallel,
            "SortKernel::sort"
        );
        stats
    }
}

/// Cut `items` at the bucket boundaries, keeping buckets with two or more
/// members.
fn split_buckets<'a>(items: &'a mut [u32], bounds: &[usize]) -> Vec<&'a mut [u32]> {
    let mut chunks = Vec::new();
    let mut rest = items;
    for pair in bounds.windows(2) {
        let len = pair[1] - pair[0];
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        rest = tail;
        if len > 1 {
            chunks.push(head);
        }
    }
    chunks
}
