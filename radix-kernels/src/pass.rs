//! One stable counting-sort pass over a bit window.
//!
//! The pass works on a slice of positions into a key array:
//! 1. Histogram the window digit of every position's key.
//! 2. Exclusive prefix sum to get each bucket's start offset.
//! 3. Scatter positions, in input order, to `offset[bucket]++`.
//!
//! Scanning in input order with monotonically increasing offsets keeps equal
//! digits in their original relative order.

use crate::key::RadixKey;
use crate::range::Window;

/// Scratch memory reused by successive passes within one sort call.
#[derive(Debug, Default)]
pub struct Scratch {
    histogram: Vec<usize>,
    buffer: Vec<u32>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stably reorder `items` by `keys[item]`'s `window` digit.
///
/// Returns the bucket boundaries: bucket `b` occupies
/// `bounds[b]..bounds[b + 1]` of `items` after the call.
pub fn counting_pass<K: RadixKey>(
    items: &mut [u32],
    keys: &[K],
    window: Window,
    scratch: &mut Scratch,
) -> Vec<usize> {
    let buckets = window.buckets();
    let mask = window.mask();
    let shift = window.shift;

    // counts[b + 1] holds the size of bucket b, so the in-place prefix sum
    // leaves counts[b] as the start of bucket b.
    let counts = &mut scratch.histogram;
    counts.clear();
    counts.resize(buckets + 1, 0);
    for &item in items.iter() {
        counts[keys[item as usize].digit(shift, mask) + 1] += 1;
    }
    for b in 1..=buckets {
        counts[b] += counts[b - 1];
    }
    let bounds = counts.clone();

    let out = &mut scratch.buffer;
    out.clear();
    out.resize(items.len(), 0);
    for &item in items.iter() {
        let d = keys[item as usize].digit(shift, mask);
        out[counts[d]] = item;
        counts[d] += 1;
    }
    items.copy_from_slice(out);

    bounds
}
