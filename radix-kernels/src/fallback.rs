//! Comparison sorts for buckets too small to be worth another radix pass.

use crate::key::RadixKey;

/// Stable binary insertion sort of positions by their key.
///
/// The insertion point is the upper bound among equal keys, so equal keys
/// keep their input order.
pub fn insertion_sort_by_key<K: RadixKey>(items: &mut [u32], keys: &[K]) {
    for i in 1..items.len() {
        let key = keys[items[i] as usize];
        let mut lo = 0;
        let mut hi = i;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if keys[items[mid] as usize] > key {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        if lo < i {
            items[lo..=i].rotate_right(1);
        }
    }
}

/// Stable merge sort of positions by their key.
pub fn merge_sort_by_key<K: RadixKey>(items: &mut [u32], keys: &[K]) {
    items.sort_by_key(|&item| keys[item as usize]);
}
