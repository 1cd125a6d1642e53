//! Key extraction: column values to unsigned radix keys.
//!
//! Signed integers of width `b` map to `b`-bit unsigned keys by flipping the
//! sign bit, so the most negative value becomes `0` and the most positive
//! becomes `2^b - 1`. Booleans map `{null, false, true}` to `{0, 1, 2}`.
//! Unsigned order of the keys is then the column's sort order.

use radix_kernels::key::low_mask;
use radix_kernels::RadixKey;

use crate::column::{ColumnData, BOOL_FALSE, NA_BOOL};

pub const BOOL_NULL_KEY: u64 = 0;
pub const BOOL_FALSE_KEY: u64 = 1;
pub const BOOL_TRUE_KEY: u64 = 2;

/// Order-preserving map from a `bits`-wide signed value to unsigned.
///
/// `value` must be representable in `bits` bits (1..=64).
#[inline]
#[must_use]
pub fn sign_flip(value: i64, bits: u32) -> u64 {
    debug_assert!((1..=64).contains(&bits));
    ((value as u64) & low_mask(bits)) ^ (1u64 << (bits - 1))
}

/// Inverse of [`sign_flip`].
#[inline]
#[must_use]
pub fn sign_unflip(key: u64, bits: u32) -> i64 {
    debug_assert!((1..=64).contains(&bits));
    let raw = key ^ (1u64 << (bits - 1));
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}

#[inline]
#[must_use]
pub fn bool_key(stored: i8) -> u64 {
    match stored {
        NA_BOOL => BOOL_NULL_KEY,
        BOOL_FALSE => BOOL_FALSE_KEY,
        _ => BOOL_TRUE_KEY,
    }
}

/// Keys for `rows`, in that order. Every listed row must be non-null.
pub fn extract_keys(data: &ColumnData, rows: &[u32]) -> Vec<u64> {
    fn map<T: Copy>(v: &[T], rows: &[u32], f: impl Fn(T) -> u64) -> Vec<u64> {
        rows.iter().map(|&r| f(v[r as usize])).collect()
    }
    match data {
        ColumnData::Bool1(v) => map(v, rows, bool_key),
        ColumnData::Int1(v) => map(v, rows, |x| sign_flip(i64::from(x), 8)),
        ColumnData::Int2(v) => map(v, rows, |x| sign_flip(i64::from(x), 16)),
        ColumnData::Int4(v) => map(v, rows, |x| sign_flip(i64::from(x), 32)),
        ColumnData::Int8(v) => map(v, rows, |x| sign_flip(x, 64)),
    }
}

/// Subtract `min` from every key and store in the narrow type `K`.
///
/// `K` must be wide enough for `max - min`; order is preserved exactly.
pub fn rebase<K: RadixKey>(keys: &[u64], min: u64) -> Vec<K> {
    keys.iter().map(|&k| K::from_u64(k - min)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    #[test]
    fn sign_flip_extremes() {
        assert_eq!(sign_flip(i64::from(i8::MIN), 8), 0);
        assert_eq!(sign_flip(-1, 8), 0x7F);
        assert_eq!(sign_flip(0, 8), 0x80);
        assert_eq!(sign_flip(i64::from(i8::MAX), 8), 0xFF);
        assert_eq!(sign_flip(i64::from(i32::MIN), 32), 0);
        assert_eq!(sign_flip(i64::from(i32::MAX), 32), 0xFFFF_FFFF);
        assert_eq!(sign_flip(i64::MIN, 64), 0);
        assert_eq!(sign_flip(i64::MAX, 64), u64::MAX);
    }

    #[test]
    fn sign_flip_preserves_order_across_zero() {
        let values = [-32_768i64, -32_767, -1, 0, 1, 32_766, 32_767];
        let keys: Vec<u64> = values.iter().map(|&v| sign_flip(v, 16)).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unflip_inverts() {
        for bits in [8, 16, 32, 64] {
            let lo = if bits == 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
            let hi = if bits == 64 { i64::MAX } else { (1i64 << (bits - 1)) - 1 };
            for v in [lo, lo + 1, -1, 0, 1, hi - 1, hi] {
                assert_eq!(sign_unflip(sign_flip(v, bits), bits), v);
            }
        }
    }

    #[test]
    fn bool_keys() {
        let c = Column::bool1("b", [Some(true), Some(false), None]);
        assert_eq!(extract_keys(c.data(), &[0, 1]), vec![2, 1]);
        assert_eq!(bool_key(NA_BOOL), BOOL_NULL_KEY);
    }

    #[test]
    fn extract_selected_rows() {
        let c = Column::int2("s", [Some(-1), None, Some(5)]).unwrap();
        assert_eq!(
            extract_keys(c.data(), &[2, 0]),
            vec![0x8005, 0x7FFF]
        );
    }

    #[test]
    fn rebase_narrows() {
        let keys = [sign_flip(1_000_000, 32), sign_flip(999_999, 32), sign_flip(1_065_534, 32)];
        let min = keys.iter().copied().min().unwrap();
        let narrow: Vec<u16> = rebase(&keys, min);
        assert_eq!(narrow, vec![1, 0, 65_535]);
    }
}
