//! Unsigned key types the kernels can bucket on.

use std::fmt::Debug;

/// An unsigned integer usable as a radix key.
///
/// Keys are compared with their natural unsigned order; a window of bits is
/// pulled out with [`RadixKey::digit`].
pub trait RadixKey: Copy + Ord + Debug + Send + Sync + 'static {
    /// Width of the key type in bits.
    const BITS: u32;

    /// Extract `(self >> shift) & mask` as a bucket index.
    fn digit(self, shift: u32, mask: u64) -> usize;

    /// Truncating conversion from a rebased 64-bit key.
    ///
    /// Callers pick `Self` wide enough for the key range, so no bits are lost.
    fn from_u64(value: u64) -> Self;

    /// Widen back to 64 bits.
    fn to_u64(self) -> u64;
}

macro_rules! impl_radix_key {
    ($($t:ty),*) => {
        $(
            impl RadixKey for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn digit(self, shift: u32, mask: u64) -> usize {
                    ((u64::from(self) >> shift) & mask) as usize
                }

                #[inline]
                fn from_u64(value: u64) -> Self {
                    value as $t
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

impl_radix_key!(u8, u16, u32, u64);

/// Mask with the low `bits` bits set (`bits` may be 64).
#[inline]
#[must_use]
pub fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
