//! Key range analysis and radix pass planning.
//!
//! One scan over the non-null keys yields the minimum, maximum and the number
//! of significant bits once the minimum is subtracted. The bit count decides
//! how many counting passes are needed and how wide each one is.

use tracing::trace;

/// Upper bound on bits handled by a single counting pass (65 536 buckets).
pub const MAX_PASS_BITS: u32 = 16;

/// Result of scanning a key array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    pub min: u64,
    pub max: u64,
    /// `ceil(log2(max - min + 1))`, capped at the source width.
    pub bits: u32,
}

impl KeyRange {
    /// Scan `keys` once. Returns `None` for an empty slice.
    ///
    /// `width` is the bit width of the source column; `bits` never exceeds it.
    pub fn analyze(keys: &[u64], width: u32) -> Option<Self> {
        let (&first, rest) = keys.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(lo, hi), &k| (lo.min(k), hi.max(k)));
        let bits = bits_for_span(max - min).min(width);
        trace!(min, max, bits, "KeyRange::analyze");
        Some(Self { min, max, bits })
    }

    /// All non-null keys are equal; no radix work is required.
    pub fn is_constant(&self) -> bool {
        self.bits == 0
    }
}

/// Number of bits needed to represent every value in `0..=span`.
#[inline]
#[must_use]
pub fn bits_for_span(span: u64) -> u32 {
    64 - span.leading_zeros()
}

/// A bit window `[shift, shift + width)` consumed by one counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub shift: u32,
    pub width: u32,
}

impl Window {
    /// Number of buckets this window produces.
    pub fn buckets(&self) -> usize {
        1usize << self.width
    }

    pub fn mask(&self) -> u64 {
        crate::key::low_mask(self.width)
    }
}

/// Ordered list of windows, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPlan {
    windows: Vec<Window>,
}

impl PassPlan {
    /// Split `bits` significant bits into `ceil(bits / max_pass_bits)` windows
    /// whose widths differ by at most one bit.
    pub fn new(bits: u32, max_pass_bits: u32) -> Self {
        let max_pass_bits = max_pass_bits.clamp(1, MAX_PASS_BITS);
        if bits == 0 {
            return Self { windows: Vec::new() };
        }
        let passes = bits.div_ceil(max_pass_bits);
        let base = bits / passes;
        let extra = bits % passes;

        let mut windows = Vec::with_capacity(passes as usize);
        let mut remaining = bits;
        for pass in 0..passes {
            let width = if pass < extra { base + 1 } else { base };
            remaining -= width;
            windows.push(Window {
                shift: remaining,
                width,
            });
        }
        debug_assert_eq!(remaining, 0);
        Self { windows }
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn passes(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
