//! Row-index permutations produced by the sort engine.

use std::ops::Deref;

use crate::error::{Result, SortError};

/// An ordered sequence of row indices; row `i` of a result reads source row
/// `self[i]`.
///
/// Expected to be a bijection on `[0, len)`; [`Permutation::check`] verifies
/// that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permutation(Vec<u32>);

impl Permutation {
    /// Wrap indices without validation.
    pub fn from_vec(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Wrap indices, failing with `CorruptPermutation` unless they form a
    /// bijection on `[0, indices.len())`.
    pub fn try_from_vec(indices: Vec<u32>) -> Result<Self> {
        let perm = Self(indices);
        perm.check(perm.len())?;
        Ok(perm)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let n32 = row_count_u32(n)?;
        Ok(Self((0..n32).collect()))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &r)| i == r as usize)
    }

    /// Verify this is a bijection on `[0, n)`.
    pub fn check(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(SortError::CorruptPermutation {
                detail: format!("length {} does not match {} source rows", self.0.len(), n),
            });
        }
        let mut seen = vec![false; n];
        for (pos, &row) in self.0.iter().enumerate() {
            let row = row as usize;
            if row >= n {
                return Err(SortError::CorruptPermutation {
                    detail: format!("index {row} at position {pos} is out of range [0, {n})"),
                });
            }
            if std::mem::replace(&mut seen[row], true) {
                return Err(SortError::CorruptPermutation {
                    detail: format!("index {row} at position {pos} is duplicated"),
                });
            }
        }
        Ok(())
    }

    /// `self` applied on top of `inner`: position `i` maps to `inner[self[i]]`.
    ///
    /// Used when a view is re-sorted: `self` orders the view's rows, `inner`
    /// maps view rows to source rows.
    pub fn compose(&self, inner: &Permutation) -> Result<Permutation> {
        self.0
            .iter()
            .enumerate()
            .map(|(pos, &r)| {
                inner.0.get(r as usize).copied().ok_or_else(|| SortError::CorruptPermutation {
                    detail: format!(
                        "index {r} at position {pos} is out of range for {} rows",
                        inner.len()
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Permutation)
    }
}

impl Deref for Permutation {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl From<Permutation> for Vec<u32> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

/// Row indices are `u32`; reject larger inputs up front.
pub(crate) fn row_count_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| SortError::RowCountOverflow { rows: n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_checks() {
        let p = Permutation::identity(5).unwrap();
        assert!(p.is_identity());
        assert!(p.check(5).is_ok());
    }

    #[test]
    fn detects_duplicate() {
        let p = Permutation::from_vec(vec![0, 2, 2]);
        let err = p.check(3).unwrap_err();
        assert!(matches!(err, SortError::CorruptPermutation { .. }));
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn detects_out_of_range_and_length() {
        assert!(Permutation::from_vec(vec![0, 3, 1]).check(3).is_err());
        assert!(Permutation::from_vec(vec![0, 1]).check(3).is_err());
        assert!(Permutation::try_from_vec(vec![1, 0, 2]).is_ok());
        assert!(Permutation::try_from_vec(vec![1, 1]).is_err());
    }

    #[test]
    fn compose_maps_through_inner() {
        let inner = Permutation::from_vec(vec![4, 2, 0, 1, 3]);
        let outer = Permutation::from_vec(vec![2, 3, 1, 4, 0]);
        let composed = outer.compose(&inner).unwrap();
        assert_eq!(composed.as_slice(), &[0, 1, 2, 3, 4]);
        assert!(Permutation::from_vec(vec![9]).compose(&inner).is_err());
    }
}
