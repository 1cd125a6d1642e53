//! Stable null / non-null partition of positions.

/// Positions split by a null predicate, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub nulls: Vec<u32>,
    pub valid: Vec<u32>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.nulls.len() + self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_nulls(&self) -> bool {
        !self.nulls.is_empty()
    }
}

/// Split positions `0..n` into those for which `is_null` holds and the rest.
///
/// Equivalent to a one-bit counting pass on "is null": relative order inside
/// each group is the input order.
pub fn stable_partition(n: usize, is_null: impl Fn(usize) -> bool) -> Partition {
    let mut nulls = Vec::new();
    let mut valid = Vec::with_capacity(n);
    for pos in 0..n {
        if is_null(pos) {
            nulls.push(pos as u32);
        } else {
            valid.push(pos as u32);
        }
    }
    Partition { nulls, valid }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_within_groups() {
        let values = [Some(5), Some(3), None, Some(1), None, Some(3)];
        let p = stable_partition(values.len(), |i| values[i].is_none());
        assert_eq!(p.nulls, vec![2, 4]);
        assert_eq!(p.valid, vec![0, 1, 3, 5]);
        assert_eq!(p.len(), 6);
        assert!(p.has_nulls());
    }

    #[test]
    fn empty_input() {
        let p = stable_partition(0, |_| true);
        assert!(p.is_empty());
        assert!(!p.has_nulls());
    }
}
