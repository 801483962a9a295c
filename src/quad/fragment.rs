//! The two physical representations a secondary index's per-key fragment can
//! take. Both store `(t1, t2, t3, triple)` tuples, where `t1..t3` are the raw
//! `u32` values of the index's non-leading roles in priority order: the
//! difference is purely in how promptly they stay sorted.

use std::collections::BTreeSet;

use crate::ids::TripleId;

type Key = (u32, u32, u32, TripleId);

/// Appends unsorted and re-sorts lazily on read. Cheap to bulk-load, costs a
/// sort the first time it's queried after a burst of inserts.
#[derive(Debug, Default, Clone)]
pub(crate) struct VectorFragment {
    entries: Vec<Key>,
    dirty: bool,
}

impl VectorFragment {
    fn sorted(&mut self) -> &[Key] {
        if self.dirty {
            self.entries.sort_unstable();
            self.dirty = false;
        }
        &self.entries
    }
}

/// Stays sorted on every insert. Costs more per-insert, never needs to pay
/// for a sort on read.
#[derive(Debug, Default, Clone)]
pub(crate) struct OrderedFragment {
    entries: BTreeSet<Key>,
}

#[derive(Debug, Clone)]
pub(crate) enum Fragment {
    Vector(VectorFragment),
    Ordered(OrderedFragment),
}

impl Fragment {
    pub(crate) fn new(kind: super::FragmentKind) -> Self {
        match kind {
            super::FragmentKind::Vector => Fragment::Vector(VectorFragment::default()),
            super::FragmentKind::Ordered => Fragment::Ordered(OrderedFragment::default()),
        }
    }

    pub(crate) fn insert(&mut self, key: (u32, u32, u32), triple: TripleId) {
        let key = (key.0, key.1, key.2, triple);
        match self {
            Fragment::Vector(f) => {
                f.entries.push(key);
                f.dirty = true;
            }
            Fragment::Ordered(f) => {
                f.entries.insert(key);
            }
        }
    }

    /// Returns the triple ids in this fragment matching the (optionally
    /// concrete) remaining roles, in the fragment's sorted order, bounded to
    /// the tightest contiguous sub-range the concrete prefix allows.
    pub(crate) fn scan(
        &mut self,
        t1: Option<u32>,
        t2: Option<u32>,
        t3: Option<u32>,
    ) -> Vec<TripleId> {
        let (lo, hi) = bounds(t1, t2, t3);
        match self {
            Fragment::Vector(f) => {
                let entries = f.sorted();
                let start = entries.partition_point(|&k| key_triplet(k) < lo);
                let end = entries.partition_point(|&k| key_triplet(k) <= hi);
                entries[start..end]
                    .iter()
                    .filter(|&&k| matches(k, t1, t2, t3))
                    .map(|&(_, _, _, tid)| tid)
                    .collect()
            }
            Fragment::Ordered(f) => {
                let lower = (lo.0, lo.1, lo.2, TripleId(0));
                let upper = (hi.0, hi.1, hi.2, TripleId(u32::MAX));
                f.entries
                    .range(lower..=upper)
                    .filter(|&&k| matches(k, t1, t2, t3))
                    .map(|&(_, _, _, tid)| tid)
                    .collect()
            }
        }
    }
}

fn key_triplet(k: Key) -> (u32, u32, u32) {
    (k.0, k.1, k.2)
}

fn matches(k: Key, t1: Option<u32>, t2: Option<u32>, t3: Option<u32>) -> bool {
    t1.map_or(true, |v| k.0 == v) && t2.map_or(true, |v| k.1 == v) && t3.map_or(true, |v| k.2 == v)
}

/// Computes the tightest `[lo, hi]` triplet bound implied by a (possibly
/// partial) concrete prefix: once a position is a wildcard, everything after
/// it in the tuple must range over its full domain.
fn bounds(
    t1: Option<u32>,
    t2: Option<u32>,
    t3: Option<u32>,
) -> ((u32, u32, u32), (u32, u32, u32)) {
    let lo1 = t1.unwrap_or(u32::MIN);
    let hi1 = t1.unwrap_or(u32::MAX);
    let lo2 = if t1.is_some() { t2.unwrap_or(u32::MIN) } else { u32::MIN };
    let hi2 = if t1.is_some() { t2.unwrap_or(u32::MAX) } else { u32::MAX };
    let lo3 = if t1.is_some() && t2.is_some() {
        t3.unwrap_or(u32::MIN)
    } else {
        u32::MIN
    };
    let hi3 = if t1.is_some() && t2.is_some() {
        t3.unwrap_or(u32::MAX)
    } else {
        u32::MAX
    };
    ((lo1, lo2, lo3), (hi1, hi2, hi3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::FragmentKind;

    #[test]
    fn vector_fragment_sorts_lazily_and_filters_correctly() {
        let mut frag = Fragment::new(FragmentKind::Vector);
        frag.insert((3, 0, 0), TripleId(0));
        frag.insert((1, 0, 0), TripleId(1));
        frag.insert((1, 5, 0), TripleId(2));
        let got = frag.scan(Some(1), None, None);
        assert_eq!(got, vec![TripleId(1), TripleId(2)]);
    }

    #[test]
    fn ordered_fragment_bounds_a_two_level_prefix() {
        let mut frag = Fragment::new(FragmentKind::Ordered);
        frag.insert((1, 2, 9), TripleId(0));
        frag.insert((1, 3, 0), TripleId(1));
        frag.insert((2, 2, 0), TripleId(2));
        let got = frag.scan(Some(1), Some(2), None);
        assert_eq!(got, vec![TripleId(0)]);
    }

    #[test]
    fn fully_wildcard_scan_returns_everything() {
        let mut frag = Fragment::new(FragmentKind::Vector);
        frag.insert((3, 0, 0), TripleId(0));
        frag.insert((1, 0, 0), TripleId(1));
        let got = frag.scan(None, None, None);
        assert_eq!(got.len(), 2);
    }
}
