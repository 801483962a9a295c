//! Opaque identifier types and the free-list allocator shared by every catalog.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

/// A small opaque handle backed by a `u32`.
///
/// Every catalog (namespaces, nodes, documents) hands these out instead of
/// exposing its internal storage indices directly.
pub trait Identifier: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug {
    fn from_u32(v: u32) -> Self;
    fn as_u32(self) -> u32;
}

macro_rules! define_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Wraps a raw integer. Only catalogs and the standard-terms table
            /// should call this; everyone else receives ids from `insert`/`find`.
            pub(crate) fn new(v: u32) -> Self {
                $name(v)
            }

            pub fn value(self) -> u32 {
                self.0
            }
        }

        impl Identifier for $name {
            fn from_u32(v: u32) -> Self {
                $name(v)
            }

            fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(NsId, "Identifies an entry in the namespace catalog.");
define_id_type!(NodeId, "Identifies an entry in the node catalog.");
define_id_type!(DocId, "Identifies an entry in the document catalog.");

/// Identifies a stored quad in the primary store. Never exposed outside the
/// quad index: callers observe quads, not their internal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TripleId(pub(crate) u32);

impl TripleId {
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Hands out the smallest unused id for a catalog, reusing ids released by
/// `remove` before minting new ones.
#[derive(Debug)]
pub struct IdAllocator<I: Identifier> {
    next_fresh: u32,
    free: BinaryHeap<Reverse<u32>>,
    _marker: PhantomData<I>,
}

impl<I: Identifier> IdAllocator<I> {
    /// Creates an allocator whose first freshly minted id is `start`. Used to
    /// seed each catalog's allocator past the reserved standard-terms range.
    pub fn starting_at(start: u32) -> Self {
        Self {
            next_fresh: start,
            free: BinaryHeap::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the smallest free identifier, either reused from the free list
    /// or the next never-issued integer.
    pub fn next(&mut self) -> I {
        if let Some(Reverse(v)) = self.free.pop() {
            I::from_u32(v)
        } else {
            let v = self.next_fresh;
            self.next_fresh += 1;
            I::from_u32(v)
        }
    }

    /// Returns `id` to the free list so a later `next()` may reissue it.
    pub fn release(&mut self, id: I) {
        self.free.push(Reverse(id.as_u32()));
    }

    /// Marks `id` as issued without handing it out through `next()`, for
    /// callers that place an entry at a caller-chosen id (catalog copy). Any
    /// ids between the previous high-water mark and `id` become free (so
    /// `next()` can still fill the gap); an `id` below the high-water mark
    /// that happens to be sitting in the free list is removed from it.
    pub fn reserve(&mut self, id: I) {
        let v = id.as_u32();
        if v >= self.next_fresh {
            for gap in self.next_fresh..v {
                self.free.push(Reverse(gap));
            }
            self.next_fresh = v + 1;
        } else {
            let remaining: Vec<Reverse<u32>> = self.free.drain().filter(|&Reverse(x)| x != v).collect();
            self.free = remaining.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_dense_ids_from_the_starting_point() {
        let mut alloc: IdAllocator<NodeId> = IdAllocator::starting_at(10);
        assert_eq!(alloc.next(), NodeId::new(10));
        assert_eq!(alloc.next(), NodeId::new(11));
        assert_eq!(alloc.next(), NodeId::new(12));
    }

    #[test]
    fn reserve_above_the_high_water_mark_frees_the_gap() {
        let mut alloc: IdAllocator<NodeId> = IdAllocator::starting_at(0);
        alloc.reserve(NodeId::new(5));
        assert_eq!(alloc.next(), NodeId::new(0));
        assert_eq!(alloc.next(), NodeId::new(1));
        alloc.reserve(NodeId::new(5));
        assert_eq!(alloc.next(), NodeId::new(2));
    }

    #[test]
    fn reserve_removes_the_id_from_the_free_list_if_present() {
        let mut alloc: IdAllocator<NodeId> = IdAllocator::starting_at(0);
        let a = alloc.next();
        let b = alloc.next();
        alloc.release(a);
        alloc.release(b);
        alloc.reserve(a);
        assert_eq!(alloc.next(), b);
        assert_eq!(alloc.next(), NodeId::new(2));
    }

    #[test]
    fn reissues_the_smallest_released_id_first() {
        let mut alloc: IdAllocator<NodeId> = IdAllocator::starting_at(0);
        let a = alloc.next();
        let b = alloc.next();
        let c = alloc.next();
        alloc.release(b);
        alloc.release(a);
        assert_eq!(alloc.next(), a);
        assert_eq!(alloc.next(), b);
        let _ = c;
        assert_eq!(alloc.next(), NodeId::new(3));
    }
}
