//! The quad index: the primary append-only store of `(subject, predicate,
//! object, document)` quads plus a configurable set of secondary indices used
//! to accelerate pattern queries.

mod fragment;

use hashbrown::HashMap;
use log::{debug, trace};

use crate::ids::{DocId, NodeId, TripleId};
use fragment::Fragment;

/// A single RDF statement attributed to the document it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub s: NodeId,
    pub p: NodeId,
    pub o: NodeId,
    pub d: DocId,
}

impl Quad {
    pub fn new(s: NodeId, p: NodeId, o: NodeId, d: DocId) -> Self {
        Self { s, p, o, d }
    }
}

/// A query pattern: `None` in a position means "match anything there".
#[derive(Debug, Clone, Copy, Default)]
pub struct Pattern {
    pub s: Option<NodeId>,
    pub p: Option<NodeId>,
    pub o: Option<NodeId>,
    pub d: Option<DocId>,
}

impl Pattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn matches(&self, q: &Quad) -> bool {
        self.s.map_or(true, |s| s == q.s)
            && self.p.map_or(true, |p| p == q.p)
            && self.o.map_or(true, |o| o == q.o)
            && self.d.map_or(true, |d| d == q.d)
    }
}

/// The four positions a quad can be indexed by leading role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Subject,
    Predicate,
    Object,
    Doc,
}

impl Role {
    /// Fixed dispatch priority when more than one secondary index is
    /// applicable to a query: subject beats predicate beats object beats
    /// document.
    fn priority(self) -> u8 {
        match self {
            Role::Subject => 3,
            Role::Predicate => 2,
            Role::Object => 1,
            Role::Doc => 0,
        }
    }
}

/// Physical representation of a secondary index's per-key fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Append-only, sorted lazily on read.
    Vector,
    /// Maintained in sorted order on every insert.
    Ordered,
}

/// Describes one secondary index: which role leads it, and in what priority
/// order the remaining three roles are compared within a fragment.
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub leading: Role,
    pub order: [Role; 3],
    pub fragment_kind: FragmentKind,
}

fn role_value(q: &Quad, role: Role) -> u32 {
    match role {
        Role::Subject => q.s.value(),
        Role::Predicate => q.p.value(),
        Role::Object => q.o.value(),
        Role::Doc => q.d.value(),
    }
}

fn pattern_role(p: &Pattern, role: Role) -> Option<u32> {
    match role {
        Role::Subject => p.s.map(|x| x.value()),
        Role::Predicate => p.p.map(|x| x.value()),
        Role::Object => p.o.map(|x| x.value()),
        Role::Doc => p.d.map(|x| x.value()),
    }
}

struct SecondaryIndex {
    spec: IndexSpec,
    fragments: HashMap<u32, Fragment>,
}

impl SecondaryIndex {
    fn new(spec: IndexSpec) -> Self {
        Self {
            spec,
            fragments: HashMap::new(),
        }
    }

    fn insert(&mut self, q: &Quad, tid: TripleId) {
        let leading = role_value(q, self.spec.leading);
        let key = (
            role_value(q, self.spec.order[0]),
            role_value(q, self.spec.order[1]),
            role_value(q, self.spec.order[2]),
        );
        self.fragments
            .entry(leading)
            .or_insert_with(|| Fragment::new(self.spec.fragment_kind))
            .insert(key, tid);
    }

    fn scan(&mut self, pattern: &Pattern) -> Option<Vec<TripleId>> {
        let leading = pattern_role(pattern, self.spec.leading)?;
        let frag = self.fragments.get_mut(&leading)?;
        let t1 = pattern_role(pattern, self.spec.order[0]);
        let t2 = pattern_role(pattern, self.spec.order[1]);
        let t3 = pattern_role(pattern, self.spec.order[2]);
        Some(frag.scan(t1, t2, t3))
    }

    fn clear(&mut self) {
        self.fragments.clear();
    }
}

/// The quad index: a primary store plus a set of secondary indices built
/// from a [`crate::config::StoreConfig`]. Query results are always
/// materialized as owned [`Quad`] vectors, never lending iterators over live
/// internal state, so mutating the store between a `find` call and consuming
/// its result is always safe.
pub struct QuadIndex {
    primary: Vec<Quad>,
    secondary: Vec<SecondaryIndex>,
}

impl QuadIndex {
    pub fn new(specs: &[IndexSpec]) -> Self {
        Self {
            primary: Vec::new(),
            secondary: specs.iter().map(|&s| SecondaryIndex::new(s)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Appends a quad. Duplicate quads are stored and counted separately:
    /// the index performs no set-deduplication of its own.
    pub fn insert(&mut self, q: Quad) {
        let tid = TripleId(self.primary.len() as u32);
        self.primary.push(q);
        for idx in &mut self.secondary {
            idx.insert(&q, tid);
        }
        trace!("quad index: inserted triple {tid:?}");
    }

    /// Finds every quad matching `pattern`. Picks the applicable secondary
    /// index with the highest-priority leading role (subject, then
    /// predicate, then object, then document; ties broken by configuration
    /// order), falling back to a linear scan of the primary store when no
    /// configured index applies.
    pub fn find(&mut self, pattern: &Pattern) -> Vec<Quad> {
        if pattern.s.is_none() && pattern.p.is_none() && pattern.o.is_none() && pattern.d.is_none() {
            return self.primary.clone();
        }

        let chosen = self
            .secondary
            .iter()
            .enumerate()
            .filter(|(_, idx)| pattern_role(pattern, idx.spec.leading).is_some())
            .max_by_key(|(i, idx)| (idx.spec.leading.priority(), std::cmp::Reverse(*i)));

        match chosen {
            Some((i, _)) => {
                let tids = self.secondary[i].scan(pattern).unwrap_or_default();
                tids.into_iter()
                    .map(|tid| self.primary[tid.as_usize()])
                    .filter(|q| pattern.matches(q))
                    .collect()
            }
            None => self
                .primary
                .iter()
                .filter(|q| pattern.matches(q))
                .copied()
                .collect(),
        }
    }

    /// Removes every quad attributed to `doc`, rebuilding every secondary
    /// index from the survivors. There is no document-leading index in the
    /// default configuration, so this always costs a full scan; if a caller's
    /// configuration does include one, the scan is still correct, just not
    /// the fastest path available.
    pub fn remove_doc(&mut self, doc: DocId) -> usize {
        let before = self.primary.len();
        let survivors: Vec<Quad> = self
            .primary
            .iter()
            .filter(|q| q.d != doc)
            .copied()
            .collect();
        let removed = before - survivors.len();
        self.primary.clear();
        for idx in &mut self.secondary {
            idx.clear();
        }
        for q in survivors {
            self.insert(q);
        }
        debug!("quad index: removed {removed} quads for document {doc}");
        removed
    }

    pub fn clear(&mut self) {
        self.primary.clear();
        for idx in &mut self.secondary {
            idx.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.primary.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{DocId, NodeId};

    fn default_specs() -> Vec<IndexSpec> {
        vec![
            IndexSpec {
                leading: Role::Subject,
                order: [Role::Object, Role::Predicate, Role::Doc],
                fragment_kind: FragmentKind::Vector,
            },
            IndexSpec {
                leading: Role::Predicate,
                order: [Role::Subject, Role::Object, Role::Doc],
                fragment_kind: FragmentKind::Ordered,
            },
        ]
    }

    fn q(s: u32, p: u32, o: u32, d: u32) -> Quad {
        Quad::new(NodeId::new(s), NodeId::new(p), NodeId::new(o), DocId::new(d))
    }

    #[test]
    fn finds_by_subject_through_the_vector_index() {
        let mut idx = QuadIndex::new(&default_specs());
        idx.insert(q(1, 10, 100, 0));
        idx.insert(q(1, 11, 101, 0));
        idx.insert(q(2, 10, 100, 0));
        let results = idx.find(&Pattern {
            s: Some(NodeId::new(1)),
            ..Pattern::any()
        });
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn falls_back_to_a_primary_scan_when_no_index_applies() {
        let mut idx = QuadIndex::new(&default_specs());
        idx.insert(q(1, 10, 100, 0));
        idx.insert(q(2, 11, 100, 0));
        let results = idx.find(&Pattern {
            o: Some(NodeId::new(100)),
            ..Pattern::any()
        });
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn subject_leading_index_wins_over_predicate_leading_index() {
        let mut idx = QuadIndex::new(&default_specs());
        idx.insert(q(1, 10, 100, 0));
        let results = idx.find(&Pattern {
            s: Some(NodeId::new(1)),
            p: Some(NodeId::new(10)),
            ..Pattern::any()
        });
        assert_eq!(results, vec![q(1, 10, 100, 0)]);
    }

    #[test]
    fn remove_doc_drops_only_that_documents_quads() {
        let mut idx = QuadIndex::new(&default_specs());
        idx.insert(q(1, 10, 100, 0));
        idx.insert(q(2, 10, 100, 1));
        let removed = idx.remove_doc(DocId::new(0));
        assert_eq!(removed, 1);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.find(&Pattern::any()), vec![q(2, 10, 100, 1)]);
    }

    #[test]
    fn wildcard_find_preserves_insertion_order() {
        let mut idx = QuadIndex::new(&default_specs());
        idx.insert(q(3, 1, 1, 0));
        idx.insert(q(1, 1, 1, 0));
        idx.insert(q(2, 1, 1, 0));
        let results = idx.find(&Pattern::any());
        assert_eq!(results, vec![q(3, 1, 1, 0), q(1, 1, 1, 0), q(2, 1, 1, 0)]);
    }
}
