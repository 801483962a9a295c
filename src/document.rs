//! The document catalog: tracks the RDF documents that quads are attributed
//! to, keyed by the ontology IRI node they declare (if any).

use hashbrown::HashMap;
use log::debug;

use crate::ids::{DocId, IdAllocator, NodeId};

/// A loaded document's bookkeeping: the ontology/version IRIs it declared (if
/// any) and where it came from.
#[derive(Debug, Clone)]
pub struct DocEntry {
    pub ontology: Option<NodeId>,
    pub version: Option<NodeId>,
    pub location: String,
}

/// Catalog of documents. Documents are deduplicated by ontology IRI: inserting
/// the same ontology IRI twice returns the original id instead of minting a
/// second entry.
pub struct DocumentCatalog {
    slots: Vec<Option<DocEntry>>,
    by_ontology: HashMap<NodeId, DocId>,
    alloc: IdAllocator<DocId>,
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_ontology: HashMap::new(),
            alloc: IdAllocator::starting_at(0),
        }
    }

    fn slot_index(&self, id: DocId) -> usize {
        id.value() as usize
    }

    pub fn valid(&self, id: DocId) -> bool {
        let idx = self.slot_index(id);
        self.slots.get(idx).map(|s| s.is_some()).unwrap_or(false)
    }

    /// Inserts a document. If `ontology` is `Some` and a document already
    /// declares that ontology IRI, its id is returned with `inserted = false`
    /// (the internal "duplicate document" sentinel: this is not a failure).
    pub fn insert(
        &mut self,
        ontology: Option<NodeId>,
        version: Option<NodeId>,
        location: &str,
    ) -> (DocId, bool) {
        if let Some(ont) = ontology {
            if let Some(&existing) = self.by_ontology.get(&ont) {
                return (existing, false);
            }
        }
        let id = self.alloc.next();
        let idx = self.slot_index(id);
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx] = Some(DocEntry {
            ontology,
            version,
            location: location.to_string(),
        });
        if let Some(ont) = ontology {
            self.by_ontology.insert(ont, id);
        }
        debug!("document catalog: inserted {id} ({location})");
        (id, true)
    }

    pub fn find_by_ontology(&self, ontology: NodeId) -> Option<DocId> {
        self.by_ontology.get(&ontology).copied()
    }

    pub fn entry(&self, id: DocId) -> Option<&DocEntry> {
        self.slots.get(self.slot_index(id)).and_then(|s| s.as_ref())
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocEntry> {
        let idx = self.slot_index(id);
        let entry = self.slots.get_mut(idx)?.take()?;
        if let Some(ont) = entry.ontology {
            self.by_ontology.remove(&ont);
        }
        self.alloc.release(id);
        debug!("document catalog: removed {id}");
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| DocId::new(i as u32)))
    }
}
