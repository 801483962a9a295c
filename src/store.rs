//! The triple store facade: composes the namespace, node and document
//! catalogs with the quad index and forwards the public API to them.

use hashbrown::HashMap;
use log::info;

use crate::config::StoreConfig;
use crate::document::{DocEntry, DocumentCatalog};
use crate::error::{StoreError, StoreResult};
use crate::ids::{DocId, NodeId, NsId};
use crate::namespace::NamespaceCatalog;
use crate::node::{Node, NodeCatalog};
use crate::quad::{Pattern, Quad, QuadIndex};

/// An in-memory RDF quad store: namespace, node and document catalogs plus a
/// configurable set of secondary indices over the quads those catalogs'
/// terms appear in.
pub struct TripleStore {
    namespaces: NamespaceCatalog,
    nodes: NodeCatalog,
    documents: DocumentCatalog,
    quads: QuadIndex,
    config: StoreConfig,
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new(StoreConfig::default()).expect("the default configuration always validates")
    }
}

impl TripleStore {
    /// Builds a store from `config`, rejecting an invalid configuration
    /// (see [`StoreConfig::validate`]).
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        info!(
            "triple store: opening with {} secondary indices",
            config.secondary_indices.len()
        );
        Ok(Self {
            namespaces: NamespaceCatalog::with_capacity(config.namespace_capacity_hint),
            nodes: NodeCatalog::with_capacity(config.node_capacity_hint),
            documents: DocumentCatalog::new(),
            quads: QuadIndex::new(&config.secondary_indices),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -- namespace catalog -------------------------------------------------

    pub fn insert_ns(&mut self, iri: &str) -> NsId {
        self.namespaces.insert(iri)
    }

    pub fn find_ns_by_iri(&self, iri: &str) -> Option<NsId> {
        self.namespaces.find_iri(iri)
    }

    pub fn find_ns_by_prefix(&self, prefix: &str) -> Option<NsId> {
        self.namespaces.find_prefix(prefix)
    }

    pub fn ns_iri(&self, id: NsId) -> Option<&str> {
        self.namespaces.iri_of(id)
    }

    pub fn ns_prefix(&self, id: NsId) -> Option<&str> {
        self.namespaces.prefix_of(id)
    }

    pub fn set_ns_prefix(&mut self, id: NsId, prefix: &str) -> StoreResult<()> {
        self.namespaces.set_prefix(id, prefix)
    }

    pub fn remove_ns(&mut self, id: NsId) {
        self.namespaces.remove(id)
    }

    // -- node catalog -------------------------------------------------------

    pub fn insert_iri_node(&mut self, ns: NsId, name: &str) -> StoreResult<NodeId> {
        debug_assert!(self.namespaces.valid(ns), "namespace id must be live");
        self.nodes.insert_iri(ns, name)
    }

    pub fn insert_blank_node(&mut self, n: u32, doc: DocId) -> NodeId {
        debug_assert!(self.documents.valid(doc), "document id must be live");
        self.nodes.insert_blank(n, doc)
    }

    pub fn insert_literal(&mut self, lexical: &str, datatype: NodeId, lang: &str) -> StoreResult<NodeId> {
        debug_assert!(self.nodes.valid(datatype), "datatype id must be live");
        self.nodes.insert_literal(lexical, datatype, lang)
    }

    pub fn insert_plain_literal(&mut self, value: &str) -> NodeId {
        self.nodes.insert_plain_literal(value)
    }

    pub fn find_node(&self, node: &Node) -> Option<NodeId> {
        self.nodes.find(node)
    }

    pub fn find_iri_node(&self, ns: NsId, name: &str) -> Option<NodeId> {
        self.nodes.find_iri(ns, name)
    }

    pub fn find_blank_node(&self, n: u32, doc: DocId) -> Option<NodeId> {
        self.nodes.find_blank(n, doc)
    }

    pub fn find_literal(&self, lexical: &str, datatype: NodeId, lang: &str) -> StoreResult<Option<NodeId>> {
        self.nodes.find_literal(lexical, datatype, lang)
    }

    pub fn node_at(&self, id: NodeId) -> Option<Node> {
        self.nodes.node_at(id)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    /// Inserts `node` at a caller-chosen id rather than letting the catalog
    /// allocate one. See [`crate::node::NodeCatalog::insert_at`]; ordinary
    /// callers want `insert_iri_node`/`insert_blank_node`/`insert_literal`
    /// instead.
    pub fn insert_node_at(&mut self, id: NodeId, node: Node) -> StoreResult<()> {
        self.nodes.insert_at(id, node)
    }

    // -- document catalog ----------------------------------------------------

    pub fn insert_doc(&mut self, ontology: Option<NodeId>, version: Option<NodeId>, location: &str) -> (DocId, bool) {
        self.documents.insert(ontology, version, location)
    }

    pub fn doc(&self, id: DocId) -> Option<&DocEntry> {
        self.documents.entry(id)
    }

    pub fn find_doc_by_ontology(&self, ontology: NodeId) -> Option<DocId> {
        self.documents.find_by_ontology(ontology)
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.ids()
    }

    // -- quads ---------------------------------------------------------------

    /// Inserts a quad. In debug builds, asserts that all four identifiers
    /// are currently live; in release builds this precondition is trusted
    /// and unchecked.
    pub fn insert_triple(&mut self, s: NodeId, p: NodeId, o: NodeId, d: DocId) {
        debug_assert!(self.nodes.valid(s), "subject id must be live");
        debug_assert!(self.nodes.valid(p), "predicate id must be live");
        debug_assert!(self.nodes.valid(o), "object id must be live");
        debug_assert!(self.documents.valid(d), "document id must be live");
        self.quads.insert(Quad::new(s, p, o, d));
    }

    pub fn find_triple(&mut self, pattern: Pattern) -> Vec<Quad> {
        self.quads.find(&pattern)
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn iter_quads(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Removes every quad attributed to `doc`, returning how many were
    /// removed. Nodes and namespaces introduced solely by that document are
    /// not garbage-collected; callers that want them gone must remove them
    /// explicitly.
    pub fn remove_doc(&mut self, doc: DocId) -> usize {
        self.quads.remove_doc(doc)
    }

    /// Empties every catalog and the quad index, leaving only the standard
    /// terms behind.
    pub fn clear(&mut self) {
        self.namespaces = NamespaceCatalog::with_capacity(self.config.namespace_capacity_hint);
        self.nodes = NodeCatalog::with_capacity(self.config.node_capacity_hint);
        self.documents = DocumentCatalog::new();
        self.quads = QuadIndex::new(&self.config.secondary_indices);
        info!("triple store: cleared");
    }

    /// Copies every namespace from `self` into `other`, returning a map from
    /// this store's ids to the destination store's ids for the copied
    /// namespaces (standard namespaces map to themselves and are omitted).
    pub fn copy_namespaces_into(&self, other: &mut TripleStore) -> HashMap<NsId, NsId> {
        let mut remap = HashMap::new();
        for id in self.namespaces.user_ids() {
            let iri = self.namespaces.iri_of(id).expect("id came from this catalog");
            let new_id = other.insert_ns(iri);
            if let Some(prefix) = self.namespaces.prefix_of(id) {
                let _ = other.set_ns_prefix(new_id, prefix);
            }
            remap.insert(id, new_id);
        }
        remap
    }

    /// Copies every user-defined node from `self` into `other`, returning a
    /// map from this store's node ids to the destination's for the copied
    /// nodes (standard nodes map to themselves and are omitted). IRI nodes'
    /// namespace references are translated through `ns_remap` (as produced
    /// by [`Self::copy_namespaces_into`]; a namespace missing from it is
    /// assumed already identical in both stores, true for every standard
    /// namespace). Blank nodes' document references are translated through
    /// `doc_remap`, which the caller is responsible for building since the
    /// store does not provide a document bulk-copy helper; a document id
    /// missing from it is carried over unchanged. Literal nodes' datatype
    /// references are translated through the remap table being built here
    /// (so a custom datatype node copies correctly as long as it precedes
    /// the literals that use it in iteration order, which is id order) and
    /// otherwise carried over unchanged, which is always correct for the
    /// standard XSD datatypes.
    pub fn copy_nodes_into(
        &self,
        other: &mut TripleStore,
        ns_remap: &HashMap<NsId, NsId>,
        doc_remap: &HashMap<DocId, DocId>,
    ) -> HashMap<NodeId, NodeId> {
        let mut remap = HashMap::new();
        for (id, node) in self.nodes.user_entries() {
            let new_id = match node {
                Node::Iri { ns, name } => {
                    let new_ns = ns_remap.get(ns).copied().unwrap_or(*ns);
                    other
                        .insert_iri_node(new_ns, name)
                        .expect("an iri already valid in the source store is valid in the destination")
                }
                Node::Blank { n, doc } => {
                    let new_doc = doc_remap.get(doc).copied().unwrap_or(*doc);
                    other.insert_blank_node(*n, new_doc)
                }
                Node::LiteralString { value, datatype, lang } => {
                    let dt = remap.get(datatype).copied().unwrap_or(*datatype);
                    other
                        .insert_literal(value, dt, lang)
                        .expect("a previously-parsed literal re-parses")
                }
                Node::LiteralBool { value, datatype } => {
                    let dt = remap.get(datatype).copied().unwrap_or(*datatype);
                    other
                        .insert_literal(&value.to_string(), dt, "")
                        .expect("a previously-parsed literal re-parses")
                }
                Node::LiteralInt { value, datatype } => {
                    let dt = remap.get(datatype).copied().unwrap_or(*datatype);
                    other
                        .insert_literal(&value.to_string(), dt, "")
                        .expect("a previously-parsed literal re-parses")
                }
                Node::LiteralUnsigned { value, datatype } => {
                    let dt = remap.get(datatype).copied().unwrap_or(*datatype);
                    other
                        .insert_literal(&value.to_string(), dt, "")
                        .expect("a previously-parsed literal re-parses")
                }
                Node::LiteralDouble { value, datatype } => {
                    let dt = remap.get(datatype).copied().unwrap_or(*datatype);
                    other
                        .insert_literal(&value.to_string(), dt, "")
                        .expect("a previously-parsed literal re-parses")
                }
            };
            remap.insert(id, new_id);
        }
        remap
    }
}
