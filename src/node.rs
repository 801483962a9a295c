//! The node catalog: interns every RDF term (IRI, blank node, or literal)
//! that appears in a subject, predicate or object position and hands back a
//! compact [`NodeId`].

use std::hash::{Hash, Hasher};

use hashbrown::HashMap;
use log::debug;

use crate::error::{StoreError, StoreResult};
use crate::ids::{DocId, IdAllocator, NodeId, NsId};
use crate::standard_terms::{
    self, datatype_kind, find_standard_node, standard_node_parts, LiteralKind, MIN_USER_NODE_ID,
    NODE_XSD_STRING, NS_BLANK,
};

/// A single RDF term, tagged by kind. Two nodes are equal exactly when their
/// kind and content match; literals compare by lexical value and datatype,
/// never by a datatype's notion of numeric equality (`"1"^^xsd:int` and
/// `"01"^^xsd:int` are distinct nodes even though they denote the same
/// integer).
#[derive(Debug, Clone)]
pub enum Node {
    Iri {
        ns: NsId,
        name: String,
    },
    Blank {
        n: u32,
        doc: DocId,
    },
    LiteralString {
        value: String,
        datatype: NodeId,
        lang: String,
    },
    LiteralBool {
        value: bool,
        datatype: NodeId,
    },
    LiteralInt {
        value: i64,
        datatype: NodeId,
    },
    LiteralUnsigned {
        value: u64,
        datatype: NodeId,
    },
    LiteralDouble {
        value: f64,
        datatype: NodeId,
    },
}

impl Node {
    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri { .. })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank { .. })
    }

    pub fn is_literal(&self) -> bool {
        !self.is_iri() && !self.is_blank()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Iri { ns, name }, Node::Iri { ns: ns2, name: name2 }) => {
                ns == ns2 && name == name2
            }
            (Node::Blank { n, doc }, Node::Blank { n: n2, doc: doc2 }) => n == n2 && doc == doc2,
            (
                Node::LiteralString { value, datatype, lang },
                Node::LiteralString { value: v2, datatype: d2, lang: l2 },
            ) => value == v2 && datatype == d2 && lang == l2,
            (Node::LiteralBool { value, datatype }, Node::LiteralBool { value: v2, datatype: d2 }) => {
                value == v2 && datatype == d2
            }
            (Node::LiteralInt { value, datatype }, Node::LiteralInt { value: v2, datatype: d2 }) => {
                value == v2 && datatype == d2
            }
            (
                Node::LiteralUnsigned { value, datatype },
                Node::LiteralUnsigned { value: v2, datatype: d2 },
            ) => value == v2 && datatype == d2,
            (
                Node::LiteralDouble { value, datatype },
                Node::LiteralDouble { value: v2, datatype: d2 },
            ) => value.to_bits() == v2.to_bits() && datatype == d2,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Node::Iri { ns, name } => {
                ns.hash(state);
                name.hash(state);
            }
            Node::Blank { n, doc } => {
                n.hash(state);
                doc.hash(state);
            }
            Node::LiteralString { value, datatype, lang } => {
                value.hash(state);
                datatype.hash(state);
                lang.hash(state);
            }
            Node::LiteralBool { value, datatype } => {
                value.hash(state);
                datatype.hash(state);
            }
            Node::LiteralInt { value, datatype } => {
                value.hash(state);
                datatype.hash(state);
            }
            Node::LiteralUnsigned { value, datatype } => {
                value.hash(state);
                datatype.hash(state);
            }
            Node::LiteralDouble { value, datatype } => {
                value.to_bits().hash(state);
                datatype.hash(state);
            }
        }
    }
}

/// Catalog of all interned RDF terms. Standard IRI nodes (rdf:type,
/// owl:Thing, the xsd datatypes, ...) occupy the ids below
/// [`MIN_USER_NODE_ID`] and are immutable; everything else lives in a dense
/// array indexed from that offset.
pub struct NodeCatalog {
    slots: Vec<Option<Node>>,
    index: HashMap<Node, NodeId>,
    alloc: IdAllocator<NodeId>,
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeCatalog {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            alloc: IdAllocator::starting_at(MIN_USER_NODE_ID),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
            alloc: IdAllocator::starting_at(MIN_USER_NODE_ID),
        }
    }

    fn slot_index(&self, id: NodeId) -> Option<usize> {
        id.value().checked_sub(MIN_USER_NODE_ID).map(|v| v as usize)
    }

    pub fn valid(&self, id: NodeId) -> bool {
        if id.value() < MIN_USER_NODE_ID {
            return true;
        }
        self.slot_index(id)
            .and_then(|idx| self.slots.get(idx))
            .map(|s| s.is_some())
            .unwrap_or(false)
    }

    fn intern(&mut self, node: Node) -> NodeId {
        if let Some(&id) = self.index.get(&node) {
            return id;
        }
        let id = self.alloc.next();
        let idx = self.slot_index(id).unwrap();
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.index.insert(clone_node(&node), id);
        self.slots[idx] = Some(node);
        id
    }

    /// Interns an IRI node. `ns` must already be a live namespace id;
    /// re-inserting the IRI for a standard vocabulary term returns its fixed
    /// id rather than minting a new one.
    pub fn insert_iri(&mut self, ns: NsId, name: &str) -> StoreResult<NodeId> {
        if ns == NS_BLANK {
            return Err(StoreError::BadIri(format!("{name} (blank namespace is reserved)")));
        }
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(StoreError::BadIri(name.to_string()));
        }
        if let Some(id) = find_standard_node(ns, name) {
            return Ok(id);
        }
        let id = self.intern(Node::Iri {
            ns,
            name: name.to_string(),
        });
        debug!("node catalog: interned iri node {id}");
        Ok(id)
    }

    /// Interns a blank node scoped to `doc`, identified by its small integer
    /// `n` within that document.
    pub fn insert_blank(&mut self, n: u32, doc: DocId) -> NodeId {
        let id = self.intern(Node::Blank { n, doc });
        debug!("node catalog: interned blank node {id}");
        id
    }

    /// Parses `lexical` under `datatype` and interns the resulting literal.
    /// The datatype determines the internal representation: booleans, signed
    /// and unsigned integers, and doubles get a dedicated variant; anything
    /// else (including user-defined datatypes) is stored as a plain string.
    /// `lang` is only meaningful for the default string datatype and should
    /// be empty otherwise.
    pub fn insert_literal(
        &mut self,
        lexical: &str,
        datatype: NodeId,
        lang: &str,
    ) -> StoreResult<NodeId> {
        let node = match datatype_kind(datatype) {
            LiteralKind::Bool => {
                let value = parse_xsd_bool(lexical).ok_or_else(|| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: "expected one of 'true', 'false', '1', '0'".to_string(),
                })?;
                Node::LiteralBool { value, datatype }
            }
            LiteralKind::Int => {
                let value = lexical.parse::<i64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?;
                Node::LiteralInt { value, datatype }
            }
            LiteralKind::Unsigned => {
                let value = lexical.parse::<u64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?;
                Node::LiteralUnsigned { value, datatype }
            }
            LiteralKind::Double => {
                let value = lexical.parse::<f64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?;
                Node::LiteralDouble { value, datatype }
            }
            LiteralKind::Str => Node::LiteralString {
                value: lexical.to_string(),
                datatype,
                lang: lang.to_string(),
            },
        };
        let id = self.intern(node);
        debug!("node catalog: interned literal node {id}");
        Ok(id)
    }

    /// Convenience for the common case of a plain string literal with the
    /// default `xsd:string` datatype and no language tag.
    pub fn insert_plain_literal(&mut self, value: &str) -> NodeId {
        self.insert_literal(value, NODE_XSD_STRING, "")
            .expect("xsd:string always parses")
    }

    /// Inserts `node` at a caller-chosen `id` rather than letting the
    /// allocator pick one. Used by bulk-copy callers (see
    /// [`crate::store::TripleStore::copy_nodes_into`]) that want the
    /// freedom to preserve source ids where convenient; most callers should
    /// use `insert_iri`/`insert_blank`/`insert_literal` instead. A no-op if
    /// `id` already holds an equal node; fails with
    /// [`StoreError::InvalidId`] if `id` falls in the reserved standard
    /// range or already holds a different node.
    pub fn insert_at(&mut self, id: NodeId, node: Node) -> StoreResult<()> {
        if id.value() < MIN_USER_NODE_ID {
            return Err(StoreError::InvalidId(id.value()));
        }
        let idx = self.slot_index(id).unwrap();
        if let Some(existing) = self.slots.get(idx).and_then(|s| s.as_ref()) {
            return if *existing == node {
                Ok(())
            } else {
                Err(StoreError::InvalidId(id.value()))
            };
        }
        self.alloc.reserve(id);
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.index.insert(clone_node(&node), id);
        self.slots[idx] = Some(node);
        debug!("node catalog: inserted {id} at caller-chosen id");
        Ok(())
    }

    /// Every live user-defined node paired with its id, in id order.
    /// Standard nodes are omitted; look those up through
    /// [`crate::standard_terms`] directly.
    pub fn user_entries(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|n| (NodeId::new(i as u32 + MIN_USER_NODE_ID), n)))
    }

    pub fn find(&self, node: &Node) -> Option<NodeId> {
        if let Node::Iri { ns, name } = node {
            if let Some(id) = find_standard_node(*ns, name) {
                return Some(id);
            }
        }
        self.index.get(node).copied()
    }

    /// Per-variant convenience finders mirroring `insert_iri`/`insert_blank`
    /// and paralleling `insert_literal`'s parse-then-intern shape: they build
    /// the canonical key the variant would intern under and look it up,
    /// without interning anything themselves.
    pub fn find_iri(&self, ns: NsId, name: &str) -> Option<NodeId> {
        self.find(&Node::Iri {
            ns,
            name: name.to_string(),
        })
    }

    pub fn find_blank(&self, n: u32, doc: DocId) -> Option<NodeId> {
        self.find(&Node::Blank { n, doc })
    }

    /// Parses `lexical` under `datatype` the same way `insert_literal` does
    /// and looks up the resulting canonical key, failing with
    /// [`StoreError::BadLiteral`] exactly when `insert_literal` would.
    pub fn find_literal(&self, lexical: &str, datatype: NodeId, lang: &str) -> StoreResult<Option<NodeId>> {
        let node = match datatype_kind(datatype) {
            LiteralKind::Bool => Node::LiteralBool {
                value: parse_xsd_bool(lexical).ok_or_else(|| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: "expected one of 'true', 'false', '1', '0'".to_string(),
                })?,
                datatype,
            },
            LiteralKind::Int => Node::LiteralInt {
                value: lexical.parse::<i64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?,
                datatype,
            },
            LiteralKind::Unsigned => Node::LiteralUnsigned {
                value: lexical.parse::<u64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?,
                datatype,
            },
            LiteralKind::Double => Node::LiteralDouble {
                value: lexical.parse::<f64>().map_err(|e| StoreError::BadLiteral {
                    lexical: lexical.to_string(),
                    datatype,
                    reason: e.to_string(),
                })?,
                datatype,
            },
            LiteralKind::Str => Node::LiteralString {
                value: lexical.to_string(),
                datatype,
                lang: lang.to_string(),
            },
        };
        Ok(self.find(&node))
    }

    pub fn node_at(&self, id: NodeId) -> Option<Node> {
        if id.value() < MIN_USER_NODE_ID {
            let (ns, local) = standard_node_parts(id)?;
            return Some(Node::Iri {
                ns,
                name: local.to_string(),
            });
        }
        self.slot_index(id)
            .and_then(|idx| self.slots.get(idx))
            .and_then(|s| s.clone())
    }

    /// Removes a user-interned node, returning it. The reserved standard-term
    /// range is not removable and yields `None`.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if id.value() < MIN_USER_NODE_ID {
            return None;
        }
        let idx = self.slot_index(id)?;
        let node = self.slots.get_mut(idx)?.take()?;
        self.index.remove(&node);
        self.alloc.release(id);
        debug!("node catalog: removed {id}");
        Some(node)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count() + standard_terms::STANDARD_NODES.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

fn clone_node(node: &Node) -> Node {
    node.clone()
}

/// Parses a lexical form against the full XSD boolean value space:
/// `"true"`/`"1"` and `"false"`/`"0"`, not just Rust's `"true"`/`"false"`.
fn parse_xsd_bool(lexical: &str) -> Option<bool> {
    match lexical {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_terms::{NODE_XSD_BOOLEAN, NODE_XSD_INT, NS_OWL};

    #[test]
    fn inserting_a_standard_iri_node_returns_its_fixed_id() {
        let mut cat = NodeCatalog::new();
        let id = cat.insert_iri(NS_OWL, "Thing").unwrap();
        assert_eq!(id, crate::standard_terms::NODE_OWL_THING);
    }

    #[test]
    fn user_iri_nodes_intern_idempotently() {
        let mut cat = NodeCatalog::new();
        let a = cat.insert_iri(NsId::new(100), "Alice").unwrap();
        let b = cat.insert_iri(NsId::new(100), "Alice").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn boolean_literal_parses_strictly() {
        let mut cat = NodeCatalog::new();
        assert!(cat.insert_literal("true", NODE_XSD_BOOLEAN, "").is_ok());
        assert!(cat.insert_literal("falsee", NODE_XSD_BOOLEAN, "").is_err());
    }

    #[test]
    fn boolean_literal_accepts_the_full_xsd_lexical_space() {
        let mut cat = NodeCatalog::new();
        let one = cat.insert_literal("1", NODE_XSD_BOOLEAN, "").unwrap();
        let tru = cat.insert_literal("true", NODE_XSD_BOOLEAN, "").unwrap();
        assert_eq!(one, tru);
        let zero = cat.insert_literal("0", NODE_XSD_BOOLEAN, "").unwrap();
        let fals = cat.insert_literal("false", NODE_XSD_BOOLEAN, "").unwrap();
        assert_eq!(zero, fals);
    }

    #[test]
    fn int_literal_rejects_non_integer_lexical_forms() {
        let mut cat = NodeCatalog::new();
        assert!(cat.insert_literal("0.9", NODE_XSD_INT, "").is_err());
        assert!(cat.insert_literal("42", NODE_XSD_INT, "").is_ok());
    }

    #[test]
    fn unknown_datatype_falls_back_to_string_kind() {
        let mut cat = NodeCatalog::new();
        let custom_dt = cat.insert_iri(NsId::new(200), "myType").unwrap();
        let id = cat.insert_literal("anything goes", custom_dt, "").unwrap();
        assert_eq!(cat.node_at(id).unwrap().is_literal(), true);
    }

    #[test]
    fn removed_node_id_is_reused() {
        let mut cat = NodeCatalog::new();
        let a = cat.insert_iri(NsId::new(300), "A").unwrap();
        cat.remove(a);
        let b = cat.insert_iri(NsId::new(300), "B").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn standard_nodes_cannot_be_removed() {
        let mut cat = NodeCatalog::new();
        assert!(cat.remove(crate::standard_terms::NODE_OWL_THING).is_none());
    }

    #[test]
    fn insert_at_places_a_node_at_the_given_id_and_is_idempotent() {
        let mut cat = NodeCatalog::new();
        let target = NodeId::new(MIN_USER_NODE_ID + 10);
        let node = Node::Iri {
            ns: NsId::new(100),
            name: "Widget".to_string(),
        };
        cat.insert_at(target, node.clone()).unwrap();
        assert_eq!(cat.find(&node), Some(target));
        cat.insert_at(target, node).unwrap();
    }

    #[test]
    fn insert_at_rejects_overwriting_a_live_id_with_a_different_node() {
        let mut cat = NodeCatalog::new();
        let target = NodeId::new(MIN_USER_NODE_ID);
        cat.insert_at(
            target,
            Node::Iri {
                ns: NsId::new(100),
                name: "A".to_string(),
            },
        )
        .unwrap();
        let err = cat
            .insert_at(
                target,
                Node::Iri {
                    ns: NsId::new(100),
                    name: "B".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[test]
    fn find_iri_and_find_blank_locate_interned_nodes_without_inserting() {
        let mut cat = NodeCatalog::new();
        assert_eq!(cat.find_iri(NsId::new(100), "Alice"), None);
        let id = cat.insert_iri(NsId::new(100), "Alice").unwrap();
        assert_eq!(cat.find_iri(NsId::new(100), "Alice"), Some(id));

        let doc = DocId::new(0);
        assert_eq!(cat.find_blank(0, doc), None);
        let blank = cat.insert_blank(0, doc);
        assert_eq!(cat.find_blank(0, doc), Some(blank));
    }

    #[test]
    fn find_literal_mirrors_insert_literals_parsing() {
        let mut cat = NodeCatalog::new();
        assert_eq!(cat.find_literal("42", NODE_XSD_INT, "").unwrap(), None);
        let id = cat.insert_literal("42", NODE_XSD_INT, "").unwrap();
        assert_eq!(cat.find_literal("42", NODE_XSD_INT, "").unwrap(), Some(id));
        assert!(cat.find_literal("not a number", NODE_XSD_INT, "").is_err());
    }

    #[test]
    fn insert_at_rejects_the_reserved_standard_range() {
        let mut cat = NodeCatalog::new();
        let node = Node::Iri {
            ns: NsId::new(100),
            name: "A".to_string(),
        };
        assert!(cat.insert_at(NodeId::new(0), node).is_err());
    }
}
