//! The fixed vocabulary of namespaces and nodes that every store starts with:
//! RDF, RDFS, OWL and XSD, plus the reserved pseudo-namespace blank nodes are
//! minted under. These occupy the lowest ids of their respective catalogs and
//! are never removable.

use once_cell::sync::Lazy;

use crate::ids::{NodeId, NsId};

macro_rules! define_namespaces {
    ( $( $const_name:ident = ($id:literal, $iri:expr, $prefix:expr) ),* $(,)? ) => {
        $(
            pub const $const_name: NsId = NsId($id);
        )*

        /// `(id, iri, prefix)` for every standard namespace, in id order.
        pub static STANDARD_NAMESPACES: &[(NsId, &str, &str)] = &[
            $( ($const_name, $iri, $prefix) ),*
        ];
    };
}

define_namespaces! {
    NS_RDF   = (0, "http://www.w3.org/1999/02/22-rdf-syntax-ns#", "rdf"),
    NS_RDFS  = (1, "http://www.w3.org/2000/01/rdf-schema#", "rdfs"),
    NS_OWL   = (2, "http://www.w3.org/2002/07/owl#", "owl"),
    NS_XSD   = (3, "http://www.w3.org/2001/XMLSchema#", "xsd"),
    NS_BLANK = (4, "_:", ""),
}

/// The first id a namespace catalog may mint for a user-inserted namespace.
pub const MIN_USER_NS_ID: u32 = 5;

macro_rules! define_nodes {
    ( $( $const_name:ident = ($id:literal, $ns:expr, $local:expr) ),* $(,)? ) => {
        $(
            pub const $const_name: NodeId = NodeId($id);
        )*

        /// `(id, namespace, local name)` for every standard IRI node, in id order.
        pub static STANDARD_NODES: &[(NodeId, NsId, &str)] = &[
            $( ($const_name, $ns, $local) ),*
        ];
    };
}

define_nodes! {
    NODE_RDF_TYPE      = (0,  NS_RDF, "type"),
    NODE_RDF_FIRST     = (1,  NS_RDF, "first"),
    NODE_RDF_REST      = (2,  NS_RDF, "rest"),
    NODE_RDF_NIL       = (3,  NS_RDF, "nil"),
    NODE_RDF_SUBJECT   = (4,  NS_RDF, "subject"),
    NODE_RDF_PREDICATE = (5,  NS_RDF, "predicate"),
    NODE_RDF_OBJECT    = (6,  NS_RDF, "object"),
    NODE_RDF_STATEMENT = (7,  NS_RDF, "Statement"),
    NODE_RDF_LANGSTRING = (8, NS_RDF, "langString"),

    NODE_RDFS_LABEL    = (9,  NS_RDFS, "label"),
    NODE_RDFS_COMMENT  = (10, NS_RDFS, "comment"),
    NODE_RDFS_SUBCLASSOF = (11, NS_RDFS, "subClassOf"),
    NODE_RDFS_DOMAIN   = (12, NS_RDFS, "domain"),
    NODE_RDFS_RANGE    = (13, NS_RDFS, "range"),

    NODE_OWL_THING     = (14, NS_OWL, "Thing"),
    NODE_OWL_NOTHING   = (15, NS_OWL, "Nothing"),
    NODE_OWL_CLASS     = (16, NS_OWL, "Class"),
    NODE_OWL_ONTOLOGY  = (17, NS_OWL, "Ontology"),
    NODE_OWL_IMPORTS   = (18, NS_OWL, "imports"),
    NODE_OWL_VERSIONIRI = (19, NS_OWL, "versionIRI"),
    NODE_OWL_OBJECTPROPERTY = (20, NS_OWL, "ObjectProperty"),
    NODE_OWL_DATATYPEPROPERTY = (21, NS_OWL, "DatatypeProperty"),

    NODE_XSD_STRING    = (22, NS_XSD, "string"),
    NODE_XSD_BOOLEAN   = (23, NS_XSD, "boolean"),
    NODE_XSD_INTEGER   = (24, NS_XSD, "integer"),
    NODE_XSD_INT       = (25, NS_XSD, "int"),
    NODE_XSD_LONG      = (26, NS_XSD, "long"),
    NODE_XSD_SHORT     = (27, NS_XSD, "short"),
    NODE_XSD_UNSIGNEDINT = (28, NS_XSD, "unsignedInt"),
    NODE_XSD_UNSIGNEDLONG = (29, NS_XSD, "unsignedLong"),
    NODE_XSD_NONNEGATIVEINTEGER = (30, NS_XSD, "nonNegativeInteger"),
    NODE_XSD_DOUBLE    = (31, NS_XSD, "double"),
    NODE_XSD_FLOAT     = (32, NS_XSD, "float"),
    NODE_XSD_DECIMAL   = (33, NS_XSD, "decimal"),
    NODE_XSD_DATETIME  = (34, NS_XSD, "dateTime"),
    NODE_XSD_ANYURI    = (35, NS_XSD, "anyURI"),
}

/// The first id a node catalog may mint for a user-inserted node.
pub const MIN_USER_NODE_ID: u32 = 36;

/// Lookup table from `(namespace, local name)` to a standard node id, built
/// once on first use.
static NODE_BY_NS_LOCAL: Lazy<hashbrown::HashMap<(NsId, &'static str), NodeId>> =
    Lazy::new(|| {
        STANDARD_NODES
            .iter()
            .map(|&(id, ns, local)| ((ns, local), id))
            .collect()
    });

static NAMESPACE_BY_IRI: Lazy<hashbrown::HashMap<&'static str, NsId>> =
    Lazy::new(|| STANDARD_NAMESPACES.iter().map(|&(id, iri, _)| (iri, id)).collect());

static NAMESPACE_BY_PREFIX: Lazy<hashbrown::HashMap<&'static str, NsId>> = Lazy::new(|| {
    STANDARD_NAMESPACES
        .iter()
        .filter(|&&(_, _, prefix)| !prefix.is_empty())
        .map(|&(id, _, prefix)| (prefix, id))
        .collect()
});

pub fn find_standard_namespace_by_iri(iri: &str) -> Option<NsId> {
    NAMESPACE_BY_IRI.get(iri).copied()
}

pub fn find_standard_namespace_by_prefix(prefix: &str) -> Option<NsId> {
    NAMESPACE_BY_PREFIX.get(prefix).copied()
}

pub fn standard_namespace_iri(id: NsId) -> Option<&'static str> {
    STANDARD_NAMESPACES
        .iter()
        .find(|&&(nid, _, _)| nid == id)
        .map(|&(_, iri, _)| iri)
}

pub fn standard_namespace_prefix(id: NsId) -> Option<&'static str> {
    STANDARD_NAMESPACES
        .iter()
        .find(|&&(nid, _, _)| nid == id)
        .and_then(|&(_, _, prefix)| (!prefix.is_empty()).then_some(prefix))
}

pub fn find_standard_node(ns: NsId, local: &str) -> Option<NodeId> {
    NODE_BY_NS_LOCAL.get(&(ns, local)).copied()
}

pub fn standard_node_parts(id: NodeId) -> Option<(NsId, &'static str)> {
    STANDARD_NODES
        .iter()
        .find(|&&(nid, _, _)| nid == id)
        .map(|&(_, ns, local)| (ns, local))
}

/// The internal representation a literal's lexical form is parsed into,
/// determined entirely by its datatype node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Bool,
    Int,
    Unsigned,
    Double,
    Str,
}

/// Maps a datatype node to the literal representation it parses into. Any
/// datatype not recognized here (including user-defined ones) falls back to
/// `Str`, matching the "others -> string" default.
pub fn datatype_kind(datatype: NodeId) -> LiteralKind {
    match datatype {
        NODE_XSD_BOOLEAN => LiteralKind::Bool,
        NODE_XSD_INT | NODE_XSD_INTEGER | NODE_XSD_LONG | NODE_XSD_SHORT => LiteralKind::Int,
        NODE_XSD_UNSIGNEDINT | NODE_XSD_UNSIGNEDLONG | NODE_XSD_NONNEGATIVEINTEGER => {
            LiteralKind::Unsigned
        }
        NODE_XSD_DOUBLE | NODE_XSD_FLOAT | NODE_XSD_DECIMAL => LiteralKind::Double,
        _ => LiteralKind::Str,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_namespaces_are_findable_both_ways() {
        assert_eq!(find_standard_namespace_by_iri(STANDARD_NAMESPACES[2].1), Some(NS_OWL));
        assert_eq!(find_standard_namespace_by_prefix("owl"), Some(NS_OWL));
    }

    #[test]
    fn standard_node_round_trips_through_ns_and_local() {
        let (ns, local) = standard_node_parts(NODE_RDF_TYPE).unwrap();
        assert_eq!(find_standard_node(ns, local), Some(NODE_RDF_TYPE));
    }

    #[test]
    fn datatype_kind_defaults_to_string_for_unknown_datatypes() {
        assert_eq!(datatype_kind(NODE_OWL_THING), LiteralKind::Str);
        assert_eq!(datatype_kind(NODE_XSD_DOUBLE), LiteralKind::Double);
    }
}
