//! # rdf-quadstore
//!
//! An in-memory RDF quad store: interns IRIs, blank nodes and typed literals
//! into compact identifiers, attributes each quad to the document it came
//! from, and answers pattern queries through a configurable set of
//! secondary indices.
//!
//! ## Quick start
//!
//! ```rust
//! use rdf_quadstore::{Pattern, TripleStore};
//!
//! let mut store = TripleStore::default();
//! let ns = store.insert_ns("http://example.org/");
//! let alice = store.insert_iri_node(ns, "alice")?;
//! let knows = store.insert_iri_node(ns, "knows")?;
//! let bob = store.insert_iri_node(ns, "bob")?;
//! let (doc, _) = store.insert_doc(None, None, "file:///friends.ttl");
//!
//! store.insert_triple(alice, knows, bob, doc);
//!
//! let results = store.find_triple(Pattern { s: Some(alice), ..Pattern::any() });
//! assert_eq!(results.len(), 1);
//! # Ok::<(), rdf_quadstore::StoreError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`ids`] - opaque identifiers and the free-list allocator they share
//! - [`standard_terms`] - the fixed RDF/RDFS/OWL/XSD vocabulary every store starts with
//! - [`namespace`] - the namespace catalog
//! - [`node`] - the node catalog (IRIs, blank nodes, typed literals)
//! - [`document`] - the document catalog
//! - [`quad`] - the quad index and its secondary indices
//! - [`config`] - store configuration and ready-made profiles
//! - [`store`] - the [`TripleStore`] facade tying the above together
//! - [`error`] - error types
//!
//! ## Non-goals
//!
//! This crate does not parse RDF syntaxes, evaluate SPARQL, perform OWL
//! inference, persist to disk, or coordinate concurrent access. It is a
//! single-threaded in-memory index; callers that need any of the above build
//! it on top.

pub mod config;
pub mod document;
pub mod error;
pub mod ids;
pub mod namespace;
pub mod node;
pub mod quad;
pub mod standard_terms;
pub mod store;

pub use config::StoreConfig;
pub use document::{DocEntry, DocumentCatalog};
pub use error::{StoreError, StoreResult};
pub use ids::{DocId, NodeId, NsId};
pub use namespace::NamespaceCatalog;
pub use node::{Node, NodeCatalog};
pub use quad::{FragmentKind, IndexSpec, Pattern, Quad, Role};
pub use store::TripleStore;
