//! Error types for the quad store.

use thiserror::Error;

use crate::ids::NodeId;
use crate::ids::NsId;

/// Everything that can go wrong while operating on a [`crate::store::TripleStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// An IRI string failed validation (empty, or containing whitespace/control
    /// characters that are never legal in an IRI).
    #[error("invalid IRI '{0}'")]
    BadIri(String),

    /// A literal's lexical form could not be parsed under its declared datatype.
    #[error("invalid literal '{lexical}' for datatype {datatype}: {reason}")]
    BadLiteral {
        lexical: String,
        datatype: NodeId,
        reason: String,
    },

    /// A prefix was already bound to a different namespace.
    #[error("prefix '{prefix}' is already bound to namespace {existing}")]
    PrefixConflict { prefix: String, existing: NsId },

    /// An id was passed to an operation that requires an id currently present
    /// in its catalog (removed, never issued, or out of range).
    #[error("invalid identifier: {0}")]
    InvalidId(u32),

    /// A [`crate::config::StoreConfig`] failed validation.
    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// Result type for quad store operations.
pub type StoreResult<T> = Result<T, StoreError>;
