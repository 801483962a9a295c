//! The namespace catalog: interns IRI namespace strings and layers a mutable
//! prefix binding on top of them.
//!
//! Every namespace starts out prefix-less; `set_prefix` binds a short name to
//! it and `find_prefix`/`prefix_of` resolve that binding back. The standard
//! namespaces ([`crate::standard_terms`]) are pre-seeded below
//! [`crate::standard_terms::MIN_USER_NS_ID`] and are immutable: their prefixes
//! cannot be rebound and they cannot be removed.

use hashbrown::HashMap;
use log::debug;

use crate::error::{StoreError, StoreResult};
use crate::ids::{IdAllocator, NsId};
use crate::standard_terms::{
    self, find_standard_namespace_by_iri, find_standard_namespace_by_prefix,
    standard_namespace_iri, standard_namespace_prefix, MIN_USER_NS_ID,
};

struct NsEntry {
    iri: String,
    prefix: Option<String>,
}

/// Catalog of namespace IRIs and their (optional) prefix bindings.
pub struct NamespaceCatalog {
    slots: Vec<Option<NsEntry>>,
    by_iri: HashMap<String, NsId>,
    by_prefix: HashMap<String, NsId>,
    alloc: IdAllocator<NsId>,
}

impl Default for NamespaceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceCatalog {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_iri: HashMap::new(),
            by_prefix: HashMap::new(),
            alloc: IdAllocator::starting_at(MIN_USER_NS_ID),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            by_iri: HashMap::with_capacity(cap),
            by_prefix: HashMap::with_capacity(cap),
            alloc: IdAllocator::starting_at(MIN_USER_NS_ID),
        }
    }

    fn slot_index(&self, id: NsId) -> Option<usize> {
        let idx = id.value().checked_sub(MIN_USER_NS_ID)? as usize;
        Some(idx)
    }

    /// True if `id` names a live namespace, standard or user-defined.
    pub fn valid(&self, id: NsId) -> bool {
        if id.value() < MIN_USER_NS_ID {
            return true;
        }
        self.slot_index(id)
            .and_then(|idx| self.slots.get(idx))
            .map(|s| s.is_some())
            .unwrap_or(false)
    }

    /// Interns `iri`, returning its id. Re-inserting an already-known IRI
    /// (standard or user) is a no-op that returns the existing id.
    pub fn insert(&mut self, iri: &str) -> NsId {
        if let Some(id) = find_standard_namespace_by_iri(iri) {
            return id;
        }
        if let Some(&id) = self.by_iri.get(iri) {
            return id;
        }
        let id = self.alloc.next();
        let idx = self.slot_index(id).unwrap();
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx] = Some(NsEntry {
            iri: iri.to_string(),
            prefix: None,
        });
        self.by_iri.insert(iri.to_string(), id);
        debug!("namespace catalog: interned '{iri}' as {id}");
        id
    }

    /// Finds an id by IRI string: user-defined bindings are checked first,
    /// then the standard table.
    pub fn find_iri(&self, iri: &str) -> Option<NsId> {
        self.by_iri
            .get(iri)
            .copied()
            .or_else(|| find_standard_namespace_by_iri(iri))
    }

    /// Finds an id by bound prefix: user-defined bindings are checked first,
    /// then the standard table.
    pub fn find_prefix(&self, prefix: &str) -> Option<NsId> {
        self.by_prefix
            .get(prefix)
            .copied()
            .or_else(|| find_standard_namespace_by_prefix(prefix))
    }

    /// Returns the interned IRI string for `id`, if it is live.
    pub fn iri_of(&self, id: NsId) -> Option<&str> {
        if id.value() < MIN_USER_NS_ID {
            return standard_namespace_iri(id);
        }
        self.slot_index(id)
            .and_then(|idx| self.slots.get(idx))
            .and_then(|s| s.as_ref())
            .map(|e| e.iri.as_str())
    }

    /// Returns the prefix bound to `id`, preferring the user-defined binding
    /// and falling back to the standard one.
    pub fn prefix_of(&self, id: NsId) -> Option<&str> {
        if id.value() >= MIN_USER_NS_ID {
            if let Some(e) = self
                .slot_index(id)
                .and_then(|idx| self.slots.get(idx))
                .and_then(|s| s.as_ref())
            {
                if let Some(p) = e.prefix.as_deref() {
                    return Some(p);
                }
            }
        }
        standard_namespace_prefix(id)
    }

    /// Binds `prefix` to `id`. Rebinding the same `(id, prefix)` pair is a
    /// no-op; binding a prefix already owned by a different namespace is a
    /// [`StoreError::PrefixConflict`]. Standard namespaces' prefixes are
    /// fixed and cannot be rebound.
    pub fn set_prefix(&mut self, id: NsId, prefix: &str) -> StoreResult<()> {
        if let Some(existing) = self.find_prefix(prefix) {
            if existing == id {
                return Ok(());
            }
            return Err(StoreError::PrefixConflict {
                prefix: prefix.to_string(),
                existing,
            });
        }
        if id.value() < MIN_USER_NS_ID {
            return Err(StoreError::PrefixConflict {
                prefix: prefix.to_string(),
                existing: id,
            });
        }
        let idx = self
            .slot_index(id)
            .filter(|&idx| idx < self.slots.len() && self.slots[idx].is_some())
            .ok_or(StoreError::InvalidId(id.value()))?;
        if let Some(old_prefix) = self.slots[idx].as_ref().and_then(|e| e.prefix.clone()) {
            self.by_prefix.remove(&old_prefix);
        }
        self.slots[idx].as_mut().unwrap().prefix = Some(prefix.to_string());
        self.by_prefix.insert(prefix.to_string(), id);
        Ok(())
    }

    /// Removes a user-defined namespace, releasing its id. Standard
    /// namespaces are not removable and this is silently ignored for them.
    pub fn remove(&mut self, id: NsId) {
        if id.value() < MIN_USER_NS_ID {
            return;
        }
        let Some(idx) = self.slot_index(id) else {
            return;
        };
        if idx >= self.slots.len() {
            return;
        }
        if let Some(entry) = self.slots[idx].take() {
            self.by_iri.remove(&entry.iri);
            if let Some(prefix) = entry.prefix {
                self.by_prefix.remove(&prefix);
            }
            self.alloc.release(id);
            debug!("namespace catalog: removed {id}");
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count() + standard_terms::STANDARD_NAMESPACES.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every live user-defined namespace id (standard namespaces are always
    /// live and are omitted; query them through [`crate::standard_terms`]
    /// directly).
    pub fn user_ids(&self) -> impl Iterator<Item = NsId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref().map(|_| NsId::new(i as u32 + MIN_USER_NS_ID))
        })
    }
}
