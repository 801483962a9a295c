//! Store configuration: which secondary indices to maintain and how much
//! capacity to pre-allocate for the namespace and node catalogs.

use hashbrown::HashSet;

use crate::error::{StoreError, StoreResult};
use crate::quad::{FragmentKind, IndexSpec, Role};

/// Configuration for a [`crate::store::TripleStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The secondary indices to build and maintain. At most one per leading
    /// role; `validate` rejects a list with two entries sharing a leading
    /// role.
    pub secondary_indices: Vec<IndexSpec>,
    /// Pre-allocated capacity hint for the node catalog.
    pub node_capacity_hint: usize,
    /// Pre-allocated capacity hint for the namespace catalog.
    pub namespace_capacity_hint: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        profiles::mixed_workload()
    }
}

impl StoreConfig {
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Checks that every index spec names a permutation of all four roles
    /// (leading role plus its three-role order) and that no two specs share
    /// a leading role.
    pub fn validate(&self) -> StoreResult<()> {
        let mut leading_roles = HashSet::new();
        for spec in &self.secondary_indices {
            if !leading_roles.insert(role_key(spec.leading)) {
                return Err(StoreError::Config(format!(
                    "two secondary indices cannot share the leading role {:?}",
                    spec.leading
                )));
            }
            let mut roles = HashSet::new();
            roles.insert(role_key(spec.leading));
            for r in spec.order {
                roles.insert(role_key(r));
            }
            if roles.len() != 4 {
                return Err(StoreError::Config(format!(
                    "index spec {spec:?} must cover all four roles exactly once"
                )));
            }
        }
        Ok(())
    }
}

fn role_key(r: Role) -> u8 {
    match r {
        Role::Subject => 0,
        Role::Predicate => 1,
        Role::Object => 2,
        Role::Doc => 3,
    }
}

/// Builder for [`StoreConfig`], mirroring the rest of the catalog builders.
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    secondary_indices: Option<Vec<IndexSpec>>,
    node_capacity_hint: Option<usize>,
    namespace_capacity_hint: Option<usize>,
}

impl StoreConfigBuilder {
    pub fn secondary_indices(mut self, specs: Vec<IndexSpec>) -> Self {
        self.secondary_indices = Some(specs);
        self
    }

    pub fn node_capacity_hint(mut self, hint: usize) -> Self {
        self.node_capacity_hint = Some(hint);
        self
    }

    pub fn namespace_capacity_hint(mut self, hint: usize) -> Self {
        self.namespace_capacity_hint = Some(hint);
        self
    }

    pub fn build(self) -> StoreResult<StoreConfig> {
        let default = StoreConfig::default();
        let config = StoreConfig {
            secondary_indices: self.secondary_indices.unwrap_or(default.secondary_indices),
            node_capacity_hint: self.node_capacity_hint.unwrap_or(default.node_capacity_hint),
            namespace_capacity_hint: self
                .namespace_capacity_hint
                .unwrap_or(default.namespace_capacity_hint),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Ready-made configurations for common workloads.
pub mod profiles {
    use super::{FragmentKind, IndexSpec, Role, StoreConfig};

    /// The default profile: a subject-leading vector index (cheap to bulk
    /// load) and a predicate-leading ordered index (predicates tend to be
    /// highly repetitive, so keeping that index continuously sorted pays
    /// off).
    pub fn mixed_workload() -> StoreConfig {
        StoreConfig {
            secondary_indices: vec![
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
            ],
            node_capacity_hint: 1024,
            namespace_capacity_hint: 64,
        }
    }

    /// Both indices vector-backed: minimizes the cost of a large initial
    /// load at the price of out-of-date secondary indices until the next
    /// query forces a re-sort.
    pub fn bulk_load() -> StoreConfig {
        StoreConfig {
            secondary_indices: vec![
                IndexSpec {
                    leading: Role::Subject,
                    order: [Role::Object, Role::Predicate, Role::Doc],
                    fragment_kind: FragmentKind::Vector,
                },
                IndexSpec {
                    leading: Role::Predicate,
                    order: [Role::Subject, Role::Object, Role::Doc],
                    fragment_kind: FragmentKind::Vector,
                },
            ],
            node_capacity_hint: 16 * 1024,
            namespace_capacity_hint: 256,
        }
    }

    /// Both indices ordered: best for workloads with many interleaved writes
    /// and reads, where vector fragments would otherwise re-sort on nearly
    /// every query.
    pub fn interactive() -> StoreConfig {
        StoreConfig {
            secondary_indices: vec![
                IndexSpec {
                    leading: Role::Subject,
                    order: [Role::Object, Role::Predicate, Role::Doc],
                    fragment_kind: FragmentKind::Ordered,
                },
                IndexSpec {
                    leading: Role::Predicate,
                    order: [Role::Subject, Role::Object, Role::Doc],
                    fragment_kind: FragmentKind::Ordered,
                },
            ],
            node_capacity_hint: 1024,
            namespace_capacity_hint: 64,
        }
    }
}
