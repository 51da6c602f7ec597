// crates/es-connection-core/src/graph.rs
// ============================================================================
// Module: Constraint Graph
// Description: Requires and conflicts relationships between connection fields.
// Purpose: Encode every cross-field rule once for all renderers.
// Dependencies: crate::catalog, serde
// ============================================================================

//! ## Overview
//! Requires edges are directed: `field` being set obligates `requires` to be
//! set. Conflicts are declared once per unordered pair and expanded into both
//! directions when the graph is built, so symmetry holds by construction.
//!
//! The graph is built lazily on first use and shared read-only afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use serde::Serialize;

use crate::catalog::FieldName;

// ============================================================================
// SECTION: Edge Types
// ============================================================================

/// Rule family a requires edge belongs to.
///
/// The resolver gates edges by family, not by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiresKind {
    /// Basic-auth username/password pairing.
    Credential,
    /// Client certificate and private key pairing in the same encoding.
    ClientCertificate,
}

/// Directed "also requires" edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequiresEdge {
    /// Field whose presence triggers the rule.
    pub field: FieldName,
    /// Field that must also be set.
    pub requires: FieldName,
    /// Rule family.
    pub kind: RequiresKind,
}

/// Directed "mutually exclusive" edge. The reverse edge is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConflictsEdge {
    /// Field carrying the rule.
    pub field: FieldName,
    /// Field that must not be set alongside `field`.
    pub conflicts_with: FieldName,
}

// ============================================================================
// SECTION: Edge Tables
// ============================================================================

/// Requires edges in declaration order.
const REQUIRES: [RequiresEdge; 6] = [
    requires(FieldName::Username, FieldName::Password, RequiresKind::Credential),
    requires(FieldName::Password, FieldName::Username, RequiresKind::Credential),
    requires(FieldName::CertFile, FieldName::KeyFile, RequiresKind::ClientCertificate),
    requires(FieldName::KeyFile, FieldName::CertFile, RequiresKind::ClientCertificate),
    requires(FieldName::CertData, FieldName::KeyData, RequiresKind::ClientCertificate),
    requires(FieldName::KeyData, FieldName::CertData, RequiresKind::ClientCertificate),
];

/// Unordered conflict pairs; expanded to both directions at build time.
const CONFLICT_PAIRS: [(FieldName, FieldName); 7] = [
    // API-key auth excludes basic auth.
    (FieldName::ApiKey, FieldName::Username),
    (FieldName::ApiKey, FieldName::Password),
    (FieldName::CaFile, FieldName::CaData),
    // No mixing file and inline client-auth material.
    (FieldName::CertFile, FieldName::CertData),
    (FieldName::CertFile, FieldName::KeyData),
    (FieldName::KeyFile, FieldName::CertData),
    (FieldName::KeyFile, FieldName::KeyData),
];

/// Shorthand constructor for requires table entries.
const fn requires(field: FieldName, required: FieldName, kind: RequiresKind) -> RequiresEdge {
    RequiresEdge {
        field,
        requires: required,
        kind,
    }
}

// ============================================================================
// SECTION: Graph
// ============================================================================

/// Full, scope-independent constraint graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintGraph {
    /// Every requires edge.
    requires: Vec<RequiresEdge>,
    /// Every conflicts edge, both directions.
    conflicts: Vec<ConflictsEdge>,
}

impl ConstraintGraph {
    /// Builds a graph from requires edges and unordered conflict pairs.
    fn build(requires: &[RequiresEdge], conflict_pairs: &[(FieldName, FieldName)]) -> Self {
        debug_assert!(
            requires.iter().all(|edge| edge.field != edge.requires),
            "requires edge must join two distinct fields"
        );
        debug_assert!(
            conflict_pairs.iter().all(|(left, right)| left != right),
            "conflict pair must join two distinct fields"
        );
        let mut conflicts = Vec::with_capacity(conflict_pairs.len() * 2);
        for &(left, right) in conflict_pairs {
            conflicts.push(ConflictsEdge {
                field: left,
                conflicts_with: right,
            });
            conflicts.push(ConflictsEdge {
                field: right,
                conflicts_with: left,
            });
        }
        Self {
            requires: requires.to_vec(),
            conflicts,
        }
    }

    /// Returns every requires edge, regardless of scope.
    #[must_use]
    pub fn requires_edges(&self) -> &[RequiresEdge] {
        &self.requires
    }

    /// Returns every conflicts edge in both directions.
    #[must_use]
    pub fn conflicts_edges(&self) -> &[ConflictsEdge] {
        &self.conflicts
    }

    /// Returns true when `field` and `other` are mutually exclusive.
    #[must_use]
    pub fn conflicts(&self, field: FieldName, other: FieldName) -> bool {
        self.conflicts.iter().any(|edge| edge.field == field && edge.conflicts_with == other)
    }
}

/// Process-wide constraint graph.
static GRAPH: LazyLock<ConstraintGraph> =
    LazyLock::new(|| ConstraintGraph::build(&REQUIRES, &CONFLICT_PAIRS));

/// Returns the process-wide constraint graph.
#[must_use]
pub fn constraint_graph() -> &'static ConstraintGraph {
    &GRAPH
}
