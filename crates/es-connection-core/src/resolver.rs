// crates/es-connection-core/src/resolver.rs
// ============================================================================
// Module: Scope-Aware Resolver
// Description: Derives the effective connection model for a usage scope.
// Purpose: Give every renderer one inspectable, scope-specific model.
// Dependencies: crate::{catalog, graph}, serde
// ============================================================================

//! ## Overview
//! The connection block is used in two places. At provider level, fields
//! fall back to environment variables, and environment defaults cannot be
//! combined with "required together" validation: a value injected by a
//! default must not trip a check that its partner is also set. Credential
//! requires edges are therefore dropped there. At resource level no
//! defaults are injected, every requires edge is enforced, and the block
//! carries a deprecation note.
//!
//! Client-certificate pairing and all conflicts are active in both scopes.
//!
//! [`resolve`] is a pure function; calling it twice with the same inputs
//! yields equal models.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde::Serializer;

use crate::catalog::Catalog;
use crate::catalog::FallbackValue;
use crate::catalog::FieldName;
use crate::catalog::FieldType;
use crate::catalog::catalog;
use crate::graph::ConflictsEdge;
use crate::graph::ConstraintGraph;
use crate::graph::RequiresEdge;
use crate::graph::RequiresKind;
use crate::graph::constraint_graph;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Deprecation note attached to resource-level connection blocks.
pub const DEPRECATION_MESSAGE: &str = "This property will be removed in a future provider \
                                       version. Configure the Elasticsearch connection via the \
                                       provider configuration instead.";

/// Leading sentence of the block description.
pub const BLOCK_DESCRIPTION: &str = "Elasticsearch connection configuration block.";

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Usage context of a connection block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Provider configuration: env defaults on, credential pairing off.
    ProviderLevel,
    /// Per-resource override: no defaults, all pairing on, deprecated.
    ResourceLevel,
}

impl Scope {
    /// Both scopes, provider level first.
    pub const ALL: [Self; 2] = [Self::ProviderLevel, Self::ResourceLevel];

    /// Returns true when environment defaults are injected in this scope.
    #[must_use]
    pub const fn allows_defaults(self) -> bool {
        matches!(self, Self::ProviderLevel)
    }

    /// Returns true when requires edges of `kind` are enforced in this scope.
    #[must_use]
    pub const fn enforces(self, kind: RequiresKind) -> bool {
        match kind {
            RequiresKind::Credential => !self.allows_defaults(),
            RequiresKind::ClientCertificate => true,
        }
    }

    /// Returns the stable label for this scope.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProviderLevel => "provider_level",
            Self::ResourceLevel => "resource_level",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Effective Model
// ============================================================================

/// Resolved default behavior of a field.
///
/// Renders as `none`, `env:<VAR>`, or `env:<VAR>,fallback:<value>`; the
/// variable name and fallback are reproduced byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultDirective {
    /// No default is injected.
    None,
    /// Read `var`, then fall back to `fallback` when present.
    Env {
        /// Environment variable name.
        var: &'static str,
        /// Literal used when the variable is unset.
        fallback: Option<FallbackValue>,
    },
}

impl DefaultDirective {
    /// Returns true when no default is injected.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for DefaultDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Env {
                var,
                fallback: None,
            } => write!(f, "env:{var}"),
            Self::Env {
                var,
                fallback: Some(value),
            } => write!(f, "env:{var},fallback:{value}"),
        }
    }
}

impl Serialize for DefaultDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field as seen by a renderer in a specific scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveField {
    /// Field name.
    pub name: FieldName,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value must never be echoed or logged.
    pub sensitive: bool,
    /// Always true.
    pub optional: bool,
    /// Markdown description.
    pub description: &'static str,
    /// Default directive for this scope.
    pub default: DefaultDirective,
}

/// Scope-specific view of the catalog and constraint graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveModel {
    /// Scope the model was resolved for.
    scope: Scope,
    /// Fields in catalog order.
    fields: Vec<EffectiveField>,
    /// Requires edges active in this scope.
    requires: Vec<RequiresEdge>,
    /// All conflicts edges.
    conflicts: Vec<ConflictsEdge>,
    /// Deprecation note, resource level only.
    deprecation: Option<&'static str>,
}

impl EffectiveModel {
    /// Returns the scope the model was resolved for.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the fields in catalog order.
    #[must_use]
    pub fn fields(&self) -> &[EffectiveField] {
        &self.fields
    }

    /// Returns the resolved field named `name`.
    #[must_use]
    pub fn field(&self, name: FieldName) -> Option<&EffectiveField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the requires edges active in this scope.
    #[must_use]
    pub fn requires_edges(&self) -> &[RequiresEdge] {
        &self.requires
    }

    /// Returns every conflicts edge.
    #[must_use]
    pub fn conflicts_edges(&self) -> &[ConflictsEdge] {
        &self.conflicts
    }

    /// Returns true when setting `field` obligates `other` in this scope.
    #[must_use]
    pub fn requires(&self, field: FieldName, other: FieldName) -> bool {
        self.requires.iter().any(|edge| edge.field == field && edge.requires == other)
    }

    /// Returns true when `field` and `other` are mutually exclusive.
    #[must_use]
    pub fn conflicts(&self, field: FieldName, other: FieldName) -> bool {
        self.conflicts.iter().any(|edge| edge.field == field && edge.conflicts_with == other)
    }

    /// Returns the default directive for `name`; `None` for unknown fields.
    #[must_use]
    pub fn default_directive(&self, name: FieldName) -> DefaultDirective {
        self.field(name).map_or(DefaultDirective::None, |field| field.default)
    }

    /// Returns the deprecation note, if any.
    #[must_use]
    pub const fn deprecation(&self) -> Option<&'static str> {
        self.deprecation
    }

    /// Returns the block description followed by a space and the
    /// deprecation note. Without a note the trailing space remains.
    #[must_use]
    pub fn block_description(&self) -> String {
        format!("{BLOCK_DESCRIPTION} {}", self.deprecation.unwrap_or_default())
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves `catalog` and `graph` into the effective model for `scope`.
#[must_use]
pub fn resolve(catalog: &Catalog, graph: &ConstraintGraph, scope: Scope) -> EffectiveModel {
    let fields = catalog
        .fields()
        .iter()
        .map(|spec| {
            let default = match spec.default_source {
                Some(source) if scope.allows_defaults() => DefaultDirective::Env {
                    var: source.env_var,
                    fallback: source.fallback,
                },
                _ => DefaultDirective::None,
            };
            EffectiveField {
                name: spec.name,
                field_type: spec.field_type,
                sensitive: spec.sensitive,
                optional: spec.optional,
                description: spec.description,
                default,
            }
        })
        .collect();
    let requires = graph
        .requires_edges()
        .iter()
        .copied()
        .filter(|edge| scope.enforces(edge.kind))
        .collect();
    let deprecation = match scope {
        Scope::ProviderLevel => None,
        Scope::ResourceLevel => Some(DEPRECATION_MESSAGE),
    };
    EffectiveModel {
        scope,
        fields,
        requires,
        conflicts: graph.conflicts_edges().to_vec(),
        deprecation,
    }
}

/// Builds the effective model for `scope` from the process-wide catalog and
/// graph. This is the boundary renderers consume.
#[must_use]
pub fn build_effective_model(scope: Scope) -> EffectiveModel {
    resolve(catalog(), constraint_graph(), scope)
}
