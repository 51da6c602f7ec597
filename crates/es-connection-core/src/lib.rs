// crates/es-connection-core/src/lib.rs
// ============================================================================
// Module: ES Connection Core Library
// Description: Public API surface for the connection field model.
// Purpose: Single source of truth for connection fields, constraints, and defaults.
// Dependencies: crate::{catalog, graph, resolver}
// ============================================================================

//! ## Overview
//! `es-connection-core` declares the Elasticsearch connection block: the
//! catalog of fields, the requires/conflicts relationships between them, and
//! the scope-aware resolver that turns both into an [`EffectiveModel`].
//!
//! Every descriptor renderer consumes the same [`EffectiveModel`], so the
//! fields, defaults, and cross-field rules cannot drift between them. The
//! crate is pure: no I/O, no environment access, no shared mutable state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod graph;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::DefaultSource;
pub use catalog::FallbackValue;
pub use catalog::FieldName;
pub use catalog::FieldSpec;
pub use catalog::FieldType;
pub use catalog::catalog;
pub use catalog::field_path;
pub use graph::ConflictsEdge;
pub use graph::ConstraintGraph;
pub use graph::RequiresEdge;
pub use graph::RequiresKind;
pub use graph::constraint_graph;
pub use resolver::BLOCK_DESCRIPTION;
pub use resolver::DEPRECATION_MESSAGE;
pub use resolver::DefaultDirective;
pub use resolver::EffectiveField;
pub use resolver::EffectiveModel;
pub use resolver::Scope;
pub use resolver::build_effective_model;
pub use resolver::resolve;
