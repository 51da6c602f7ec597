// crates/es-connection-core/tests/graph.rs
// ============================================================================
// Module: Constraint Graph Tests
// Description: Tests for requires and conflicts edges.
// ============================================================================
//! ## Overview
//! Verifies edge contents, symmetry, and catalog closure of the graph.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use es_connection_core::FieldName;
use es_connection_core::RequiresKind;
use es_connection_core::catalog;
use es_connection_core::constraint_graph;

#[test]
fn requires_edges_pair_credentials_and_client_certs() {
    let edges: Vec<(FieldName, FieldName, RequiresKind)> = constraint_graph()
        .requires_edges()
        .iter()
        .map(|edge| (edge.field, edge.requires, edge.kind))
        .collect();
    assert_eq!(
        edges,
        vec![
            (FieldName::Username, FieldName::Password, RequiresKind::Credential),
            (FieldName::Password, FieldName::Username, RequiresKind::Credential),
            (FieldName::CertFile, FieldName::KeyFile, RequiresKind::ClientCertificate),
            (FieldName::KeyFile, FieldName::CertFile, RequiresKind::ClientCertificate),
            (FieldName::CertData, FieldName::KeyData, RequiresKind::ClientCertificate),
            (FieldName::KeyData, FieldName::CertData, RequiresKind::ClientCertificate),
        ]
    );
}

#[test]
fn conflicts_are_symmetric() {
    let graph = constraint_graph();
    for edge in graph.conflicts_edges() {
        assert!(
            graph.conflicts(edge.conflicts_with, edge.field),
            "missing reverse of {} -> {}",
            edge.field,
            edge.conflicts_with
        );
    }
}

#[test]
fn api_key_excludes_basic_auth() {
    let graph = constraint_graph();
    assert!(graph.conflicts(FieldName::ApiKey, FieldName::Username));
    assert!(graph.conflicts(FieldName::ApiKey, FieldName::Password));
    assert!(!graph.conflicts(FieldName::Username, FieldName::Password));
}

#[test]
fn file_and_inline_material_are_exclusive() {
    let graph = constraint_graph();
    assert!(graph.conflicts(FieldName::CaFile, FieldName::CaData));
    for file in [FieldName::CertFile, FieldName::KeyFile] {
        for data in [FieldName::CertData, FieldName::KeyData] {
            assert!(graph.conflicts(file, data), "{file} vs {data}");
            assert!(graph.conflicts(data, file), "{data} vs {file}");
        }
    }
    assert!(!graph.conflicts(FieldName::CertFile, FieldName::KeyFile));
    assert!(!graph.conflicts(FieldName::CaFile, FieldName::CertFile));
}

#[test]
fn conflicts_edge_count_covers_both_directions() {
    assert_eq!(constraint_graph().conflicts_edges().len(), 14);
}

#[test]
fn every_edge_references_catalog_fields() {
    let graph = constraint_graph();
    for edge in graph.requires_edges() {
        assert!(catalog().get(edge.field).is_some());
        assert!(catalog().get(edge.requires).is_some());
        assert_ne!(edge.field, edge.requires);
    }
    for edge in graph.conflicts_edges() {
        assert!(catalog().get(edge.field).is_some());
        assert!(catalog().get(edge.conflicts_with).is_some());
        assert_ne!(edge.field, edge.conflicts_with);
    }
}

#[test]
fn graph_is_shared_process_wide() {
    assert!(std::ptr::eq(constraint_graph(), constraint_graph()));
}
