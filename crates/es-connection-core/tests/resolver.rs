// crates/es-connection-core/tests/resolver.rs
// ============================================================================
// Module: Scope-Aware Resolver Tests
// Description: Tests for scope gating of requires edges, defaults, and notes.
// ============================================================================
//! ## Overview
//! Covers the provider-level and resource-level models renderers consume.

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

use es_connection_core::BLOCK_DESCRIPTION;
use es_connection_core::DEPRECATION_MESSAGE;
use es_connection_core::DefaultDirective;
use es_connection_core::FallbackValue;
use es_connection_core::FieldName;
use es_connection_core::RequiresKind;
use es_connection_core::Scope;
use es_connection_core::build_effective_model;
use es_connection_core::catalog;
use es_connection_core::constraint_graph;
use es_connection_core::resolve;

// ============================================================================
// SECTION: Requires Gating
// ============================================================================

#[test]
fn resource_level_pairs_username_and_password() {
    let model = build_effective_model(Scope::ResourceLevel);
    assert!(model.requires(FieldName::Username, FieldName::Password));
    assert!(model.requires(FieldName::Password, FieldName::Username));
    assert_eq!(model.requires_edges().len(), 6);
}

#[test]
fn provider_level_drops_credential_pairing() {
    let model = build_effective_model(Scope::ProviderLevel);
    assert!(!model.requires(FieldName::Username, FieldName::Password));
    assert!(!model.requires(FieldName::Password, FieldName::Username));
    assert!(model.requires_edges().iter().all(|edge| edge.kind != RequiresKind::Credential));
}

#[test]
fn client_cert_pairing_is_scope_invariant() {
    for scope in Scope::ALL {
        let model = build_effective_model(scope);
        assert!(model.requires(FieldName::CertFile, FieldName::KeyFile), "{scope}");
        assert!(model.requires(FieldName::KeyFile, FieldName::CertFile), "{scope}");
        assert!(model.requires(FieldName::CertData, FieldName::KeyData), "{scope}");
        assert!(model.requires(FieldName::KeyData, FieldName::CertData), "{scope}");
    }
}

// ============================================================================
// SECTION: Conflicts
// ============================================================================

#[test]
fn conflicts_are_active_in_every_scope() {
    for scope in Scope::ALL {
        let model = build_effective_model(scope);
        assert_eq!(model.conflicts_edges(), constraint_graph().conflicts_edges());
        assert!(model.conflicts(FieldName::CertFile, FieldName::CertData));
        assert!(model.conflicts(FieldName::CertFile, FieldName::KeyData));
        assert!(model.conflicts(FieldName::ApiKey, FieldName::Username));
        assert!(model.conflicts(FieldName::ApiKey, FieldName::Password));
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn resource_level_injects_no_defaults() {
    let model = build_effective_model(Scope::ResourceLevel);
    assert_eq!(model.default_directive(FieldName::Insecure), DefaultDirective::None);
    assert!(model.fields().iter().all(|field| field.default.is_none()));
}

#[test]
fn provider_level_defaults_insecure_from_env_then_false() {
    let model = build_effective_model(Scope::ProviderLevel);
    let directive = model.default_directive(FieldName::Insecure);
    assert_eq!(
        directive,
        DefaultDirective::Env {
            var: "ELASTICSEARCH_INSECURE",
            fallback: Some(FallbackValue::Bool(false)),
        }
    );
    assert_eq!(directive.to_string(), "env:ELASTICSEARCH_INSECURE,fallback:false");
}

#[test]
fn provider_level_directives_follow_catalog_sources() {
    let model = build_effective_model(Scope::ProviderLevel);
    for spec in catalog().fields() {
        let directive = model.default_directive(spec.name);
        match spec.default_source {
            Some(source) => assert_eq!(
                directive,
                DefaultDirective::Env {
                    var: source.env_var,
                    fallback: source.fallback,
                }
            ),
            None => assert!(directive.is_none(), "{}", spec.name),
        }
    }
    assert_eq!(
        model.default_directive(FieldName::Username).to_string(),
        "env:ELASTICSEARCH_USERNAME"
    );
    assert_eq!(model.default_directive(FieldName::Endpoints).to_string(), "none");
}

// ============================================================================
// SECTION: Deprecation
// ============================================================================

#[test]
fn deprecation_note_only_at_resource_level() {
    let resource = build_effective_model(Scope::ResourceLevel);
    assert_eq!(resource.deprecation(), Some(DEPRECATION_MESSAGE));
    assert_eq!(resource.block_description(), format!("{BLOCK_DESCRIPTION} {DEPRECATION_MESSAGE}"));

    let provider = build_effective_model(Scope::ProviderLevel);
    assert_eq!(provider.deprecation(), None);
    assert_eq!(provider.block_description(), format!("{BLOCK_DESCRIPTION} "));
}

#[test]
fn block_description_keeps_separator_without_note() {
    let provider = build_effective_model(Scope::ProviderLevel).block_description();
    assert!(provider.ends_with("block. "));
    assert_eq!(provider.len(), BLOCK_DESCRIPTION.len() + 1);
}

// ============================================================================
// SECTION: Purity
// ============================================================================

#[test]
fn resolve_is_deterministic() {
    for scope in Scope::ALL {
        let first = resolve(catalog(), constraint_graph(), scope);
        let second = build_effective_model(scope);
        assert_eq!(first, second);
        assert_eq!(first.scope(), scope);
    }
}

#[test]
fn model_preserves_catalog_shape() {
    for scope in Scope::ALL {
        let model = build_effective_model(scope);
        assert_eq!(model.fields().len(), catalog().len());
        for (field, spec) in model.fields().iter().zip(catalog().fields()) {
            assert_eq!(field.name, spec.name);
            assert_eq!(field.field_type, spec.field_type);
            assert_eq!(field.sensitive, spec.sensitive);
            assert_eq!(field.description, spec.description);
        }
    }
}

#[test]
fn model_serializes_directives_as_strings() {
    let value = serde_json::to_value(build_effective_model(Scope::ProviderLevel))
        .expect("serialize model");
    assert_eq!(value["scope"], "provider_level");
    assert_eq!(value["fields"][4]["default"], "env:ELASTICSEARCH_INSECURE,fallback:false");
    assert_eq!(value["deprecation"], serde_json::Value::Null);
    assert_eq!(value["requires"][0]["kind"], "client_certificate");
}

#[test]
fn resolve_is_safe_across_threads() {
    let handles: Vec<_> = Scope::ALL
        .into_iter()
        .map(|scope| std::thread::spawn(move || build_effective_model(scope)))
        .collect();
    for (handle, scope) in handles.into_iter().zip(Scope::ALL) {
        let model = handle.join().expect("join");
        assert_eq!(model, build_effective_model(scope));
    }
}
