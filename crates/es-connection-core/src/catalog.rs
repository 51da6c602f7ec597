// crates/es-connection-core/src/catalog.rs
// ============================================================================
// Module: Field Catalog
// Description: Fixed, ordered catalog of connection block fields.
// Purpose: Declare each field's type, sensitivity, and default source once.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The catalog is a process-wide static table. Field identity is the
//! [`FieldName`] enum, so constraints and lookups can only reference fields
//! that exist. The string form of each name is the attribute name renderers
//! emit and must stay byte-stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Field Identity
// ============================================================================

/// Name of a connection block field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Basic-auth username.
    Username,
    /// Basic-auth password.
    Password,
    /// API key for token authentication.
    ApiKey,
    /// Cluster endpoint URLs.
    Endpoints,
    /// Disables TLS certificate validation.
    Insecure,
    /// Path to a custom CA certificate.
    CaFile,
    /// Inline PEM custom CA certificate.
    CaData,
    /// Path to a client certificate.
    CertFile,
    /// Inline PEM client certificate.
    CertData,
    /// Path to a client private key.
    KeyFile,
    /// Inline PEM client private key.
    KeyData,
}

impl FieldName {
    /// Every field name in catalog order.
    pub const ALL: [Self; 11] = [
        Self::Username,
        Self::Password,
        Self::ApiKey,
        Self::Endpoints,
        Self::Insecure,
        Self::CaFile,
        Self::CaData,
        Self::CertFile,
        Self::CertData,
        Self::KeyFile,
        Self::KeyData,
    ];

    /// Returns the attribute name as rendered in descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::ApiKey => "api_key",
            Self::Endpoints => "endpoints",
            Self::Insecure => "insecure",
            Self::CaFile => "ca_file",
            Self::CaData => "ca_data",
            Self::CertFile => "cert_file",
            Self::CertData => "cert_data",
            Self::KeyFile => "key_file",
            Self::KeyData => "key_data",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Field Specification
// ============================================================================

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// Boolean flag.
    Bool,
    /// List of strings.
    StringList,
}

/// Literal fallback used when a default's environment variable is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FallbackValue {
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    Text(&'static str),
}

impl fmt::Display for FallbackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Environment-derived default for a field.
///
/// Operators script against these variable names, so they are part of the
/// public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DefaultSource {
    /// Environment variable consulted first.
    pub env_var: &'static str,
    /// Literal used when the variable is unset; `None` leaves the field unset.
    pub fallback: Option<FallbackValue>,
}

/// Declaration of a single connection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: FieldName,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value must never be echoed or logged.
    pub sensitive: bool,
    /// Always true; no field is unconditionally mandatory.
    pub optional: bool,
    /// Default source, honored only in scopes that permit defaults.
    pub default_source: Option<DefaultSource>,
    /// Markdown description shown to end users.
    pub description: &'static str,
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Read-only ordered set of field declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Field declarations in catalog order.
    fields: &'static [FieldSpec],
}

impl Catalog {
    /// Returns the fields in catalog order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Returns the declaration for `name`.
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the catalog has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds a plain string field with no default.
const fn string_field(name: FieldName, sensitive: bool, description: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::String,
        sensitive,
        optional: true,
        default_source: None,
        description,
    }
}

/// Builds a string field defaulted from an environment variable with no fallback.
const fn env_string_field(
    name: FieldName,
    sensitive: bool,
    env_var: &'static str,
    description: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::String,
        sensitive,
        optional: true,
        default_source: Some(DefaultSource {
            env_var,
            fallback: None,
        }),
        description,
    }
}

/// Field declarations backing [`catalog`].
static FIELDS: [FieldSpec; 11] = [
    env_string_field(
        FieldName::Username,
        false,
        "ELASTICSEARCH_USERNAME",
        "Username to use for API authentication to Elasticsearch.",
    ),
    env_string_field(
        FieldName::Password,
        true,
        "ELASTICSEARCH_PASSWORD",
        "Password to use for API authentication to Elasticsearch.",
    ),
    env_string_field(
        FieldName::ApiKey,
        true,
        "ELASTICSEARCH_API_KEY",
        "API Key to use for authentication to Elasticsearch",
    ),
    FieldSpec {
        name: FieldName::Endpoints,
        field_type: FieldType::StringList,
        sensitive: true,
        optional: true,
        default_source: None,
        description: "A comma-separated list of endpoints where the terraform provider will point \
                      to, this must include the http(s) schema and port number.",
    },
    FieldSpec {
        name: FieldName::Insecure,
        field_type: FieldType::Bool,
        sensitive: false,
        optional: true,
        default_source: Some(DefaultSource {
            env_var: "ELASTICSEARCH_INSECURE",
            fallback: Some(FallbackValue::Bool(false)),
        }),
        description: "Disable TLS certificate validation",
    },
    string_field(
        FieldName::CaFile,
        false,
        "Path to a custom Certificate Authority certificate",
    ),
    string_field(
        FieldName::CaData,
        false,
        "PEM-encoded custom Certificate Authority certificate",
    ),
    string_field(
        FieldName::CertFile,
        false,
        "Path to a file containing the PEM encoded certificate for client auth",
    ),
    string_field(FieldName::CertData, false, "PEM encoded certificate for client auth"),
    string_field(
        FieldName::KeyFile,
        false,
        "Path to a file containing the PEM encoded private key for client auth",
    ),
    string_field(FieldName::KeyData, true, "PEM encoded private key for client auth"),
];

/// Process-wide catalog instance.
static CATALOG: Catalog = Catalog {
    fields: &FIELDS,
};

/// Returns the process-wide field catalog.
#[must_use]
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Renders the attribute path for `field` inside the single-element block
/// named `block_key`, e.g. `elasticsearch_connection.0.username`.
#[must_use]
pub fn field_path(block_key: &str, field: FieldName) -> String {
    format!("{block_key}.0.{}", field.as_str())
}
