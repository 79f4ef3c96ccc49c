//! Error types for the workflow graph model

use thiserror::Error;

/// Result type alias using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while editing or decoding a workflow graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// No catalog entry with this id
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),

    /// A node's declared type disagrees with its integration
    #[error("Node type '{node_type}' does not match integration '{integration}'")]
    IntegrationTypeMismatch {
        node_type: String,
        integration: String,
    },

    /// Node id not present in the document
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Node configuration rejected by the integration schema
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a node configuration does not fit its integration's field list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration payload was not a JSON object
    #[error("configuration must be a JSON object")]
    NotAnObject,

    /// Key not declared by the integration
    #[error("unknown field '{field}' for integration '{integration}'")]
    UnknownField { integration: String, field: String },

    /// Value has the wrong JSON type for the declared field kind
    #[error("field '{field}' expects {expected}")]
    TypeMismatch { field: String, expected: String },

    /// Select value outside the declared options
    #[error("field '{field}' does not accept '{value}'")]
    InvalidOption { field: String, value: String },

    /// Integration has no typed configuration schema
    #[error("integration '{0}' has no configuration schema")]
    UnsupportedIntegration(String),

    /// Validated fields could not be decoded into the typed variant
    #[error("could not decode configuration: {0}")]
    Decode(String),
}
