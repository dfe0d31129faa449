//! Error types for copydesk
//!
//! Only recoverable faults live here. Traversal-protocol violations (an
//! unhandled delegate event, reporter stack misuse) are programming bugs and
//! panic instead of returning an error.

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema construction, loading and rendering errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("duplicate type name: {0}")]
    DuplicateName(String),

    #[error("unknown reference target: {0}")]
    UnknownTarget(String),

    #[error("expected a record type, got {0}")]
    NotARecord(String),

    #[error("invalid schema declaration: {0}")]
    InvalidDeclaration(String),

    #[error("validation engine fault: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
