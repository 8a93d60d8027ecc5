//! Error types for cql2cfn

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a CQL script
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read CQL script: {path}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CloudFormation template: {path}")]
    TemplateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CQL syntax error at line {line}, column {column}: {message}")]
    Parse {
        line: u64,
        column: u64,
        message: String,
    },

    /// Structural violation detected while a statement is being constructed
    #[error("Invalid schema: {message}")]
    Schema { message: String },

    /// Fatal diagnostic raised while mapping statements to resources
    #[error("{message}")]
    Diagnostic { message: String },

    /// Warning promoted to a fatal error by strict mode
    #[error("{message} (strict mode)")]
    StrictWarning { message: String },

    #[error("Failed to render template: {message}")]
    Render { message: String },
}

impl ConvertError {
    pub fn schema(message: impl Into<String>) -> Self {
        ConvertError::Schema {
            message: message.into(),
        }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        ConvertError::Diagnostic {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Render {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
