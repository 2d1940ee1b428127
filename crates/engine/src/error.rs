use crate::types::{NodeId, Relation};
use codegraph_syntax::SyntaxError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while building a code graph
#[derive(Error, Debug)]
pub enum EngineError {
    /// A source unit could not be parsed
    #[error("Syntax error in {path}: {source}")]
    Syntax {
        path: String,
        #[source]
        source: SyntaxError,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An edge points at a node that was never created
    #[error("Dangling edge {from} -{relation:?}-> {to}")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        relation: Relation,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create a syntax error for one unit
    pub fn syntax(path: impl Into<String>, source: SyntaxError) -> Self {
        Self::Syntax {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
