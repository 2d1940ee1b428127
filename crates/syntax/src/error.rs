use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Errors that can occur while turning Go source into a syntax tree
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The source contains a syntax error (1-indexed position of the first one)
    #[error("syntax error at {line}:{column} near `{snippet}`")]
    Parse {
        line: usize,
        column: usize,
        snippet: String,
    },

    /// No `package` clause at the top of the unit
    #[error("missing package clause")]
    MissingPackageClause,

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl SyntaxError {
    /// Create a parse error
    pub fn parse(line: usize, column: usize, snippet: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            snippet: snippet.into(),
        }
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
