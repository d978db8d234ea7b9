use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a conversion.
///
/// Compilation is all-or-nothing: the first error stops the whole document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid markdown syntax: unmatched delimiter '{delimiter}'")]
    UnbalancedDelimiter { delimiter: String },

    #[error("parent node must have a tag")]
    MissingTag,

    #[error("node with tag '{tag}' must have a value")]
    MissingValue { tag: String },

    #[error("parent node '{tag}' must have children")]
    EmptyChildren { tag: String },

    #[error("invalid block type: {0}")]
    InvalidBlockType(String),

    #[error("invalid span kind: {0}")]
    InvalidSpanKind(String),

    #[error("malformed ordered list item: {line:?}")]
    MalformedListItem { line: String },

    #[error("no h1 header found in the markdown content")]
    MissingTitle,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
