//! Unified error type for `docx_review`.
//!
//! Every hard error (input missing, malformed container, unparseable
//! manifest, absent main document part) is a distinct `thiserror` variant
//! here so callers can match on kind; the CLI entry point additionally wraps
//! dispatch in `anyhow` so nothing escapes unconverted.

use thiserror::Error;

/// Result type for `docx_review` operations.
pub type Result<T> = std::result::Result<T, DocxError>;

/// Errors produced by the document, diff, and textconv pipelines.
#[derive(Error, Debug)]
pub enum DocxError {
    /// IO error opening, reading, or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a valid zip archive, or a required zip entry is missing.
    #[error("invalid .docx container: {0}")]
    InvalidContainer(String),

    /// The main document part (`word/document.xml`) is absent from the package.
    #[error("main document part not found in package")]
    MissingMainDocument,

    /// An XML part could not be parsed.
    #[error("XML error in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    /// A comment range start has no matching end, or vice versa.
    #[error("corrupt document: comment range {0} is not properly closed")]
    UnbalancedCommentRange(String),

    /// A comment reference has no matching entry in the comments part.
    #[error("corrupt document: comment reference {0} has no matching comment")]
    DanglingCommentReference(String),

    /// The edit manifest could not be parsed as JSON.
    #[error("manifest JSON error: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// A manifest entry is missing a required field for its operation type.
    #[error("manifest entry {index} ({kind}) is missing required field `{field}`")]
    ManifestMissingField {
        index: usize,
        kind: String,
        field: String,
    },

    /// A manifest entry named an operation type that does not exist.
    #[error("manifest entry {index} has unknown change type `{kind}`")]
    ManifestUnknownKind { index: usize, kind: String },

    /// Per-operation failure: no occurrence of the needle found.
    #[error("phrase not found: {0:?}")]
    NotFound(String),

    /// Per-operation failure: the matched range spans more than one paragraph.
    #[error("match spans multiple paragraphs, which only comments may anchor to")]
    SpansMultipleParagraphs,

    /// Per-operation failure: a zero-length range was given to replace/delete.
    #[error("cannot {0} a zero-length range")]
    ZeroLengthRange(&'static str),

    /// Generic fallback, used sparingly.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::Xml {
            part: "<unknown>".to_string(),
            source: err,
        }
    }
}
