//! A single named part inside an OPC package.

/// A part's raw bytes plus the bookkeeping needed to write it back unchanged.
///
/// Parts that `docx_review` does not model structurally (styles, themes,
/// settings, media, custom XML, fonts...) are carried purely as `bytes` and
/// round-trip verbatim; only the main document and comments parts are ever
/// replaced by freshly serialized content.
#[derive(Debug, Clone)]
pub struct Part {
    /// Zip entry name, e.g. `word/document.xml`.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Part {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}
