//! The closed sum type of a paragraph's inline children. `Other` is the
//! catch-all that keeps unknown elements (fields, bookmarks, smart tags,
//! math...) round-tripping byte-for-byte.

use super::RunProperties;

/// A run: the leaf unit carrying text and formatting.
#[derive(Debug, Clone, Default)]
pub struct Run {
    pub text: String,
    pub properties: RunProperties,
}

/// A Run-shaped container wrapped in tracked-change markup: `w:ins`, `w:del`,
/// `w:moveFrom`, or `w:moveTo`. Holds one or more child runs (a single
/// revision element may wrap several `w:r` children if the editor or a
/// foreign tool split them) plus the author/timestamp/id attributes of the
/// wrapping element.
#[derive(Debug, Clone)]
pub struct TrackedRun {
    pub author: String,
    /// ISO-8601 timestamp, kept as the original attribute string.
    pub date: String,
    pub id: u32,
    pub runs: Vec<Run>,
}

impl TrackedRun {
    /// Concatenated text of every child run, for visible-text and
    /// extraction purposes.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// One inline child of a paragraph.
#[derive(Debug, Clone)]
pub enum Inline {
    Run(Run),
    /// `w:del`: deleted text is excluded from the RunIndex's visible stream.
    DeletedRun(TrackedRun),
    /// `w:ins`.
    InsertedRun(TrackedRun),
    /// `w:moveFrom`: text moved away from this location; excluded from the
    /// visible stream like a deletion.
    MoveFromRun(TrackedRun),
    /// `w:moveTo`: text moved into this location; included like an insertion.
    MoveToRun(TrackedRun),
    /// `w:commentRangeStart`, zero-width, keyed by comment id.
    CommentRangeStart { id: String },
    /// `w:commentRangeEnd`, zero-width.
    CommentRangeEnd { id: String },
    /// `w:commentReference`, zero-width.
    CommentReference { id: String },
    /// Anything else: preserved verbatim as raw XML bytes.
    Other(Vec<u8>),
}

impl Inline {
    /// Visible-text contribution of this child, per RunIndex's rules: Run and
    /// InsertedRun/MoveToRun text is visible; DeletedRun/MoveFromRun text and
    /// all zero-width markers are not.
    pub fn visible_text(&self) -> Option<String> {
        match self {
            Inline::Run(r) => Some(r.text.clone()),
            Inline::InsertedRun(t) | Inline::MoveToRun(t) => Some(t.text()),
            _ => None,
        }
    }
}
