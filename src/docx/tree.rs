//! The owned document tree: paragraphs and tables parsed out of
//! `word/document.xml`, plus the literal bytes needed to put everything that
//! isn't a paragraph or table back exactly as found.
//!
//! Each `<w:p>` is parsed into its own owned buffer while streaming, and every
//! paragraph keeps its original bytes *and* a parsed model, so an untouched
//! paragraph round-trips byte-for-byte (`raw`) while an edited one is
//! regenerated from the model (`dirty`). Splicing replaces a paragraph's
//! children wholesale rather than mutating XML text in place.

use crate::model::{Paragraph, Table};

/// `word/document.xml`, split into the literal prefix up to and including
/// `<w:body>`, the modeled paragraph/table blocks, any trailing body-level
/// content we don't model (section properties, mostly), and the literal
/// suffix from `</w:body>` onward.
#[derive(Debug, Clone)]
pub struct DocumentXml {
    pub prefix: Vec<u8>,
    pub blocks: Vec<BlockNode>,
    pub tail_raw: Vec<u8>,
    pub suffix: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum BlockNode {
    Paragraph(ParagraphNode),
    Table(TableNode),
}

/// A parsed paragraph plus the bytes needed to reproduce it verbatim.
#[derive(Debug, Clone)]
pub struct ParagraphNode {
    pub model: Paragraph,
    /// The paragraph's opening tag, `<w:p ...>`, preserved so regenerated
    /// paragraphs keep whatever attributes (rsid, paraId...) Word wrote.
    pub open_tag: Vec<u8>,
    /// Raw `<w:pPr>...</w:pPr>` bytes (or empty if the paragraph has none).
    pub raw_ppr: Vec<u8>,
    /// The paragraph's full original bytes, `<w:p ...>...</w:p>`.
    pub raw: Vec<u8>,
    /// Set once an edit (Splicer or CommentWriter) has touched this
    /// paragraph's children; only then is it regenerated from `model`
    /// instead of emitted as `raw`.
    pub dirty: bool,
}

/// Tables are never a target of editing in this tool (the Splicer and
/// CommentWriter only ever address top-level body paragraphs), so a table
/// always round-trips as `raw`; `model` exists purely for the extractor and
/// differ, which only need cell text.
#[derive(Debug, Clone)]
pub struct TableNode {
    pub model: Table,
    pub raw: Vec<u8>,
}

impl DocumentXml {
    /// The paragraph at `block_index`. Panics if that block is a table —
    /// callers only ever reach this through a `RunIndex` position, and the
    /// RunIndex never maps visible text onto a table block.
    pub fn paragraph_mut(&mut self, block_index: usize) -> &mut ParagraphNode {
        match &mut self.blocks[block_index] {
            BlockNode::Paragraph(p) => p,
            BlockNode::Table(_) => unreachable!("RunIndex positions never resolve to a table block"),
        }
    }

    pub fn paragraph(&self, block_index: usize) -> &ParagraphNode {
        match &self.blocks[block_index] {
            BlockNode::Paragraph(p) => p,
            BlockNode::Table(_) => unreachable!("RunIndex positions never resolve to a table block"),
        }
    }

    /// One past the largest revision id (`w:id` on any `w:ins`/`w:del`/
    /// `w:moveFrom`/`w:moveTo`) already present, the Splicer's seed.
    pub fn next_revision_id(&self) -> u32 {
        use crate::model::Inline;
        let mut max_id = 0u32;
        for block in &self.blocks {
            if let BlockNode::Paragraph(p) = block {
                for child in &p.model.children {
                    let id = match child {
                        Inline::DeletedRun(t)
                        | Inline::InsertedRun(t)
                        | Inline::MoveFromRun(t)
                        | Inline::MoveToRun(t) => Some(t.id),
                        _ => None,
                    };
                    if let Some(id) = id {
                        max_id = max_id.max(id);
                    }
                }
            }
        }
        max_id + 1
    }
}
