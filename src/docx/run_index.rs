//! RunIndex: the flattened visible-text projection of the document body.
//! Built fresh before every match; never mutated in place.

use super::tree::{BlockNode, DocumentXml};
use std::ops::Range;

/// Where one byte of the visible stream came from: which block, which
/// inline child within that paragraph, and the byte offset within that
/// child's own visible text.
#[derive(Debug, Clone, Copy)]
pub struct CharSource {
    pub block_index: usize,
    pub child_index: usize,
    pub offset_in_child: usize,
}

/// A linearized, read-only view of the document's visible text, valid only
/// against the tree snapshot it was built from.
pub struct RunIndex {
    /// The concatenated visible text, as bytes — matching goes over bytes,
    /// not chars, so offsets are a stable ordinal coordinate.
    pub visible: Vec<u8>,
    pub entries: Vec<CharSource>,
    /// `(block_index, start, end)` for each paragraph, in document order.
    paragraph_bounds: Vec<(usize, usize, usize)>,
}

impl RunIndex {
    pub fn build(doc: &DocumentXml) -> RunIndex {
        let mut visible = Vec::new();
        let mut entries = Vec::new();
        let mut paragraph_bounds = Vec::new();

        for (block_index, block) in doc.blocks.iter().enumerate() {
            if let BlockNode::Paragraph(p) = block {
                let start = visible.len();
                for (child_index, child) in p.model.children.iter().enumerate() {
                    if let Some(text) = child.visible_text() {
                        for (offset, b) in text.as_bytes().iter().enumerate() {
                            visible.push(*b);
                            entries.push(CharSource { block_index, child_index, offset_in_child: offset });
                        }
                    }
                }
                let end = visible.len();
                paragraph_bounds.push((block_index, start, end));
            }
        }

        RunIndex { visible, entries, paragraph_bounds }
    }

    /// Resolves a match range to the single paragraph block that contains
    /// it wholly, and that paragraph's start offset in the visible stream.
    /// `None` if the range spans more than one paragraph.
    pub fn single_paragraph(&self, range: Range<usize>) -> Option<(usize, usize)> {
        self.paragraph_bounds
            .iter()
            .find(|&&(_, s, e)| range.start >= s && range.end <= e)
            .map(|&(b, s, _)| (b, s))
    }

    /// The 0-based position of `block_index` among paragraph blocks only
    /// (tables don't count), for read/diff output's `paragraph_index`.
    pub fn paragraph_seq_of_block(&self, block_index: usize) -> usize {
        self.paragraph_bounds
            .iter()
            .position(|&(b, _, _)| b == block_index)
            .unwrap_or(0)
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        String::from_utf8_lossy(&self.visible[range]).into_owned()
    }
}
