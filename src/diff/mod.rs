//! Differ: metadata/paragraph/comment/tracked-change diffs over a pair of
//! already-extracted documents.

mod comments;
mod formatting_diff;
mod lcs;
mod metadata_diff;
mod paragraphs;
mod tracked_changes;
mod word_diff;

pub use comments::{CommentAdded, CommentDeleted, CommentDiff, CommentModified};
pub use formatting_diff::FormattingChange;
pub use metadata_diff::MetadataChange;
pub use paragraphs::{ParagraphAdded, ParagraphDeleted, ParagraphDiff, ParagraphModification};
pub use tracked_changes::{TrackedChangeDiff, TrackedChangeEntry};
pub use word_diff::{WordChange, WordChangeKind};

use crate::extract::ExtractedDocument;

#[derive(Debug, Clone, Default)]
pub struct DiffSummary {
    pub metadata_changes: usize,
    pub paragraphs_added: usize,
    pub paragraphs_deleted: usize,
    pub paragraphs_modified: usize,
    pub comments_added: usize,
    pub comments_deleted: usize,
    pub comments_modified: usize,
    pub tracked_changes_added: usize,
    pub tracked_changes_deleted: usize,
    pub identical: bool,
}

pub struct DocumentDiff {
    pub metadata_changes: Vec<MetadataChange>,
    pub paragraphs: ParagraphDiff,
    pub comments: CommentDiff,
    pub tracked_changes: TrackedChangeDiff,
    pub summary: DiffSummary,
}

pub fn diff(old: &ExtractedDocument, new: &ExtractedDocument) -> DocumentDiff {
    let metadata_changes = metadata_diff::diff_metadata(&old.metadata, &new.metadata);
    let paragraphs = paragraphs::diff_paragraphs(&old.paragraphs, &new.paragraphs);
    let comments = comments::diff_comments(&old.comments, &new.comments);
    let tracked_changes = tracked_changes::diff_tracked_changes(&old.paragraphs, &new.paragraphs);

    let summary = DiffSummary {
        metadata_changes: metadata_changes.len(),
        paragraphs_added: paragraphs.added.len(),
        paragraphs_deleted: paragraphs.deleted.len(),
        paragraphs_modified: paragraphs.modified.len(),
        comments_added: comments.added.len(),
        comments_deleted: comments.deleted.len(),
        comments_modified: comments.modified.len(),
        tracked_changes_added: tracked_changes.added.len(),
        tracked_changes_deleted: tracked_changes.deleted.len(),
        identical: metadata_changes.is_empty()
            && paragraphs.added.is_empty()
            && paragraphs.deleted.is_empty()
            && paragraphs.modified.is_empty()
            && comments.added.is_empty()
            && comments.deleted.is_empty()
            && comments.modified.is_empty()
            && tracked_changes.added.is_empty()
            && tracked_changes.deleted.is_empty(),
    };

    DocumentDiff { metadata_changes, paragraphs, comments, tracked_changes, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::docx::parse_document;
    use crate::opc::PartStore;

    fn store_with_paragraph(text: &str) -> (PartStore, Vec<u8>) {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut buf = Vec::new();
        {
            let cursor = std::io::Cursor::new(&mut buf);
            let mut w = zip::ZipWriter::new(cursor);
            let opts = SimpleFileOptions::default();
            w.start_file("[Content_Types].xml", opts).unwrap();
            w.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#).unwrap();
            w.start_file("_rels/.rels", opts).unwrap();
            w.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#).unwrap();
            let doc = format!(
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>"#
            );
            w.start_file("word/document.xml", opts).unwrap();
            w.write_all(doc.as_bytes()).unwrap();
            w.finish().unwrap();
        }
        let store = PartStore::from_bytes(&buf).unwrap();
        let bytes = store.main_document().to_vec();
        (store, bytes)
    }

    fn extract_from_text(text: &str) -> ExtractedDocument {
        let (store, bytes) = store_with_paragraph(text);
        let doc = parse_document(&bytes).unwrap();
        extract(&doc, &store)
    }

    #[test]
    fn identical_documents_diff_to_identical_true() {
        let a = extract_from_text("The quick fox");
        let b = extract_from_text("The quick fox");
        let d = diff(&a, &b);
        assert!(d.summary.identical);
    }

    #[test]
    fn single_paragraph_word_change_is_modification() {
        let a = extract_from_text("foo bar baz qux");
        let b = extract_from_text("foo zar baz qux");
        let d = diff(&a, &b);
        assert!(!d.summary.identical);
        assert_eq!(d.paragraphs.modified.len(), 1);
        let changes = &d.paragraphs.modified[0].word_changes;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, WordChangeKind::Replace);
    }
}
