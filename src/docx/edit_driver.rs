//! EditDriver: orchestrates a manifest in two phases, comments then changes.

use super::comment_writer::CommentWriter;
use super::match_engine::find;
use super::run_index::RunIndex;
use super::splicer::Splicer;
use super::tree::DocumentXml;
use crate::error::{DocxError, Result};
use crate::manifest::{ChangeEntry, Manifest};
use crate::model::Comment;

/// Result of one manifest entry: index within its kind, the kind name,
/// success, and a human message.
#[derive(Debug, Clone)]
pub struct EditResult {
    pub index: usize,
    pub kind: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EditOutcome {
    pub comment_results: Vec<EditResult>,
    pub change_results: Vec<EditResult>,
    pub comments_created: Vec<Comment>,
}

impl EditOutcome {
    pub fn comments_attempted(&self) -> usize {
        self.comment_results.len()
    }
    pub fn comments_succeeded(&self) -> usize {
        self.comment_results.iter().filter(|r| r.success).count()
    }
    pub fn changes_attempted(&self) -> usize {
        self.change_results.len()
    }
    pub fn changes_succeeded(&self) -> usize {
        self.change_results.iter().filter(|r| r.success).count()
    }
    pub fn all_succeeded(&self) -> bool {
        self.comment_results.iter().all(|r| r.success) && self.change_results.iter().all(|r| r.success)
    }
}

pub struct EditDriver {
    author: String,
    date: String,
    dry_run: bool,
}

impl EditDriver {
    pub fn new(author: String, date: String, dry_run: bool) -> Self {
        Self { author, date, dry_run }
    }

    /// Applies `manifest` to `doc`/`comments_xml`: comments first (so their
    /// anchors see pre-edit text), then changes, each phase rebuilding the
    /// RunIndex before every single entry so matches always see the effect
    /// of prior entries.
    pub fn apply(&self, doc: &mut DocumentXml, comments_xml: &mut Vec<u8>, manifest: &Manifest) -> EditOutcome {
        let mut splicer = Splicer::new(doc.next_revision_id());
        let mut comment_results = Vec::with_capacity(manifest.comments.len());
        let mut comments_created = Vec::new();

        for (i, entry) in manifest.comments.iter().enumerate() {
            let index = RunIndex::build(doc);
            let result = match find(&index, &entry.anchor) {
                None => Err(DocxError::NotFound(entry.anchor.clone())),
                Some(range) => {
                    if self.dry_run {
                        Ok(None)
                    } else {
                        CommentWriter::add(doc, comments_xml, &index, range, &entry.text, &self.author, &self.date)
                            .map(Some)
                    }
                }
            };
            let (success, message) = match result {
                Ok(Some(c)) => {
                    let msg = format!("comment added, anchored on {:?}", c.anchor_text);
                    comments_created.push(c);
                    (true, msg)
                }
                Ok(None) => (true, "dry run: comment would be added".to_string()),
                Err(e) => (false, e.to_string()),
            };
            comment_results.push(EditResult { index: i, kind: "comment".to_string(), success, message });
        }

        let mut change_results = Vec::with_capacity(manifest.changes.len());
        for (i, entry) in manifest.changes.iter().enumerate() {
            let index = RunIndex::build(doc);
            let kind = entry.kind();
            let outcome = self.apply_change(&mut splicer, doc, &index, entry);
            let message = match &outcome {
                Ok(()) if self.dry_run => format!("dry run: {kind} would apply"),
                Ok(()) => format!("{kind} applied"),
                Err(e) => e.to_string(),
            };
            change_results.push(EditResult {
                index: i,
                kind: kind.to_string(),
                success: outcome.is_ok(),
                message,
            });
        }

        EditOutcome { comment_results, change_results, comments_created }
    }

    fn apply_change(
        &self,
        splicer: &mut Splicer,
        doc: &mut DocumentXml,
        index: &RunIndex,
        entry: &ChangeEntry,
    ) -> Result<()> {
        match entry {
            ChangeEntry::Replace { find: needle, replace } => {
                let range = find(index, needle).ok_or_else(|| DocxError::NotFound(needle.clone()))?;
                if self.dry_run {
                    return Ok(());
                }
                splicer.replace(doc, index, range, replace, &self.author, &self.date)
            }
            ChangeEntry::Delete { find: needle } => {
                let range = find(index, needle).ok_or_else(|| DocxError::NotFound(needle.clone()))?;
                if self.dry_run {
                    return Ok(());
                }
                splicer.delete(doc, index, range, &self.author, &self.date)
            }
            ChangeEntry::InsertAfter { anchor, text } => {
                let range = find(index, anchor).ok_or_else(|| DocxError::NotFound(anchor.clone()))?;
                if self.dry_run {
                    return Ok(());
                }
                splicer.insert_after(doc, index, range, text, &self.author, &self.date)
            }
            ChangeEntry::InsertBefore { anchor, text } => {
                let range = find(index, anchor).ok_or_else(|| DocxError::NotFound(anchor.clone()))?;
                if self.dry_run {
                    return Ok(());
                }
                splicer.insert_before(doc, index, range, text, &self.author, &self.date)
            }
        }
    }
}
