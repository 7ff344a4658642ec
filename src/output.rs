//! JSON output shapes for `--read`, `--diff`, and edit-mode processing
//! results.

use crate::diff::DocumentDiff;
use crate::docx::EditOutcome;
use crate::extract::ExtractedDocument;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct ReadOutput {
    pub file: String,
    pub paragraphs: Vec<ReadParagraph>,
    pub comments: Vec<ReadComment>,
    pub metadata: ReadMetadata,
    pub summary: ReadSummary,
}

#[derive(Debug, Serialize)]
pub struct ReadParagraph {
    pub index: usize,
    pub style: Option<String>,
    pub text: String,
    pub tracked_changes: Vec<ReadTrackedChange>,
}

#[derive(Debug, Serialize)]
pub struct ReadTrackedChange {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    pub author: String,
    pub date: String,
    pub id: u32,
}

#[derive(Debug, Serialize)]
pub struct ReadComment {
    pub id: String,
    pub author: String,
    pub date: String,
    pub anchor_text: String,
    pub text: String,
    pub paragraph_index: usize,
}

#[derive(Debug, Serialize, Default)]
pub struct ReadMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub last_modified_by: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub revision: Option<u32>,
    pub word_count: usize,
    pub paragraph_count: usize,
}

#[derive(Debug, Serialize, Default)]
pub struct ReadSummary {
    pub total_tracked_changes: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub total_comments: usize,
    pub change_authors: Vec<String>,
    pub comment_authors: Vec<String>,
}

pub fn build_read_output(file: &str, extracted: &ExtractedDocument) -> ReadOutput {
    let paragraphs = extracted
        .paragraphs
        .iter()
        .map(|p| ReadParagraph {
            index: p.index,
            style: p.style.clone(),
            text: p.text.clone(),
            tracked_changes: p
                .tracked_changes
                .iter()
                .map(|tc| ReadTrackedChange {
                    kind: tc.kind.as_str(),
                    text: tc.text.clone(),
                    author: tc.author.clone(),
                    date: tc.date.clone(),
                    id: tc.id,
                })
                .collect(),
        })
        .collect();

    let comments = extracted
        .comments
        .iter()
        .map(|c| ReadComment {
            id: c.id.clone(),
            author: c.author.clone(),
            date: c.date.clone(),
            anchor_text: c.anchor_text.clone(),
            text: c.text.clone(),
            paragraph_index: c.paragraph_index,
        })
        .collect();

    let mut insertions = 0usize;
    let mut deletions = 0usize;
    let mut change_authors: BTreeSet<String> = BTreeSet::new();
    for p in &extracted.paragraphs {
        for tc in &p.tracked_changes {
            match tc.kind {
                crate::extract::TrackedChangeKind::Insert => insertions += 1,
                crate::extract::TrackedChangeKind::Delete => deletions += 1,
            }
            change_authors.insert(tc.author.clone());
        }
    }
    let comment_authors: BTreeSet<String> = extracted.comments.iter().map(|c| c.author.clone()).collect();

    let summary = ReadSummary {
        total_tracked_changes: insertions + deletions,
        insertions,
        deletions,
        total_comments: extracted.comments.len(),
        change_authors: change_authors.into_iter().collect(),
        comment_authors: comment_authors.into_iter().collect(),
    };

    let metadata = ReadMetadata {
        title: extracted.metadata.title.clone(),
        author: extracted.metadata.author.clone(),
        last_modified_by: extracted.metadata.last_modified_by.clone(),
        created: extracted.metadata.created.clone(),
        modified: extracted.metadata.modified.clone(),
        revision: extracted.metadata.revision,
        word_count: extracted.metadata.word_count,
        paragraph_count: extracted.metadata.paragraph_count,
    };

    ReadOutput { file: file.to_string(), paragraphs, comments, metadata, summary }
}

#[derive(Debug, Serialize)]
pub struct DiffOutput {
    pub old_file: String,
    pub new_file: String,
    pub metadata: DiffMetadataSection,
    pub paragraphs: DiffParagraphSection,
    pub comments: DiffCommentSection,
    pub tracked_changes: DiffTrackedChangeSection,
    pub summary: DiffSummaryOutput,
}

#[derive(Debug, Serialize)]
pub struct DiffMetadataSection {
    pub changes: Vec<MetadataChangeOutput>,
}

#[derive(Debug, Serialize)]
pub struct MetadataChangeOutput {
    pub field: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Serialize)]
pub struct DiffParagraphSection {
    pub added: Vec<ParagraphAddedOutput>,
    pub deleted: Vec<ParagraphDeletedOutput>,
    pub modified: Vec<ParagraphModifiedOutput>,
}

#[derive(Debug, Serialize)]
pub struct ParagraphAddedOutput {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParagraphDeletedOutput {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParagraphModifiedOutput {
    pub old_index: usize,
    pub new_index: usize,
    pub old_text: String,
    pub new_text: String,
    pub style_change: Option<StyleChangeOutput>,
    pub formatting_changes: Vec<FormattingChangeOutput>,
    pub word_changes: Vec<WordChangeOutput>,
}

#[derive(Debug, Serialize)]
pub struct StyleChangeOutput {
    pub old: Option<String>,
    pub new: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormattingChangeOutput {
    pub word: String,
    pub attribute: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Serialize)]
pub struct WordChangeOutput {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub old: Option<String>,
    pub new: Option<String>,
    pub position: usize,
}

#[derive(Debug, Serialize)]
pub struct DiffCommentSection {
    pub added: Vec<CommentAddedOutput>,
    pub deleted: Vec<CommentDeletedOutput>,
    pub modified: Vec<CommentModifiedOutput>,
}

#[derive(Debug, Serialize)]
pub struct CommentAddedOutput {
    pub author: String,
    pub anchor_text: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentDeletedOutput {
    pub author: String,
    pub anchor_text: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentModifiedOutput {
    pub author: String,
    pub anchor_text: String,
    pub old_text: String,
    pub new_text: String,
}

#[derive(Debug, Serialize)]
pub struct DiffTrackedChangeSection {
    pub added: Vec<TrackedChangeOutput>,
    pub deleted: Vec<TrackedChangeOutput>,
}

#[derive(Debug, Serialize)]
pub struct TrackedChangeOutput {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct DiffSummaryOutput {
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

pub fn build_diff_output(old_file: &str, new_file: &str, d: &DocumentDiff) -> DiffOutput {
    DiffOutput {
        old_file: old_file.to_string(),
        new_file: new_file.to_string(),
        metadata: DiffMetadataSection {
            changes: d
                .metadata_changes
                .iter()
                .map(|c| MetadataChangeOutput { field: c.field.clone(), old: c.old.clone(), new: c.new.clone() })
                .collect(),
        },
        paragraphs: DiffParagraphSection {
            added: d.paragraphs.added.iter().map(|a| ParagraphAddedOutput { index: a.index, text: a.text.clone() }).collect(),
            deleted: d.paragraphs.deleted.iter().map(|a| ParagraphDeletedOutput { index: a.index, text: a.text.clone() }).collect(),
            modified: d
                .paragraphs
                .modified
                .iter()
                .map(|m| ParagraphModifiedOutput {
                    old_index: m.old_index,
                    new_index: m.new_index,
                    old_text: m.old_text.clone(),
                    new_text: m.new_text.clone(),
                    style_change: m.style_change.clone().map(|(o, n)| StyleChangeOutput { old: o, new: n }),
                    formatting_changes: m
                        .formatting_changes
                        .iter()
                        .map(|f| FormattingChangeOutput {
                            word: f.word.clone(),
                            attribute: f.attribute.clone(),
                            old: f.old.clone(),
                            new: f.new.clone(),
                        })
                        .collect(),
                    word_changes: m
                        .word_changes
                        .iter()
                        .map(|w| WordChangeOutput {
                            kind: w.kind.as_str(),
                            old: w.old.clone(),
                            new: w.new.clone(),
                            position: w.position,
                        })
                        .collect(),
                })
                .collect(),
        },
        comments: DiffCommentSection {
            added: d
                .comments
                .added
                .iter()
                .map(|c| CommentAddedOutput { author: c.author.clone(), anchor_text: c.anchor_text.clone(), text: c.text.clone() })
                .collect(),
            deleted: d
                .comments
                .deleted
                .iter()
                .map(|c| CommentDeletedOutput { author: c.author.clone(), anchor_text: c.anchor_text.clone(), text: c.text.clone() })
                .collect(),
            modified: d
                .comments
                .modified
                .iter()
                .map(|c| CommentModifiedOutput {
                    author: c.author.clone(),
                    anchor_text: c.anchor_text.clone(),
                    old_text: c.old_text.clone(),
                    new_text: c.new_text.clone(),
                })
                .collect(),
        },
        tracked_changes: DiffTrackedChangeSection {
            added: d.tracked_changes.added.iter().map(|e| TrackedChangeOutput { kind: e.kind, text: e.text.clone(), author: e.author.clone() }).collect(),
            deleted: d.tracked_changes.deleted.iter().map(|e| TrackedChangeOutput { kind: e.kind, text: e.text.clone(), author: e.author.clone() }).collect(),
        },
        summary: DiffSummaryOutput {
            metadata_changes: d.summary.metadata_changes,
            paragraphs_added: d.summary.paragraphs_added,
            paragraphs_deleted: d.summary.paragraphs_deleted,
            paragraphs_modified: d.summary.paragraphs_modified,
            comments_added: d.summary.comments_added,
            comments_deleted: d.summary.comments_deleted,
            comments_modified: d.summary.comments_modified,
            tracked_changes_added: d.summary.tracked_changes_added,
            tracked_changes_deleted: d.summary.tracked_changes_deleted,
            identical: d.summary.identical,
        },
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessingResult {
    pub input: String,
    pub output: String,
    pub author: String,
    pub changes_attempted: usize,
    pub changes_succeeded: usize,
    pub comments_attempted: usize,
    pub comments_succeeded: usize,
    pub results: Vec<EntryResultOutput>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct EntryResultOutput {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub success: bool,
    pub message: String,
}

pub fn build_processing_result(input: &str, output: &str, author: &str, outcome: &EditOutcome) -> ProcessingResult {
    let mut results: Vec<EntryResultOutput> = outcome
        .comment_results
        .iter()
        .chain(outcome.change_results.iter())
        .map(|r| EntryResultOutput { index: r.index, kind: r.kind.clone(), success: r.success, message: r.message.clone() })
        .collect();
    results.sort_by_key(|r| (r.kind != "comment", r.index));

    ProcessingResult {
        input: input.to_string(),
        output: output.to_string(),
        author: author.to_string(),
        changes_attempted: outcome.changes_attempted(),
        changes_succeeded: outcome.changes_succeeded(),
        comments_attempted: outcome.comments_attempted(),
        comments_succeeded: outcome.comments_succeeded(),
        results,
        success: outcome.all_succeeded(),
    }
}
