//! Paragraph alignment and per-pair modification detection.

use super::formatting_diff::{diff_formatting, FormattingChange};
use super::lcs::lcs_pairs;
use super::word_diff::{diff_words, WordChange};
use crate::extract::ParagraphRecord;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ParagraphAdded {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ParagraphDeleted {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ParagraphModification {
    pub old_index: usize,
    pub new_index: usize,
    pub old_text: String,
    pub new_text: String,
    pub style_change: Option<(Option<String>, Option<String>)>,
    pub formatting_changes: Vec<FormattingChange>,
    pub word_changes: Vec<WordChange>,
}

pub struct ParagraphDiff {
    pub added: Vec<ParagraphAdded>,
    pub deleted: Vec<ParagraphDeleted>,
    pub modified: Vec<ParagraphModification>,
}

/// Two paragraphs are similar iff their visible texts are equal, both are
/// whitespace-only, or their whitespace-token sets have Jaccard similarity
/// >= 0.5.
fn similar(a: &ParagraphRecord, b: &ParagraphRecord) -> bool {
    if a.text == b.text {
        return true;
    }
    if a.text.trim().is_empty() && b.text.trim().is_empty() {
        return true;
    }
    jaccard(&a.text, &b.text) >= 0.5
}

fn jaccard(a: &str, b: &str) -> f64 {
    let sa: HashSet<&str> = a.split_whitespace().collect();
    let sb: HashSet<&str> = b.split_whitespace().collect();
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }
    let intersection = sa.intersection(&sb).count();
    let union = sa.union(&sb).count();
    intersection as f64 / union as f64
}

pub fn diff_paragraphs(old: &[ParagraphRecord], new: &[ParagraphRecord]) -> ParagraphDiff {
    let pairs = lcs_pairs(old, new, similar);
    let matched_old: HashSet<usize> = pairs.iter().map(|(i, _)| *i).collect();
    let matched_new: HashSet<usize> = pairs.iter().map(|(_, j)| *j).collect();

    let deleted = old
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_old.contains(i))
        .map(|(i, p)| ParagraphDeleted { index: i, text: p.text.clone() })
        .collect();

    let added = new
        .iter()
        .enumerate()
        .filter(|(j, _)| !matched_new.contains(j))
        .map(|(j, p)| ParagraphAdded { index: j, text: p.text.clone() })
        .collect();

    let mut modified = Vec::new();
    for (i, j) in pairs {
        let op = &old[i];
        let np = &new[j];
        let style_changed = op.style != np.style;
        let text_changed = op.text != np.text;
        let formatting_changes = diff_formatting(&op.runs, &np.runs);
        if !text_changed && !style_changed && formatting_changes.is_empty() {
            continue;
        }
        let word_changes = if text_changed { diff_words(&op.text, &np.text) } else { Vec::new() };
        modified.push(ParagraphModification {
            old_index: i,
            new_index: j,
            old_text: op.text.clone(),
            new_text: np.text.clone(),
            style_change: style_changed.then(|| (op.style.clone(), np.style.clone())),
            formatting_changes,
            word_changes,
        });
    }

    ParagraphDiff { added, deleted, modified }
}
