//! Tracked-change diff: matched by composite key type+text+author over the
//! flattened list from every paragraph, as a set difference.

use crate::extract::{ParagraphRecord, TrackedChangeKind};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct TrackedChangeEntry {
    pub kind: &'static str,
    pub text: String,
    pub author: String,
}

pub struct TrackedChangeDiff {
    pub added: Vec<TrackedChangeEntry>,
    pub deleted: Vec<TrackedChangeEntry>,
}

pub fn diff_tracked_changes(old: &[ParagraphRecord], new: &[ParagraphRecord]) -> TrackedChangeDiff {
    let old_set = flatten(old);
    let new_set = flatten(new);

    let old_keys: HashSet<(&'static str, &str, &str)> =
        old_set.iter().map(|e| (e.kind, e.text.as_str(), e.author.as_str())).collect();
    let new_keys: HashSet<(&'static str, &str, &str)> =
        new_set.iter().map(|e| (e.kind, e.text.as_str(), e.author.as_str())).collect();

    let deleted = old_set
        .into_iter()
        .filter(|e| !new_keys.contains(&(e.kind, e.text.as_str(), e.author.as_str())))
        .collect();
    let added = new_set
        .into_iter()
        .filter(|e| !old_keys.contains(&(e.kind, e.text.as_str(), e.author.as_str())))
        .collect();

    TrackedChangeDiff { added, deleted }
}

fn flatten(paragraphs: &[ParagraphRecord]) -> Vec<TrackedChangeEntry> {
    paragraphs
        .iter()
        .flat_map(|p| p.tracked_changes.iter())
        .map(|tc| TrackedChangeEntry {
            kind: match tc.kind {
                TrackedChangeKind::Insert => "insert",
                TrackedChangeKind::Delete => "delete",
            },
            text: tc.text.clone(),
            author: tc.author.clone(),
        })
        .collect()
}
