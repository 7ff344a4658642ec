//! Word-level diff: LCS over whitespace tokens, then a walk that collapses
//! adjacent delete/add pairs into replacements.

use super::lcs::lcs_pairs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordChangeKind {
    Delete,
    Add,
    Replace,
}

impl WordChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordChangeKind::Delete => "delete",
            WordChangeKind::Add => "add",
            WordChangeKind::Replace => "replace",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordChange {
    pub kind: WordChangeKind,
    pub old: Option<String>,
    pub new: Option<String>,
    /// Index in the stream the change is anchored on — the old-side index
    /// for delete/replace, the new-side index for a pure add.
    pub position: usize,
}

pub fn diff_words(old_text: &str, new_text: &str) -> Vec<WordChange> {
    let old_tokens: Vec<&str> = old_text.split_whitespace().collect();
    let new_tokens: Vec<&str> = new_text.split_whitespace().collect();
    let pairs = lcs_pairs(&old_tokens, &new_tokens, |a, b| a == b);

    let mut raw = Vec::new();
    let (mut oi, mut ni) = (0usize, 0usize);
    for (mo, mn) in pairs {
        while oi < mo {
            raw.push(WordChange { kind: WordChangeKind::Delete, old: Some(old_tokens[oi].to_string()), new: None, position: oi });
            oi += 1;
        }
        while ni < mn {
            raw.push(WordChange { kind: WordChangeKind::Add, old: None, new: Some(new_tokens[ni].to_string()), position: ni });
            ni += 1;
        }
        oi = mo + 1;
        ni = mn + 1;
    }
    while oi < old_tokens.len() {
        raw.push(WordChange { kind: WordChangeKind::Delete, old: Some(old_tokens[oi].to_string()), new: None, position: oi });
        oi += 1;
    }
    while ni < new_tokens.len() {
        raw.push(WordChange { kind: WordChangeKind::Add, old: None, new: Some(new_tokens[ni].to_string()), position: ni });
        ni += 1;
    }

    collapse(raw)
}

/// Merges any adjacent delete-then-add pair into a single replace entry,
/// keeping the delete's position.
fn collapse(raw: Vec<WordChange>) -> Vec<WordChange> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if i + 1 < raw.len()
            && raw[i].kind == WordChangeKind::Delete
            && raw[i + 1].kind == WordChangeKind::Add
        {
            out.push(WordChange {
                kind: WordChangeKind::Replace,
                old: raw[i].old.clone(),
                new: raw[i + 1].new.clone(),
                position: raw[i].position,
            });
            i += 2;
        } else {
            out.push(raw[i].clone());
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_replace_collapses() {
        let changes = diff_words("foo bar baz qux", "foo zar baz qux");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, WordChangeKind::Replace);
        assert_eq!(changes[0].old.as_deref(), Some("bar"));
        assert_eq!(changes[0].new.as_deref(), Some("zar"));
        assert_eq!(changes[0].position, 1);
    }

    #[test]
    fn identical_text_has_no_changes() {
        assert!(diff_words("a b c", "a b c").is_empty());
    }

    #[test]
    fn pure_addition_is_not_collapsed() {
        let changes = diff_words("a b", "a x b");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, WordChangeKind::Add);
        assert_eq!(changes[0].new.as_deref(), Some("x"));
    }
}
