//! Comment diff: matched by composite key author+anchor-text.

use crate::model::Comment;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CommentAdded {
    pub author: String,
    pub anchor_text: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CommentDeleted {
    pub author: String,
    pub anchor_text: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CommentModified {
    pub author: String,
    pub anchor_text: String,
    pub old_text: String,
    pub new_text: String,
}

pub struct CommentDiff {
    pub added: Vec<CommentAdded>,
    pub deleted: Vec<CommentDeleted>,
    pub modified: Vec<CommentModified>,
}

pub fn diff_comments(old: &[Comment], new: &[Comment]) -> CommentDiff {
    let old_map: HashMap<(&str, &str), &Comment> =
        old.iter().map(|c| ((c.author.as_str(), c.anchor_text.as_str()), c)).collect();
    let new_map: HashMap<(&str, &str), &Comment> =
        new.iter().map(|c| ((c.author.as_str(), c.anchor_text.as_str()), c)).collect();

    let mut added = Vec::new();
    let mut deleted = Vec::new();
    let mut modified = Vec::new();

    for (key, c) in &old_map {
        match new_map.get(key) {
            None => deleted.push(CommentDeleted {
                author: c.author.clone(),
                anchor_text: c.anchor_text.clone(),
                text: c.text.clone(),
            }),
            Some(nc) if nc.text != c.text => modified.push(CommentModified {
                author: c.author.clone(),
                anchor_text: c.anchor_text.clone(),
                old_text: c.text.clone(),
                new_text: nc.text.clone(),
            }),
            Some(_) => {}
        }
    }
    for (key, c) in &new_map {
        if !old_map.contains_key(key) {
            added.push(CommentAdded {
                author: c.author.clone(),
                anchor_text: c.anchor_text.clone(),
                text: c.text.clone(),
            });
        }
    }

    added.sort_by(|a, b| (a.author.as_str(), a.anchor_text.as_str()).cmp(&(b.author.as_str(), b.anchor_text.as_str())));
    deleted.sort_by(|a, b| (a.author.as_str(), a.anchor_text.as_str()).cmp(&(b.author.as_str(), b.anchor_text.as_str())));
    modified.sort_by(|a, b| (a.author.as_str(), a.anchor_text.as_str()).cmp(&(b.author.as_str(), b.anchor_text.as_str())));

    CommentDiff { added, deleted, modified }
}
