//! Metadata diff: field-wise comparison of `PackageMetadata`.

use crate::model::PackageMetadata;

#[derive(Debug, Clone)]
pub struct MetadataChange {
    pub field: String,
    pub old: String,
    pub new: String,
}

pub fn diff_metadata(old: &PackageMetadata, new: &PackageMetadata) -> Vec<MetadataChange> {
    let mut changes = Vec::new();
    push_opt(&mut changes, "title", &old.title, &new.title);
    push_opt(&mut changes, "author", &old.author, &new.author);
    push_opt(&mut changes, "last_modified_by", &old.last_modified_by, &new.last_modified_by);
    push_opt(&mut changes, "created", &old.created, &new.created);
    push_opt(&mut changes, "modified", &old.modified, &new.modified);
    push_u32_opt(&mut changes, "revision", old.revision, new.revision);
    push_usize(&mut changes, "word_count", old.word_count, new.word_count);
    changes
}

fn push_opt(out: &mut Vec<MetadataChange>, field: &str, old: &Option<String>, new: &Option<String>) {
    if old != new {
        out.push(MetadataChange {
            field: field.to_string(),
            old: old.clone().unwrap_or_default(),
            new: new.clone().unwrap_or_default(),
        });
    }
}

fn push_u32_opt(out: &mut Vec<MetadataChange>, field: &str, old: Option<u32>, new: Option<u32>) {
    if old != new {
        out.push(MetadataChange {
            field: field.to_string(),
            old: old.map(|v| v.to_string()).unwrap_or_default(),
            new: new.map(|v| v.to_string()).unwrap_or_default(),
        });
    }
}

fn push_usize(out: &mut Vec<MetadataChange>, field: &str, old: usize, new: usize) {
    if old != new {
        out.push(MetadataChange { field: field.to_string(), old: old.to_string(), new: new.to_string() });
    }
}
