//! The JSON edit manifest. Parsed through `serde_json::Value` rather than a
//! derived `Deserialize` impl so field names can be matched
//! case-insensitively.

use crate::error::{DocxError, Result};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub author: Option<String>,
    pub changes: Vec<ChangeEntry>,
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug, Clone)]
pub enum ChangeEntry {
    Replace { find: String, replace: String },
    Delete { find: String },
    InsertAfter { anchor: String, text: String },
    InsertBefore { anchor: String, text: String },
}

impl ChangeEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEntry::Replace { .. } => "replace",
            ChangeEntry::Delete { .. } => "delete",
            ChangeEntry::InsertAfter { .. } => "insert_after",
            ChangeEntry::InsertBefore { .. } => "insert_before",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentEntry {
    pub anchor: String,
    pub text: String,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Result<Manifest> {
        let value: Value = serde_json::from_slice(bytes)?;
        let obj = value
            .as_object()
            .ok_or_else(|| DocxError::Other("manifest root must be a JSON object".to_string()))?;

        let author = get_str_ci(obj, "author");

        let mut changes = Vec::new();
        if let Some(arr) = get_ci(obj, "changes").and_then(Value::as_array) {
            for (i, entry) in arr.iter().enumerate() {
                changes.push(parse_change_entry(i, entry)?);
            }
        }

        let mut comments = Vec::new();
        if let Some(arr) = get_ci(obj, "comments").and_then(Value::as_array) {
            for (i, entry) in arr.iter().enumerate() {
                comments.push(parse_comment_entry(i, entry)?);
            }
        }

        Ok(Manifest { author, changes, comments })
    }
}

fn get_ci<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
}

fn get_str_ci(obj: &Map<String, Value>, key: &str) -> Option<String> {
    get_ci(obj, key).and_then(Value::as_str).map(str::to_string)
}

fn parse_change_entry(index: usize, entry: &Value) -> Result<ChangeEntry> {
    let obj = entry
        .as_object()
        .ok_or_else(|| DocxError::Other(format!("manifest change entry {index} must be an object")))?;
    let kind = get_str_ci(obj, "type")
        .ok_or_else(|| DocxError::ManifestMissingField { index, kind: "change".to_string(), field: "type".to_string() })?;

    let require = |name: &str| {
        get_str_ci(obj, name)
            .ok_or_else(|| DocxError::ManifestMissingField { index, kind: kind.clone(), field: name.to_string() })
    };

    match kind.to_ascii_lowercase().as_str() {
        "replace" => Ok(ChangeEntry::Replace { find: require("find")?, replace: require("replace")? }),
        "delete" => Ok(ChangeEntry::Delete { find: require("find")? }),
        "insert_after" => Ok(ChangeEntry::InsertAfter { anchor: require("anchor")?, text: require("text")? }),
        "insert_before" => Ok(ChangeEntry::InsertBefore { anchor: require("anchor")?, text: require("text")? }),
        other => Err(DocxError::ManifestUnknownKind { index, kind: other.to_string() }),
    }
}

fn parse_comment_entry(index: usize, entry: &Value) -> Result<CommentEntry> {
    let obj = entry
        .as_object()
        .ok_or_else(|| DocxError::Other(format!("manifest comment entry {index} must be an object")))?;
    let anchor = get_str_ci(obj, "anchor")
        .ok_or_else(|| DocxError::ManifestMissingField { index, kind: "comment".to_string(), field: "anchor".to_string() })?;
    let text = get_str_ci(obj, "text")
        .ok_or_else(|| DocxError::ManifestMissingField { index, kind: "comment".to_string(), field: "text".to_string() })?;
    Ok(CommentEntry { anchor, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive_fields() {
        let json = br#"{"Author":"Alice","Changes":[{"Type":"replace","Find":"a","Replace":"b"}]}"#;
        let m = Manifest::parse(json).unwrap();
        assert_eq!(m.author.as_deref(), Some("Alice"));
        assert!(matches!(&m.changes[0], ChangeEntry::Replace { find, replace } if find == "a" && replace == "b"));
    }

    #[test]
    fn missing_required_field_is_reported() {
        let json = br#"{"changes":[{"type":"replace","find":"a"}]}"#;
        let err = Manifest::parse(json).unwrap_err();
        assert!(err.to_string().contains("replace"));
    }

    #[test]
    fn unknown_kind_is_reported() {
        let json = br#"{"changes":[{"type":"rewrite"}]}"#;
        let err = Manifest::parse(json).unwrap_err();
        assert!(err.to_string().contains("rewrite"));
    }
}
