//! Formatting diff: per-word comparison of bold/italic/underline/font/size/
//! color, keyed by a word's first occurrence in each paragraph.

use crate::extract::RunRecord;
use crate::model::RunProperties;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FormattingChange {
    pub word: String,
    pub attribute: String,
    pub old: String,
    pub new: String,
}

pub fn diff_formatting(old_runs: &[RunRecord], new_runs: &[RunRecord]) -> Vec<FormattingChange> {
    let old_map = word_properties(old_runs);
    let new_map = word_properties(new_runs);
    let mut changes = Vec::new();

    let mut words: Vec<&String> = old_map.keys().filter(|w| new_map.contains_key(*w)).collect();
    words.sort();

    for word in words {
        let old_props = &old_map[word];
        let new_props = &new_map[word];
        compare(word, "bold", old_props.bold.is_on(), new_props.bold.is_on(), &mut changes);
        compare(word, "italic", old_props.italic.is_on(), new_props.italic.is_on(), &mut changes);
        compare(word, "underline", old_props.underline.is_on(), new_props.underline.is_on(), &mut changes);
        compare_opt(word, "font", old_props.effective_font(), new_props.effective_font(), &mut changes);
        compare_opt(word, "size", old_props.font_size_half_points.as_deref(), new_props.font_size_half_points.as_deref(), &mut changes);
        compare_opt(word, "color", old_props.color.as_deref(), new_props.color.as_deref(), &mut changes);
    }
    changes
}

fn compare(word: &str, attribute: &str, old: bool, new: bool, out: &mut Vec<FormattingChange>) {
    if old != new {
        out.push(FormattingChange {
            word: word.to_string(),
            attribute: attribute.to_string(),
            old: old.to_string(),
            new: new.to_string(),
        });
    }
}

fn compare_opt(word: &str, attribute: &str, old: Option<&str>, new: Option<&str>, out: &mut Vec<FormattingChange>) {
    if old != new {
        out.push(FormattingChange {
            word: word.to_string(),
            attribute: attribute.to_string(),
            old: old.unwrap_or("").to_string(),
            new: new.unwrap_or("").to_string(),
        });
    }
}

/// First whitespace token of each run's text, mapped to that run's
/// properties; first occurrence wins when a word repeats.
fn word_properties(runs: &[RunRecord]) -> HashMap<String, RunProperties> {
    let mut map = HashMap::new();
    for run in runs {
        if let Some(word) = run.text.split_whitespace().next() {
            map.entry(word.to_string()).or_insert_with(|| run.properties.clone());
        }
    }
    map
}
