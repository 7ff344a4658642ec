//! Splicer: rewrites a paragraph's children so a position range becomes
//! wrapped in tracked-change markup, splitting boundary runs as needed.

use super::run_index::RunIndex;
use super::tree::DocumentXml;
use crate::error::{DocxError, Result};
use crate::model::{Inline, Run, RunProperties, TrackedRun};
use std::ops::Range;

/// Allocates fresh revision ids, seeded one past the largest id already in
/// the document. One instance lives for the duration of a single
/// `EditDriver::apply` call — never global state.
pub struct Splicer {
    next_id: u32,
}

impl Splicer {
    pub fn new(seed_next_id: u32) -> Self {
        Self { next_id: seed_next_id }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn replace(
        &mut self,
        doc: &mut DocumentXml,
        index: &RunIndex,
        range: Range<usize>,
        new_text: &str,
        author: &str,
        date: &str,
    ) -> Result<()> {
        if range.start >= range.end {
            return Err(DocxError::ZeroLengthRange("replace"));
        }
        let (block_index, para_start) =
            index.single_paragraph(range.clone()).ok_or(DocxError::SpansMultipleParagraphs)?;
        let local_range = (range.start - para_start)..(range.end - para_start);
        let para = doc.paragraph_mut(block_index);

        let (insertion_index, matched) = extract_range(&mut para.model.children, local_range);
        let del_runs: Vec<Run> = matched.iter().flat_map(tracked_runs_from_inline).collect();
        let first_props = del_runs.first().map(|r| r.properties.clone()).unwrap_or_default();

        let del_id = self.alloc_id();
        let ins_id = self.alloc_id();
        let del = Inline::DeletedRun(TrackedRun {
            author: author.to_string(),
            date: date.to_string(),
            id: del_id,
            runs: del_runs,
        });
        let ins = Inline::InsertedRun(TrackedRun {
            author: author.to_string(),
            date: date.to_string(),
            id: ins_id,
            runs: vec![Run { text: new_text.to_string(), properties: first_props }],
        });
        para.model.children.insert(insertion_index, ins);
        para.model.children.insert(insertion_index, del);
        para.dirty = true;
        Ok(())
    }

    pub fn delete(
        &mut self,
        doc: &mut DocumentXml,
        index: &RunIndex,
        range: Range<usize>,
        author: &str,
        date: &str,
    ) -> Result<()> {
        if range.start >= range.end {
            return Err(DocxError::ZeroLengthRange("delete"));
        }
        let (block_index, para_start) =
            index.single_paragraph(range.clone()).ok_or(DocxError::SpansMultipleParagraphs)?;
        let local_range = (range.start - para_start)..(range.end - para_start);
        let para = doc.paragraph_mut(block_index);

        let (insertion_index, matched) = extract_range(&mut para.model.children, local_range);
        let del_runs: Vec<Run> = matched.iter().flat_map(tracked_runs_from_inline).collect();
        let id = self.alloc_id();
        para.model.children.insert(
            insertion_index,
            Inline::DeletedRun(TrackedRun { author: author.to_string(), date: date.to_string(), id, runs: del_runs }),
        );
        para.dirty = true;
        Ok(())
    }

    pub fn insert_after(
        &mut self,
        doc: &mut DocumentXml,
        index: &RunIndex,
        anchor_range: Range<usize>,
        new_text: &str,
        author: &str,
        date: &str,
    ) -> Result<()> {
        let (block_index, para_start) =
            index.single_paragraph(anchor_range.clone()).ok_or(DocxError::SpansMultipleParagraphs)?;
        let local_anchor = (anchor_range.start - para_start)..(anchor_range.end - para_start);
        let para = doc.paragraph_mut(block_index);

        let props = runs_in_range(&para.model.children, local_anchor.clone())
            .last()
            .map(|r| r.properties.clone())
            .unwrap_or_default();
        let pos = local_anchor.end;
        let (insertion_index, _) = extract_range(&mut para.model.children, pos..pos);
        let id = self.alloc_id();
        para.model.children.insert(
            insertion_index,
            Inline::InsertedRun(TrackedRun {
                author: author.to_string(),
                date: date.to_string(),
                id,
                runs: vec![Run { text: new_text.to_string(), properties: props }],
            }),
        );
        para.dirty = true;
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        doc: &mut DocumentXml,
        index: &RunIndex,
        anchor_range: Range<usize>,
        new_text: &str,
        author: &str,
        date: &str,
    ) -> Result<()> {
        let (block_index, para_start) =
            index.single_paragraph(anchor_range.clone()).ok_or(DocxError::SpansMultipleParagraphs)?;
        let local_anchor = (anchor_range.start - para_start)..(anchor_range.end - para_start);
        let para = doc.paragraph_mut(block_index);

        let props = runs_in_range(&para.model.children, local_anchor.clone())
            .first()
            .map(|r| r.properties.clone())
            .unwrap_or_default();
        let pos = local_anchor.start;
        let (insertion_index, _) = extract_range(&mut para.model.children, pos..pos);
        let id = self.alloc_id();
        para.model.children.insert(
            insertion_index,
            Inline::InsertedRun(TrackedRun {
                author: author.to_string(),
                date: date.to_string(),
                id,
                runs: vec![Run { text: new_text.to_string(), properties: props }],
            }),
        );
        para.dirty = true;
        Ok(())
    }
}

fn tracked_runs_from_inline(c: &Inline) -> Vec<Run> {
    match c {
        Inline::Run(r) => vec![r.clone()],
        Inline::InsertedRun(t) | Inline::MoveToRun(t) | Inline::DeletedRun(t) | Inline::MoveFromRun(t) => {
            t.runs.clone()
        }
        Inline::Other(_)
        | Inline::CommentRangeStart { .. }
        | Inline::CommentRangeEnd { .. }
        | Inline::CommentReference { .. } => vec![],
    }
}

/// Splits `child`'s text at byte offset `at`, cloning its formatting (and,
/// for tracked runs, author/date/id) onto both halves.
fn split_inline(child: &Inline, at: usize) -> (Inline, Inline) {
    match child {
        Inline::Run(r) => {
            let (a, b) = r.text.split_at(at);
            (
                Inline::Run(Run { text: a.to_string(), properties: r.properties.clone() }),
                Inline::Run(Run { text: b.to_string(), properties: r.properties.clone() }),
            )
        }
        Inline::InsertedRun(t) => {
            let (a, b) = split_tracked(t, at);
            (Inline::InsertedRun(a), Inline::InsertedRun(b))
        }
        Inline::MoveToRun(t) => {
            let (a, b) = split_tracked(t, at);
            (Inline::MoveToRun(a), Inline::MoveToRun(b))
        }
        other => (other.clone(), other.clone()),
    }
}

fn split_tracked(t: &TrackedRun, at: usize) -> (TrackedRun, TrackedRun) {
    let mut remaining = at;
    let mut a_runs = Vec::new();
    let mut b_runs = Vec::new();
    for r in &t.runs {
        if remaining >= r.text.len() {
            a_runs.push(r.clone());
            remaining -= r.text.len();
        } else if remaining == 0 {
            b_runs.push(r.clone());
        } else {
            let (x, y) = r.text.split_at(remaining);
            a_runs.push(Run { text: x.to_string(), properties: r.properties.clone() });
            b_runs.push(Run { text: y.to_string(), properties: r.properties.clone() });
            remaining = 0;
        }
    }
    (
        TrackedRun { author: t.author.clone(), date: t.date.clone(), id: t.id, runs: a_runs },
        TrackedRun { author: t.author.clone(), date: t.date.clone(), id: t.id, runs: b_runs },
    )
}

/// Walks `children` once, splitting at most the two children that straddle
/// `local_range`'s boundaries, and removes the (now whole-child) spanned
/// range from `children` in place. Returns the index at which the removed
/// content sat (so the caller can insert replacement markup there) and the
/// extracted children themselves.
///
/// A zero-length range is valid: it still performs any boundary split
/// needed (for a caret that falls mid-run) but extracts nothing, which is
/// exactly the caret-position behavior `insert_before`/`insert_after` need.
fn extract_range(children: &mut Vec<Inline>, local_range: Range<usize>) -> (usize, Vec<Inline>) {
    let mut before = Vec::new();
    let mut matched = Vec::new();
    let mut after = Vec::new();
    let mut acc = 0usize;
    let mut entered_range = false;
    let mut left_range = false;

    for child in children.drain(..) {
        match child.visible_text() {
            None => {
                if !entered_range {
                    before.push(child);
                } else if !left_range {
                    matched.push(child);
                } else {
                    after.push(child);
                }
            }
            Some(text) => {
                let len = text.len();
                let child_start = acc;
                let child_end = acc + len;
                acc = child_end;

                if child_end <= local_range.start {
                    before.push(child);
                } else if child_start >= local_range.end {
                    after.push(child);
                    left_range = true;
                } else {
                    entered_range = true;
                    let split_start = local_range.start.saturating_sub(child_start);
                    let split_end = local_range.end.min(child_end) - child_start;
                    if split_start == 0 && split_end == len {
                        matched.push(child);
                    } else if split_start == 0 {
                        let (m, suf) = split_inline(&child, split_end);
                        matched.push(m);
                        after.push(suf);
                    } else if split_end == len {
                        let (pre, m) = split_inline(&child, split_start);
                        before.push(pre);
                        matched.push(m);
                    } else {
                        let (pre, rest) = split_inline(&child, split_start);
                        let (m, suf) = split_inline(&rest, split_end - split_start);
                        before.push(pre);
                        matched.push(m);
                        after.push(suf);
                    }
                    // A child reaches the end of the matched range exactly
                    // when its text extends at or past `local_range.end`;
                    // everything zero-width that follows (markers, bookmarks)
                    // belongs after the match, not inside it.
                    left_range = child_end >= local_range.end;
                }
            }
        }
    }

    let insertion_index = before.len();
    *children = before;
    children.extend(after);
    (insertion_index, matched)
}

/// Splits at a single caret position without removing any content — the
/// primitive CommentWriter reuses to place zero-width range markers exactly
/// at a (possibly mid-run) byte offset.
pub(crate) fn extract_caret(children: &mut Vec<Inline>, pos: usize) -> (usize, Vec<Inline>) {
    extract_range(children, pos..pos)
}

/// Collects the runs (converted to plain `Run`s) whose visible text
/// overlaps `local_range`, for cloning formatting onto a new insertion.
fn runs_in_range(children: &[Inline], local_range: Range<usize>) -> Vec<Run> {
    let mut acc = 0usize;
    let mut out = Vec::new();
    for child in children {
        if let Some(text) = child.visible_text() {
            let len = text.len();
            let child_start = acc;
            let child_end = acc + len;
            acc = child_end;
            if !(child_end <= local_range.start || child_start >= local_range.end) {
                out.extend(tracked_runs_from_inline(child));
            }
        }
    }
    out
}
