//! Extractor: the read-only inverse of the edit path. Walks a parsed
//! [`DocumentXml`] once into a neutral read model that the CLI's `--read`
//! mode, the Differ, and TextConv all share.

mod headers_footers;
mod images;
mod metadata;

pub use headers_footers::{extract_headers_footers, HeaderFooterKind, HeaderFooterRecord};
pub use images::extract_images;
pub use metadata::extract_metadata;

use crate::docx::tree::{BlockNode, DocumentXml};
use crate::model::{Comment, Image, Inline, PackageMetadata, RunProperties, Table, TrackedRun};
use crate::opc::PartStore;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// One extracted tracked change, flattened out of a paragraph's children.
#[derive(Debug, Clone)]
pub struct TrackedChangeRecord {
    pub kind: TrackedChangeKind,
    pub text: String,
    pub author: String,
    pub date: String,
    pub id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedChangeKind {
    Insert,
    Delete,
}

impl TrackedChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackedChangeKind::Insert => "insert",
            TrackedChangeKind::Delete => "delete",
        }
    }
}

/// A visible run's text and formatting, used for the differ's word-level
/// formatting comparison.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub text: String,
    pub properties: RunProperties,
}

/// One paragraph's extracted content.
#[derive(Debug, Clone)]
pub struct ParagraphRecord {
    pub index: usize,
    pub style: Option<String>,
    pub text: String,
    pub runs: Vec<RunRecord>,
    pub tracked_changes: Vec<TrackedChangeRecord>,
}

/// A table plus the index of the paragraph immediately preceding it, used to
/// anchor the `at ¶{paraIndex}` header TextConv prints.
#[derive(Debug, Clone)]
pub struct TableRecord {
    pub preceding_paragraph_index: usize,
    pub table: Table,
}

/// A fully extracted document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    pub paragraphs: Vec<ParagraphRecord>,
    pub tables: Vec<TableRecord>,
    pub comments: Vec<Comment>,
    pub images: Vec<Image>,
    pub headers_footers: Vec<HeaderFooterRecord>,
    pub metadata: PackageMetadata,
}

pub fn extract(doc: &DocumentXml, store: &PartStore) -> ExtractedDocument {
    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();
    let mut anchors: HashMap<String, (usize, String)> = HashMap::new();

    for block in &doc.blocks {
        match block {
            BlockNode::Paragraph(p) => {
                let idx = paragraphs.len();
                let mut text = String::new();
                let mut runs = Vec::new();
                let mut tracked_changes = Vec::new();
                collect_anchors(&p.model.children, idx, &mut anchors);
                for child in &p.model.children {
                    match child {
                        Inline::Run(r) => {
                            text.push_str(&r.text);
                            runs.push(RunRecord { text: r.text.clone(), properties: r.properties.clone() });
                        }
                        Inline::InsertedRun(t) => {
                            text.push_str(&t.text());
                            runs.extend(t.runs.iter().map(|r| RunRecord { text: r.text.clone(), properties: r.properties.clone() }));
                            tracked_changes.push(tracked_record(TrackedChangeKind::Insert, t));
                        }
                        Inline::MoveToRun(t) => {
                            text.push_str(&t.text());
                            runs.extend(t.runs.iter().map(|r| RunRecord { text: r.text.clone(), properties: r.properties.clone() }));
                            tracked_changes.push(tracked_record(TrackedChangeKind::Insert, t));
                        }
                        Inline::DeletedRun(t) => {
                            tracked_changes.push(tracked_record(TrackedChangeKind::Delete, t));
                        }
                        Inline::MoveFromRun(t) => {
                            tracked_changes.push(tracked_record(TrackedChangeKind::Delete, t));
                        }
                        _ => {}
                    }
                }
                paragraphs.push(ParagraphRecord { index: idx, style: p.model.style_id.clone(), text, runs, tracked_changes });
            }
            BlockNode::Table(t) => {
                tables.push(TableRecord { preceding_paragraph_index: paragraphs.len(), table: t.model.clone() })
            }
        }
    }

    let comments = extract_comments(store, &anchors);
    let images = extract_images(store);
    let headers_footers = extract_headers_footers(store, &doc.tail_raw);
    let metadata = extract_metadata(store, &paragraphs);

    ExtractedDocument { paragraphs, tables, comments, images, headers_footers, metadata }
}

fn tracked_record(kind: TrackedChangeKind, t: &TrackedRun) -> TrackedChangeRecord {
    TrackedChangeRecord { kind, text: t.text(), author: t.author.clone(), date: t.date.clone(), id: t.id }
}

/// Records, for each comment id, the paragraph it starts in and the visible
/// text between its start/end range markers.
fn collect_anchors(children: &[Inline], paragraph_index: usize, anchors: &mut HashMap<String, (usize, String)>) {
    let mut open: HashMap<String, (usize, String)> = HashMap::new();
    for child in children {
        match child {
            Inline::CommentRangeStart { id } => {
                open.insert(id.clone(), (paragraph_index, String::new()));
            }
            Inline::CommentRangeEnd { id } => {
                if let Some((para, text)) = open.remove(id) {
                    anchors.insert(id.clone(), (para, text));
                }
            }
            other => {
                if let Some(text) = other.visible_text() {
                    for (_, (_, acc)) in open.iter_mut() {
                        acc.push_str(&text);
                    }
                }
            }
        }
    }
}

fn extract_comments(store: &PartStore, anchors: &HashMap<String, (usize, String)>) -> Vec<Comment> {
    let Some(bytes) = store.comments() else { return Vec::new() };
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut comments = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"comment" => {
                let id = attr(&e, b"id").unwrap_or_default();
                let author = attr(&e, b"author").unwrap_or_default();
                let date = attr(&e, b"date").unwrap_or_default();
                let text = read_comment_body(&mut reader, &mut buf);
                let (paragraph_index, anchor_text) =
                    anchors.get(&id).cloned().unwrap_or((0, String::new()));
                comments.push(Comment { id, author, date, text, anchor_text, paragraph_index });
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    comments
}

fn attr(e: &quick_xml::events::BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Concatenates a `w:comment`'s paragraphs with newlines, skipping the
/// leading `w:annotationRef` marker run.
fn read_comment_body(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 1i32;
    loop {
        match reader.read_event_into(buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                if e.local_name().as_ref() == b"p" {
                    current = String::new();
                }
            }
            Ok(Event::Text(t)) => {
                if let Ok(s) = t.unescape() {
                    current.push_str(&s);
                }
            }
            Ok(Event::End(e)) => {
                depth -= 1;
                if e.local_name().as_ref() == b"p" {
                    paragraphs.push(std::mem::take(&mut current));
                }
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    paragraphs.join("\n")
}
