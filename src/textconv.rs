//! TextConv: deterministic line-oriented serialization of an extracted
//! document. Reads the document tree directly (not just the already-flattened
//! `ExtractedDocument`) so the BODY section can interleave tracked-change and
//! formatting markers in original document order.

use crate::docx::tree::{BlockNode, DocumentXml};
use crate::extract::ExtractedDocument;
use crate::model::{Inline, Run, RunProperties, TrackedRun};

pub fn convert(doc: &DocumentXml, extracted: &ExtractedDocument) -> String {
    let mut out = String::new();
    write_metadata(&mut out, extracted);
    out.push('\n');
    write_body(&mut out, doc, extracted);
    out.push('\n');
    write_tables(&mut out, extracted);
    out.push('\n');
    write_comments(&mut out, extracted);
    out.push('\n');
    write_images(&mut out, extracted);
    out
}

fn write_metadata(out: &mut String, extracted: &ExtractedDocument) {
    out.push_str("=== METADATA ===\n");
    let m = &extracted.metadata;
    if let Some(v) = &m.title {
        out.push_str(&format!("Title: {v}\n"));
    }
    if let Some(v) = &m.author {
        out.push_str(&format!("Author: {v}\n"));
    }
    if let Some(v) = &m.last_modified_by {
        out.push_str(&format!("LastModifiedBy: {v}\n"));
    }
    if let Some(v) = &m.modified {
        out.push_str(&format!("Modified: {v}\n"));
    }
    if let Some(v) = m.revision {
        out.push_str(&format!("Revision: {v}\n"));
    }
    out.push_str(&format!("Words: {}\n", m.word_count));
    out.push_str(&format!("Paragraphs: {}\n", m.paragraph_count));
}

fn write_body(out: &mut String, doc: &DocumentXml, extracted: &ExtractedDocument) {
    out.push_str("=== BODY ===\n");
    let mut paragraph_index = 0usize;
    for block in &doc.blocks {
        if let BlockNode::Paragraph(p) = block {
            let rich = render_children(&p.model.children);
            let mut line = format!("\u{b6}{paragraph_index}");
            if let Some(style) = &p.model.style_id {
                line.push_str(&format!(" [{style}]"));
            }
            line.push(' ');
            line.push_str(&rich);
            for comment in extracted.comments.iter().filter(|c| c.paragraph_index == paragraph_index) {
                line.push_str(&format!(" /* [{}] {} */", comment.author, comment.text));
            }
            out.push_str(&line);
            out.push('\n');
            paragraph_index += 1;
        }
    }
}

fn render_children(children: &[Inline]) -> String {
    let mut out = String::new();
    for child in children {
        match child {
            Inline::Run(r) => out.push_str(&render_run(r)),
            Inline::DeletedRun(t) | Inline::MoveFromRun(t) => {
                out.push_str(&format!("[-{}-]", render_tracked(t)));
            }
            Inline::InsertedRun(t) | Inline::MoveToRun(t) => {
                out.push_str(&format!("[+{}+]", render_tracked(t)));
            }
            _ => {}
        }
    }
    out
}

fn render_tracked(t: &TrackedRun) -> String {
    t.runs.iter().map(render_run).collect()
}

fn render_run(r: &Run) -> String {
    wrap_formatting(&r.text, &r.properties)
}

fn wrap_formatting(text: &str, props: &RunProperties) -> String {
    let mut s = text.to_string();
    if props.strikethrough.is_on() {
        s = format!("[S]{s}[/S]");
    }
    if props.underline.is_on() {
        s = format!("[U]{s}[/U]");
    }
    if props.italic.is_on() {
        s = format!("[I]{s}[/I]");
    }
    if props.bold.is_on() {
        s = format!("[B]{s}[/B]");
    }
    s
}

fn write_tables(out: &mut String, extracted: &ExtractedDocument) {
    out.push_str("=== TABLES ===\n");
    for (n, record) in extracted.tables.iter().enumerate() {
        let para_index = record.preceding_paragraph_index.saturating_sub(1);
        out.push_str(&format!(
            "Table {} ({}\u{d7}{}) at \u{b6}{}:\n",
            n + 1,
            record.table.row_count(),
            record.table.col_count(),
            para_index
        ));
        for row in &record.table.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| c.text()).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
    }
}

fn write_comments(out: &mut String, extracted: &ExtractedDocument) {
    out.push_str("=== COMMENTS ===\n");
    for c in &extracted.comments {
        let anchor = truncate(&c.anchor_text, 60);
        out.push_str(&format!(
            "#{} [{}] on \"{}\" (\u{b6}{}): {}\n",
            c.id, c.author, anchor, c.paragraph_index, c.text
        ));
    }
}

fn write_images(out: &mut String, extracted: &ExtractedDocument) {
    out.push_str("=== IMAGES ===\n");
    for img in &extracted.images {
        let hash = img.sha256.get(..12).unwrap_or(&img.sha256);
        out.push_str(&format!(
            "[IMG] {} ({}, {} bytes, sha256:{}...)\n",
            img.file_name, img.media_type, img.byte_length, hash
        ));
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
