//! Regenerates XML bytes for a [`DocumentXml`], emitting untouched
//! paragraphs and all tables verbatim and rebuilding only paragraphs the
//! Splicer or CommentWriter marked dirty.

use super::tree::{BlockNode, DocumentXml};
use crate::model::{Inline, Run, RunProperties, Toggle, TrackedRun};
use crate::xml::{escape_xml_attr, escape_xml_text};

pub fn serialize_document(doc: &DocumentXml) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&doc.prefix);
    for block in &doc.blocks {
        match block {
            BlockNode::Paragraph(p) => {
                if p.dirty {
                    out.extend(serialize_paragraph(p));
                } else {
                    out.extend_from_slice(&p.raw);
                }
            }
            BlockNode::Table(t) => out.extend_from_slice(&t.raw),
        }
    }
    out.extend_from_slice(&doc.tail_raw);
    out.extend_from_slice(&doc.suffix);
    out
}

fn serialize_paragraph(p: &super::tree::ParagraphNode) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&p.open_tag);
    out.extend_from_slice(&p.raw_ppr);
    for child in &p.model.children {
        serialize_inline(child, &mut out);
    }
    out.extend_from_slice(b"</w:p>");
    out
}

fn serialize_inline(child: &Inline, out: &mut Vec<u8>) {
    match child {
        Inline::Run(r) => serialize_run(r, out),
        Inline::DeletedRun(t) => serialize_tracked(t, "del", "delText", out),
        Inline::InsertedRun(t) => serialize_tracked(t, "ins", "t", out),
        Inline::MoveFromRun(t) => serialize_tracked(t, "moveFrom", "delText", out),
        Inline::MoveToRun(t) => serialize_tracked(t, "moveTo", "t", out),
        Inline::CommentRangeStart { id } => {
            out.extend(format!(r#"<w:commentRangeStart w:id="{id}"/>"#).into_bytes())
        }
        Inline::CommentRangeEnd { id } => {
            out.extend(format!(r#"<w:commentRangeEnd w:id="{id}"/>"#).into_bytes())
        }
        Inline::CommentReference { id } => out.extend(
            format!(
                r#"<w:r><w:rPr><w:rStyle w:val="CommentReference"/></w:rPr><w:commentReference w:id="{id}"/></w:r>"#
            )
            .into_bytes(),
        ),
        Inline::Other(raw) => out.extend_from_slice(raw),
    }
}

fn serialize_run(r: &Run, out: &mut Vec<u8>) {
    out.extend_from_slice(b"<w:r>");
    serialize_run_properties(&r.properties, out);
    push_text_element(&r.text, "t", out);
    out.extend_from_slice(b"</w:r>");
}

fn serialize_tracked(t: &TrackedRun, tag: &str, text_tag: &str, out: &mut Vec<u8>) {
    out.extend(
        format!(
            r#"<w:{tag} w:id="{}" w:author="{}" w:date="{}">"#,
            t.id,
            escape_xml_attr(&t.author),
            escape_xml_attr(&t.date)
        )
        .into_bytes(),
    );
    for r in &t.runs {
        out.extend_from_slice(b"<w:r>");
        serialize_run_properties(&r.properties, out);
        push_text_element(&r.text, text_tag, out);
        out.extend_from_slice(b"</w:r>");
    }
    out.extend(format!("</w:{tag}>").into_bytes());
}

fn push_text_element(text: &str, tag: &str, out: &mut Vec<u8>) {
    let preserve = text.starts_with([' ', '\t']) || text.ends_with([' ', '\t']);
    if preserve {
        out.extend(format!(r#"<w:{tag} xml:space="preserve">"#).into_bytes());
    } else {
        out.extend(format!("<w:{tag}>").into_bytes());
    }
    out.extend(escape_xml_text(text).into_bytes());
    out.extend(format!("</w:{tag}>").into_bytes());
}

fn serialize_run_properties(props: &RunProperties, out: &mut Vec<u8>) {
    if *props == RunProperties::default() {
        return;
    }
    out.extend_from_slice(b"<w:rPr>");
    match props.bold {
        Toggle::On => out.extend_from_slice(b"<w:b/>"),
        Toggle::Off => out.extend_from_slice(br#"<w:b w:val="0"/>"#),
        Toggle::Absent => {}
    }
    match props.italic {
        Toggle::On => out.extend_from_slice(b"<w:i/>"),
        Toggle::Off => out.extend_from_slice(br#"<w:i w:val="0"/>"#),
        Toggle::Absent => {}
    }
    match props.underline {
        Toggle::On => out.extend_from_slice(br#"<w:u w:val="single"/>"#),
        Toggle::Off => out.extend_from_slice(br#"<w:u w:val="none"/>"#),
        Toggle::Absent => {}
    }
    match props.strikethrough {
        Toggle::On => out.extend_from_slice(b"<w:strike/>"),
        Toggle::Off => out.extend_from_slice(br#"<w:strike w:val="0"/>"#),
        Toggle::Absent => {}
    }
    if props.font_ascii.is_some() || props.font_high_ansi.is_some() || props.font_complex_script.is_some() {
        out.extend_from_slice(b"<w:rFonts");
        if let Some(v) = &props.font_ascii {
            out.extend(format!(r#" w:ascii="{}""#, escape_xml_attr(v)).into_bytes());
        }
        if let Some(v) = &props.font_high_ansi {
            out.extend(format!(r#" w:hAnsi="{}""#, escape_xml_attr(v)).into_bytes());
        }
        if let Some(v) = &props.font_complex_script {
            out.extend(format!(r#" w:cs="{}""#, escape_xml_attr(v)).into_bytes());
        }
        out.extend_from_slice(b"/>");
    }
    if let Some(sz) = &props.font_size_half_points {
        out.extend(format!(r#"<w:sz w:val="{sz}"/>"#).into_bytes());
    }
    if let Some(c) = &props.color {
        out.extend(format!(r#"<w:color w:val="{c}"/>"#).into_bytes());
    }
    if let Some(h) = &props.highlight {
        out.extend(format!(r#"<w:highlight w:val="{h}"/>"#).into_bytes());
    }
    out.extend_from_slice(b"</w:rPr>");
}
