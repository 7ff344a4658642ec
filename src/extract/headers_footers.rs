//! Header/footer extraction: text plus scope (default/first/even), scope
//! resolved from the `w:headerReference`/`w:footerReference` elements in the
//! body's trailing section properties.

use crate::opc::constants::relationship_type;
use crate::opc::PartStore;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

#[derive(Debug, Clone)]
pub struct HeaderFooterRecord {
    pub kind: HeaderFooterKind,
    /// `default`, `first`, or `even`, per `w:type` on the reference element.
    pub scope: String,
    pub text: String,
}

pub fn extract_headers_footers(store: &PartStore, tail_raw: &[u8]) -> Vec<HeaderFooterRecord> {
    let scopes = reference_scopes(tail_raw);
    let mut out = Vec::new();

    for (rid, target) in store.document_relationships(relationship_type::HEADER) {
        if let Some(bytes) = store.part_bytes(&target) {
            let scope = scopes.get(&rid).cloned().unwrap_or_else(|| "default".to_string());
            out.push(HeaderFooterRecord { kind: HeaderFooterKind::Header, scope, text: read_all_text(bytes) });
        }
    }
    for (rid, target) in store.document_relationships(relationship_type::FOOTER) {
        if let Some(bytes) = store.part_bytes(&target) {
            let scope = scopes.get(&rid).cloned().unwrap_or_else(|| "default".to_string());
            out.push(HeaderFooterRecord { kind: HeaderFooterKind::Footer, scope, text: read_all_text(bytes) });
        }
    }
    out
}

/// Scans `w:headerReference`/`w:footerReference` elements for their
/// relationship id (`r:id`) and `w:type` attributes.
fn reference_scopes(tail_raw: &[u8]) -> HashMap<String, String> {
    let mut reader = Reader::from_reader(tail_raw);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if matches!(e.local_name().as_ref(), b"headerReference" | b"footerReference") =>
            {
                let mut id = None;
                let mut ty = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"type" => ty = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(ty)) = (id, ty) {
                    map.insert(id, ty);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    map
}

/// Concatenates every `w:t`/`w:delText` text node in a header/footer part,
/// paragraphs joined by newlines.
fn read_all_text(bytes: &[u8]) -> String {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if matches!(e.local_name().as_ref(), b"t" | b"delText") {
                    in_text = true;
                }
            }
            Ok(Event::Text(t)) if in_text => {
                if let Ok(s) = t.unescape() {
                    current.push_str(&s);
                }
            }
            Ok(Event::End(e)) => {
                if matches!(e.local_name().as_ref(), b"t" | b"delText") {
                    in_text = false;
                } else if e.local_name().as_ref() == b"p" {
                    paragraphs.push(std::mem::take(&mut current));
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs.join("\n")
}
