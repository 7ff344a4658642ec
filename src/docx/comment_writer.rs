//! CommentWriter: brackets a range with comment markers and appends the
//! comment body to the comments part.

use super::run_index::RunIndex;
use super::tree::DocumentXml;
use crate::error::{DocxError, Result};
use crate::model::{Comment, Inline};
use crate::xml::{escape_xml_attr, escape_xml_text};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::ops::Range;

pub struct CommentWriter;

impl CommentWriter {
    /// Inserts `w:commentRangeStart`/`End`/`Reference` around `range` in the
    /// main document and appends a `w:comment` entry to `comments_xml`.
    /// Splitting the boundary runs reuses the Splicer's own caret-split
    /// primitive, since comment markers are zero-width and need exactly the
    /// same "split here without losing content" behavior as an insertion
    /// point.
    pub fn add(
        doc: &mut DocumentXml,
        comments_xml: &mut Vec<u8>,
        index: &RunIndex,
        range: Range<usize>,
        body: &str,
        author: &str,
        date: &str,
    ) -> Result<Comment> {
        if range.start >= range.end {
            return Err(DocxError::ZeroLengthRange("comment"));
        }
        let (block_index, para_start) =
            index.single_paragraph(range.clone()).ok_or(DocxError::SpansMultipleParagraphs)?;
        let local_range = (range.start - para_start)..(range.end - para_start);
        let anchor_text = index.slice(range.clone());
        let id = smallest_unused_id(comments_xml);
        let paragraph_index = index.paragraph_seq_of_block(block_index);

        let para = doc.paragraph_mut(block_index);
        let (start_idx, _) = super::splicer::extract_caret(&mut para.model.children, local_range.start);
        para.model.children.insert(start_idx, Inline::CommentRangeStart { id: id.to_string() });

        let (end_idx, _) = super::splicer::extract_caret(&mut para.model.children, local_range.end);
        para.model.children.insert(end_idx, Inline::CommentReference { id: id.to_string() });
        para.model.children.insert(end_idx, Inline::CommentRangeEnd { id: id.to_string() });
        para.dirty = true;

        append_comment_entry(comments_xml, id, author, date, body);

        Ok(Comment {
            id: id.to_string(),
            author: author.to_string(),
            date: date.to_string(),
            text: body.to_string(),
            anchor_text,
            paragraph_index,
        })
    }
}

fn smallest_unused_id(comments_xml: &[u8]) -> u32 {
    let mut used = HashSet::new();
    let mut reader = Reader::from_reader(comments_xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"comment" => {
                if let Some(id) = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.local_name().as_ref() == b"id")
                    .and_then(|a| String::from_utf8_lossy(&a.value).parse::<u32>().ok())
                {
                    used.insert(id);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    let mut candidate = 0u32;
    while used.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

fn append_comment_entry(xml: &mut Vec<u8>, id: u32, author: &str, date: &str, body: &str) {
    let s = String::from_utf8_lossy(xml).into_owned();
    let entry = format!(
        r#"<w:comment w:id="{id}" w:author="{}" w:date="{}"><w:p><w:r><w:rPr><w:rStyle w:val="CommentReference"/></w:rPr><w:annotationRef/></w:r><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:comment>"#,
        escape_xml_attr(author),
        escape_xml_attr(date),
        escape_xml_text(body),
    );
    let updated = s.replacen("</w:comments>", &format!("{entry}</w:comments>"), 1);
    *xml = updated.into_bytes();
}
