//! Streaming parse of `word/document.xml` into a [`DocumentXml`].
//!
//! Two passes: first a body-level scan captures each top-level child's raw
//! byte range (cheap, since it only needs to track nesting depth to find the
//! matching close tag), then each
//! paragraph's and table's captured bytes are parsed again, independently,
//! into the modeled form. Re-parsing a slice is simpler and just as fast as
//! threading model state through the outer scan, and it keeps "capture raw
//! bytes" and "build the model" from tangling into one pass.

use super::tree::{BlockNode, DocumentXml, ParagraphNode, TableNode};
use crate::error::{DocxError, Result};
use crate::model::{Cell, Inline, Paragraph, Row, Run, RunProperties, Table, Toggle, TrackedRun};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub fn parse_document(doc_bytes: &[u8]) -> Result<DocumentXml> {
    let mut reader = Reader::from_reader(doc_bytes);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut prefix_end = None;
    let mut blocks = Vec::new();
    let mut tail_raw = Vec::new();

    loop {
        let pos_before = reader.buffer_position();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if prefix_end.is_none() && e.local_name().as_ref() == b"body" => {
                prefix_end = Some(reader.buffer_position());
            }
            Event::Start(e) if prefix_end.is_some() => {
                let name = e.local_name().as_ref().to_vec();
                let raw = capture_balanced(&mut reader, &mut buf, doc_bytes, pos_before)?;
                match name.as_slice() {
                    b"p" => blocks.push(BlockNode::Paragraph(parse_paragraph(&raw)?)),
                    b"tbl" => blocks.push(BlockNode::Table(parse_table(&raw)?)),
                    _ => tail_raw.extend_from_slice(&raw),
                }
            }
            Event::Empty(_) if prefix_end.is_some() => {
                tail_raw.extend_from_slice(&doc_bytes[pos_before..reader.buffer_position()]);
            }
            Event::End(e) if e.local_name().as_ref() == b"body" => {
                let suffix = doc_bytes[pos_before..].to_vec();
                let prefix = doc_bytes[..prefix_end.ok_or_else(|| {
                    DocxError::InvalidContainer("document.xml has no <w:body>".to_string())
                })?]
                    .to_vec();
                return Ok(DocumentXml { prefix, blocks, tail_raw, suffix });
            }
            Event::Eof => {
                return Err(DocxError::InvalidContainer(
                    "document.xml ended before </w:body>".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Reads events until the nesting depth returns to zero (the caller has just
/// consumed the opening `Start` event at `start_pos`), then slices the
/// source between `start_pos` and the matching close tag.
fn capture_balanced(
    reader: &mut Reader<&[u8]>,
    buf: &mut Vec<u8>,
    source: &[u8],
    start_pos: usize,
) -> Result<Vec<u8>> {
    let mut depth = 1i32;
    loop {
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                return Err(DocxError::InvalidContainer(
                    "unexpected EOF while capturing an XML element".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(source[start_pos..reader.buffer_position()].to_vec())
}

/// Reads events until a matching `Start`/`End` depth of zero, discarding
/// content. Used to skip over elements (unknown run properties, nested
/// structure we don't model) whose bytes aren't needed.
fn skip_element(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> Result<()> {
    let mut depth = 1i32;
    loop {
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                return Err(DocxError::InvalidContainer(
                    "unexpected EOF while skipping an XML element".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

fn parse_paragraph(raw: &[u8]) -> Result<ParagraphNode> {
    let mut reader = Reader::from_reader(raw);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let open_tag_end;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"p" => {
                open_tag_end = reader.buffer_position();
                break;
            }
            Event::Eof => {
                return Err(DocxError::InvalidContainer("<w:p> never opened".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }
    let open_tag = raw[..open_tag_end].to_vec();
    buf.clear();

    let mut style_id = None;
    let mut raw_ppr = Vec::new();
    let mut children = Vec::new();

    loop {
        let pos_before = reader.buffer_position();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"pPr" => {
                        raw_ppr = capture_balanced(&mut reader, &mut buf, raw, pos_before)?;
                        style_id = extract_style_id(&raw_ppr);
                    }
                    b"r" => match parse_run(&mut reader, &mut buf, b"t")? {
                        RunChild::Text(r) => children.push(Inline::Run(r)),
                        RunChild::CommentRef(id) => children.push(Inline::CommentReference { id }),
                    },
                    b"ins" => children.push(Inline::InsertedRun(parse_tracked(
                        &mut reader,
                        &mut buf,
                        &e,
                        b"t",
                        b"ins",
                    )?)),
                    b"del" => children.push(Inline::DeletedRun(parse_tracked(
                        &mut reader,
                        &mut buf,
                        &e,
                        b"delText",
                        b"del",
                    )?)),
                    b"moveFrom" => children.push(Inline::MoveFromRun(parse_tracked(
                        &mut reader,
                        &mut buf,
                        &e,
                        b"delText",
                        b"moveFrom",
                    )?)),
                    b"moveTo" => children.push(Inline::MoveToRun(parse_tracked(
                        &mut reader,
                        &mut buf,
                        &e,
                        b"t",
                        b"moveTo",
                    )?)),
                    _ => {
                        let other_raw = capture_balanced(&mut reader, &mut buf, raw, pos_before)?;
                        children.push(Inline::Other(other_raw));
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"commentRangeStart" => children.push(Inline::CommentRangeStart {
                        id: attr_value(&e, b"id").unwrap_or_default(),
                    }),
                    b"commentRangeEnd" => children.push(Inline::CommentRangeEnd {
                        id: attr_value(&e, b"id").unwrap_or_default(),
                    }),
                    b"pPr" => {
                        raw_ppr = raw[pos_before..reader.buffer_position()].to_vec();
                    }
                    _ => children.push(Inline::Other(raw[pos_before..reader.buffer_position()].to_vec())),
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"p" => break,
            Event::Eof => {
                return Err(DocxError::InvalidContainer("unterminated <w:p>".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(ParagraphNode {
        model: Paragraph { style_id, children },
        open_tag,
        raw_ppr,
        raw: raw.to_vec(),
        dirty: false,
    })
}

fn extract_style_id(raw_ppr: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(raw_ppr);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"pStyle" => {
                return attr_value(&e, b"val");
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

enum RunChild {
    Text(Run),
    CommentRef(String),
}

/// Parses the content of a `<w:r>` that has already been opened by the
/// caller. `text_tag` is `b"t"` for ordinary/inserted runs or `b"delText"`
/// for runs inside `w:del`/`w:moveFrom`.
fn parse_run(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>, text_tag: &[u8]) -> Result<RunChild> {
    let mut text = String::new();
    let mut properties = RunProperties::default();
    let mut comment_ref = None;

    loop {
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"rPr" {
                    properties = parse_run_properties(reader, buf)?;
                } else if name.as_slice() == text_tag {
                    loop {
                        match reader.read_event_into(buf)? {
                            Event::Text(t) => text.push_str(&t.unescape()?),
                            Event::End(_) => break,
                            Event::Eof => {
                                return Err(DocxError::InvalidContainer(
                                    "unterminated text element".to_string(),
                                ))
                            }
                            _ => {}
                        }
                        buf.clear();
                    }
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"rPr" => {}
                b"commentReference" => {
                    comment_ref = Some(attr_value(&e, b"id").unwrap_or_default());
                }
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"r" => break,
            Event::Eof => {
                return Err(DocxError::InvalidContainer("unterminated <w:r>".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }

    match comment_ref {
        Some(id) => Ok(RunChild::CommentRef(id)),
        None => Ok(RunChild::Text(Run { text, properties })),
    }
}

fn parse_run_properties(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> Result<RunProperties> {
    let mut props = RunProperties::default();
    loop {
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                apply_property(&mut props, &e);
                skip_element(reader, buf)?;
            }
            Event::Empty(e) => apply_property(&mut props, &e),
            Event::End(e) if e.local_name().as_ref() == b"rPr" => break,
            Event::Eof => {
                return Err(DocxError::InvalidContainer("unterminated <w:rPr>".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(props)
}

fn apply_property(props: &mut RunProperties, e: &BytesStart) {
    let name = e.local_name().as_ref().to_vec();
    let val = attr_value(e, b"val");
    match name.as_slice() {
        b"b" => props.bold = toggle_from(val),
        b"i" => props.italic = toggle_from(val),
        b"u" => props.underline = toggle_from(val),
        b"strike" => props.strikethrough = toggle_from(val),
        b"rFonts" => {
            props.font_ascii = attr_value(e, b"ascii");
            props.font_high_ansi = attr_value(e, b"hAnsi");
            props.font_complex_script = attr_value(e, b"cs");
        }
        b"sz" => props.font_size_half_points = val,
        b"color" => props.color = val,
        b"highlight" => props.highlight = val,
        _ => {}
    }
}

fn toggle_from(val: Option<String>) -> Toggle {
    match val.as_deref() {
        None => Toggle::On,
        Some("0") | Some("false") | Some("off") | Some("none") => Toggle::Off,
        Some(_) => Toggle::On,
    }
}

/// Parses a `w:ins`/`w:del`/`w:moveFrom`/`w:moveTo` element whose opening tag
/// has already been read into `e`. `closing_name` is that element's own
/// local name, used to find the matching close tag.
fn parse_tracked(
    reader: &mut Reader<&[u8]>,
    buf: &mut Vec<u8>,
    e: &BytesStart,
    text_tag: &[u8],
    closing_name: &[u8],
) -> Result<TrackedRun> {
    let author = attr_value(e, b"author").unwrap_or_default();
    let date = attr_value(e, b"date").unwrap_or_default();
    let id = attr_value(e, b"id").and_then(|s| s.parse().ok()).unwrap_or(0);
    let mut runs = Vec::new();

    loop {
        match reader.read_event_into(buf)? {
            Event::Start(re) => {
                if re.local_name().as_ref() == b"r" {
                    if let RunChild::Text(r) = parse_run(reader, buf, text_tag)? {
                        runs.push(r);
                    }
                } else {
                    skip_element(reader, buf)?;
                }
            }
            Event::Empty(_) => {}
            Event::End(ee) if ee.local_name().as_ref() == closing_name => break,
            Event::Eof => {
                return Err(DocxError::InvalidContainer(format!(
                    "unterminated <w:{}>",
                    String::from_utf8_lossy(closing_name)
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(TrackedRun { author, date, id, runs })
}

/// Tables are never edited, so their model only needs cell text: row/column
/// shape and paragraph text good enough for the differ, which only compares
/// cell text.
fn parse_table(raw: &[u8]) -> Result<TableNode> {
    let mut reader = Reader::from_reader(raw);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut cur_row: Option<Row> = None;
    let mut cur_cell_paragraphs: Vec<Paragraph> = Vec::new();
    let mut in_cell = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tr" => cur_row = Some(Row::default()),
                b"tc" => {
                    in_cell = true;
                    cur_cell_paragraphs = Vec::new();
                }
                b"p" if in_cell => {
                    let text = read_paragraph_text(&mut reader, &mut buf)?;
                    cur_cell_paragraphs.push(Paragraph {
                        style_id: None,
                        children: vec![Inline::Run(Run { text, properties: RunProperties::default() })],
                    });
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tc" => {
                    in_cell = false;
                    if let Some(row) = cur_row.as_mut() {
                        row.cells.push(Cell { paragraphs: std::mem::take(&mut cur_cell_paragraphs) });
                    }
                }
                b"tr" => {
                    if let Some(row) = cur_row.take() {
                        rows.push(row);
                    }
                }
                b"tbl" => break,
                _ => {}
            },
            Event::Eof => {
                return Err(DocxError::InvalidContainer("unterminated <w:tbl>".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(TableNode { model: Table { rows }, raw: raw.to_vec() })
}

/// Concatenates every text node inside a `<w:p>` (already opened) until its
/// matching close tag. Good enough for table-cell text; doesn't distinguish
/// tracked-change text from plain text, which only matters for cells under
/// active review, an edge case this tool doesn't edit into anyway.
fn read_paragraph_text(reader: &mut Reader<&[u8]>, buf: &mut Vec<u8>) -> Result<String> {
    let mut text = String::new();
    let mut depth = 1i32;
    loop {
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.local_name().as_ref() == b"p" {
                    break;
                }
            }
            Event::Eof => {
                return Err(DocxError::InvalidContainer("unterminated <w:p>".to_string()))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}
