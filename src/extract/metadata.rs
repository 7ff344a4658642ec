//! Package metadata extraction: `docProps/core.xml` fields plus word/paragraph
//! counts derived from the already-extracted paragraph text.

use super::ParagraphRecord;
use crate::model::PackageMetadata;
use crate::opc::PartStore;
use quick_xml::events::Event;
use quick_xml::Reader;

pub fn extract_metadata(store: &PartStore, paragraphs: &[ParagraphRecord]) -> PackageMetadata {
    let mut metadata = store
        .package_relationship(crate::opc::constants::relationship_type::CORE_PROPERTIES)
        .and_then(|name| store.part_bytes(&name))
        .map(parse_core_properties)
        .unwrap_or_default();

    metadata.paragraph_count = paragraphs.len();
    metadata.word_count = paragraphs.iter().map(|p| count_words(&p.text)).sum();
    metadata
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn parse_core_properties(bytes: &[u8]) -> PackageMetadata {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut metadata = PackageMetadata::default();
    let mut current: Option<&'static str> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current = match e.local_name().as_ref() {
                    b"title" => Some("title"),
                    b"creator" => Some("creator"),
                    b"lastModifiedBy" => Some("lastModifiedBy"),
                    b"created" => Some("created"),
                    b"modified" => Some("modified"),
                    b"revision" => Some("revision"),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                if let (Some(field), Ok(text)) = (current, t.unescape()) {
                    let text = text.into_owned();
                    match field {
                        "title" => metadata.title = Some(text),
                        "creator" => metadata.author = Some(text),
                        "lastModifiedBy" => metadata.last_modified_by = Some(text),
                        "created" => metadata.created = Some(text),
                        "modified" => metadata.modified = Some(text),
                        "revision" => metadata.revision = text.parse().ok(),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    metadata
}
