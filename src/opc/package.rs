//! PartStore: uniform, zip-backed access to a .docx package's named XML parts.
//!
//! Opens from a physical reader, keeps a `parts` map keyed by partname, and
//! writes back on commit. Trimmed to the handful of parts this crate ever
//! touches: the main document part and the comments part. Every other part —
//! styles, numbering, themes, settings, headers/footers, footnotes, media,
//! custom XML — is carried as an opaque [`Part`](super::part::Part) and
//! written back unchanged, which is what gives the editor its "everything
//! else passes through byte-for-byte" guarantee.

use crate::error::{DocxError, Result};
use crate::opc::constants::{content_type, namespace, relationship_type};
use crate::opc::part::Part;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

const PACKAGE_RELS: &str = "_rels/.rels";
const CONTENT_TYPES: &str = "[Content_Types].xml";
const COMMENTS_PART: &str = "word/comments.xml";

/// In-memory view of a .docx package's parts, opened for read or read-write.
pub struct PartStore {
    /// All parts, in the order they appeared in the archive (preserved on write
    /// so a diff of the raw zip stays minimal for parts we never touch).
    order: Vec<String>,
    parts: HashMap<String, Part>,
    /// Zip entry name of the main document part, e.g. `word/document.xml`.
    main_document_name: String,
    /// Zip entry name of the main document's own `.rels` part, e.g.
    /// `word/_rels/document.xml.rels`.
    document_rels_name: String,
    /// Zip entry name of the comments part, once one exists.
    comments_name: Option<String>,
}

impl PartStore {
    /// Open a package for read-only access.
    pub fn open_read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            DocxError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.as_ref().display(), e),
            ))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Open `input` for read-write by first copying it to `output`, then
    /// loading the copy. This sidesteps same-file-as-input-and-output
    /// concerns entirely, per the resource model (§5): the input is never
    /// mutated, and `output` may equal `input` without any special-casing.
    pub fn open_for_edit(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(input.as_ref())?;
        if input.as_ref() != output.as_ref() {
            std::fs::write(output.as_ref(), &bytes)?;
        }
        Self::from_bytes(&bytes)
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| DocxError::InvalidContainer(e.to_string()))?;

        let mut order = Vec::with_capacity(archive.len());
        let mut parts = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| DocxError::InvalidContainer(e.to_string()))?;
            let name = entry.name().to_string();
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buf)?;
            order.push(name.clone());
            parts.insert(name.clone(), Part::new(name, buf));
        }

        let main_document_name = parts
            .get(PACKAGE_RELS)
            .and_then(|p| find_relationship_target(&p.bytes, relationship_type::OFFICE_DOCUMENT))
            .unwrap_or_else(|| "word/document.xml".to_string());

        if !parts.contains_key(&main_document_name) {
            return Err(DocxError::MissingMainDocument);
        }

        let document_rels_name = rels_part_name(&main_document_name);

        let comments_name = parts
            .get(&document_rels_name)
            .and_then(|p| find_relationship_target(&p.bytes, relationship_type::COMMENTS))
            .map(|target| normalize_part_target(&main_document_name, &target))
            .filter(|name| parts.contains_key(name));

        Ok(Self {
            order,
            parts,
            main_document_name,
            document_rels_name,
            comments_name,
        })
    }

    /// Bytes of the main document part (`word/document.xml`, typically).
    pub fn main_document(&self) -> &[u8] {
        &self.parts[&self.main_document_name].bytes
    }

    /// Replace the main document part's bytes.
    pub fn set_main_document(&mut self, bytes: Vec<u8>) {
        self.parts.get_mut(&self.main_document_name).unwrap().bytes = bytes;
    }

    /// Bytes of the comments part, if the package has one.
    pub fn comments(&self) -> Option<&[u8]> {
        self.comments_name.as_ref().map(|n| self.parts[n].bytes.as_slice())
    }

    /// Bytes of an arbitrary part by its zip entry name, if present. Used by
    /// the extractor for parts this crate never models structurally
    /// (`docProps/core.xml`, `docProps/app.xml`, media).
    pub fn part_bytes(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|p| p.bytes.as_slice())
    }

    /// All parts whose zip entry name starts with `prefix`, e.g. `"word/media/"`.
    pub fn parts_with_prefix(&self, prefix: &str) -> Vec<(&str, &[u8])> {
        self.order
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| (name.as_str(), self.parts[name].bytes.as_slice()))
            .collect()
    }

    /// Resolve a package-level relationship (from `_rels/.rels`) by its type,
    /// returning the normalized part name if present.
    pub fn package_relationship(&self, reltype: &str) -> Option<String> {
        let rels = self.parts.get(PACKAGE_RELS)?;
        find_relationship_target(&rels.bytes, reltype).map(|t| normalize_part_target("", &t))
    }

    /// Every relationship of `reltype` declared in the main document's own
    /// `.rels` part, as (relationship id, normalized target part name) pairs.
    pub fn document_relationships(&self, reltype: &str) -> Vec<(String, String)> {
        let Some(rels) = self.parts.get(&self.document_rels_name) else { return Vec::new() };
        relationships_of_type(&rels.bytes, reltype)
            .into_iter()
            .map(|(id, target)| (id, normalize_part_target(&self.main_document_name, &target)))
            .collect()
    }

    /// Get the comments part's bytes, creating an empty `w:comments` document
    /// (plus its relationship and content-type registration) on first write.
    pub fn ensure_comments_mut(&mut self) -> &mut Vec<u8> {
        if self.comments_name.is_none() {
            let name = COMMENTS_PART.to_string();
            self.parts.insert(
                name.clone(),
                Part::new(
                    name.clone(),
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:comments xmlns:w="{}"></w:comments>"#,
                        namespace::WML_MAIN
                    )
                    .into_bytes(),
                ),
            );
            self.order.push(name.clone());
            self.register_comments_relationship();
            self.comments_name = Some(name);
        }
        let name = self.comments_name.clone().unwrap();
        &mut self.parts.get_mut(&name).unwrap().bytes
    }

    fn register_comments_relationship(&mut self) {
        if !self.parts.contains_key(&self.document_rels_name) {
            self.parts.insert(
                self.document_rels_name.clone(),
                Part::new(
                    self.document_rels_name.clone(),
                    format!(
                        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}"></Relationships>"#,
                        namespace::OPC_RELATIONSHIPS
                    )
                    .into_bytes(),
                ),
            );
            self.order.push(self.document_rels_name.clone());
        }
        add_relationship(
            self.parts.get_mut(&self.document_rels_name).unwrap(),
            relationship_type::COMMENTS,
            "comments.xml",
        );
        add_content_type_override(
            self.parts.get_mut(CONTENT_TYPES).expect("Content_Types part always present"),
            "/word/comments.xml",
            content_type::WML_COMMENTS,
        );
    }

    /// Write the package (with whatever edits have been applied) to `path`.
    pub fn commit(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for name in &self.order {
            let part = &self.parts[name];
            writer
                .start_file(name, options)
                .map_err(|e| DocxError::InvalidContainer(e.to_string()))?;
            writer.write_all(&part.bytes)?;
        }
        writer
            .finish()
            .map_err(|e| DocxError::InvalidContainer(e.to_string()))?;
        Ok(())
    }
}

/// Find a relationship's `Target` attribute by its `Type`, from raw `.rels` XML.
///
/// Deliberately a light scan rather than a full relationship model: this
/// crate never needs to enumerate or rewrite arbitrary relationships, only to
/// resolve the two well-known ones it cares about.
fn find_relationship_target(rels_xml: &[u8], reltype: &str) -> Option<String> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                let mut ty = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => ty = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Target" => target = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        _ => {}
                    }
                }
                if ty.as_deref() == Some(reltype) {
                    return target;
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Collect every relationship of `reltype` from raw `.rels` XML, as
/// (Id, Target) pairs, in document order.
fn relationships_of_type(rels_xml: &[u8], reltype: &str) -> Vec<(String, String)> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut out = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut ty = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Type" => ty = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Target" => target = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        _ => {}
                    }
                }
                if ty.as_deref() == Some(reltype) {
                    if let (Some(id), Some(target)) = (id, target) {
                        out.push((id, target));
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    out
}

/// The zip entry name of `part`'s own `.rels` file, e.g. `word/document.xml`
/// -> `word/_rels/document.xml.rels`.
fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolve a relationship `Target` (relative to the owning part's directory)
/// into a package-rooted zip entry name.
fn normalize_part_target(owner_part: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }
    let dir = owner_part.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
    if dir.is_empty() {
        target.to_string()
    } else {
        format!("{}/{}", dir, target)
    }
}

/// Append a `<Relationship>` element to a `.rels` part's bytes if one with this
/// reltype doesn't already exist.
fn add_relationship(part: &mut Part, reltype: &str, target: &str) {
    let xml = String::from_utf8_lossy(&part.bytes);
    if xml.contains(&format!(r#"Type="{reltype}""#)) {
        return;
    }
    let next_id = (xml.matches(r#"Id="rId"#).count() + 1).max(1);
    let insertion = format!(
        r#"<Relationship Id="rId{next_id}" Type="{reltype}" Target="{target}"/>"#
    );
    let updated = xml.replacen("</Relationships>", &format!("{insertion}</Relationships>"), 1);
    part.bytes = updated.into_bytes();
}

/// Append an `<Override>` content-type registration if one for this part name
/// doesn't already exist.
fn add_content_type_override(part: &mut Part, part_name: &str, content_type: &str) {
    let xml = String::from_utf8_lossy(&part.bytes);
    if xml.contains(part_name) {
        return;
    }
    let insertion = format!(r#"<Override PartName="{part_name}" ContentType="{content_type}"/>"#);
    let updated = xml.replacen("</Types>", &format!("{insertion}</Types>"), 1);
    part.bytes = updated.into_bytes();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn minimal_docx_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut w = zip::ZipWriter::new(cursor);
            let opts = zip::write::SimpleFileOptions::default();
            w.start_file(CONTENT_TYPES, opts).unwrap();
            w.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#).unwrap();
            w.start_file(PACKAGE_RELS, opts).unwrap();
            w.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#).unwrap();
            w.start_file("word/document.xml", opts).unwrap();
            w.write_all(br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>"#).unwrap();
            w.finish().unwrap();
        }
        buf
    }

    #[test]
    fn opens_and_resolves_main_document() {
        let store = PartStore::from_bytes(&minimal_docx_bytes()).unwrap();
        assert!(store.main_document().starts_with(b"<w:document"));
        assert!(store.comments().is_none());
    }

    #[test]
    fn ensure_comments_creates_part_and_registrations() {
        let mut store = PartStore::from_bytes(&minimal_docx_bytes()).unwrap();
        let _ = store.ensure_comments_mut();
        assert!(store.comments().is_some());
        let rels = String::from_utf8_lossy(&store.parts[&store.document_rels_name].bytes).into_owned();
        assert!(rels.contains("comments.xml"));
        let cts = String::from_utf8_lossy(&store.parts[CONTENT_TYPES].bytes).into_owned();
        assert!(cts.contains("/word/comments.xml"));
    }

    #[test]
    fn roundtrips_through_commit() {
        let store = PartStore::from_bytes(&minimal_docx_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        store.commit(&path).unwrap();
        let reopened = PartStore::open_read(&path).unwrap();
        assert_eq!(reopened.main_document(), store.main_document());
    }
}
