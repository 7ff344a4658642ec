//! Shared fixture builder for integration tests: assembles a minimal
//! in-memory .docx package byte-for-byte, the way the differ's own unit
//! tests do, but exposed here for the end-to-end scenarios.

use std::io::Write;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Builds a one-paragraph document whose body is exactly `paragraph_xml`
/// (the caller supplies `<w:p>...</w:p>`), and writes it as a .docx to
/// `path`.
pub fn write_docx(path: &std::path::Path, paragraph_xml: &str) {
    write_docx_body(path, paragraph_xml);
}

/// Like [`write_docx`] but the caller supplies the whole `<w:body>` content
/// (multiple paragraphs, etc).
pub fn write_docx_body(path: &std::path::Path, body_xml: &str) {
    let doc = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}<w:sectPr/></w:body></w:document>"#
    );
    write_docx_raw(path, &doc);
}

fn write_docx_raw(path: &std::path::Path, document_xml: &str) {
    let file = std::fs::File::create(path).expect("create fixture file");
    let mut w = zip::ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    w.start_file("[Content_Types].xml", opts).unwrap();
    w.write_all(CONTENT_TYPES.as_bytes()).unwrap();

    w.start_file("_rels/.rels", opts).unwrap();
    w.write_all(PACKAGE_RELS.as_bytes()).unwrap();

    w.start_file("word/document.xml", opts).unwrap();
    w.write_all(document_xml.as_bytes()).unwrap();

    w.finish().unwrap();
}

/// A single run with plain formatting: `<w:r><w:t>{text}</w:t></w:r>`.
pub fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

/// A bold run: `<w:r><w:rPr><w:b/></w:rPr><w:t>{text}</w:t></w:r>`.
pub fn bold_run(text: &str) -> String {
    format!(r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

pub fn paragraph(runs_xml: &str) -> String {
    format!("<w:p>{runs_xml}</w:p>")
}
