//! Ordinal substring search over a [`RunIndex`]'s visible stream.

use super::run_index::RunIndex;
use std::ops::Range;

/// Returns the first occurrence of `needle` in `index`'s visible text, as a
/// half-open byte range, or `None` if it doesn't occur. Byte-exact
/// comparison: no normalization, no case folding, no whitespace collapsing.
pub fn find(index: &RunIndex, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let pos = memchr::memmem::find(&index.visible, needle.as_bytes())?;
    Some(pos..pos + needle.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::parse::parse_document;

    fn doc(xml: &str) -> crate::docx::tree::DocumentXml {
        parse_document(xml.as_bytes()).unwrap()
    }

    #[test]
    fn finds_first_occurrence() {
        let d = doc(
            r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>foo bar foo</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let idx = RunIndex::build(&d);
        let r = find(&idx, "foo").unwrap();
        assert_eq!(r, 0..3);
    }

    #[test]
    fn empty_needle_never_matches() {
        let d = doc(r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>foo</w:t></w:r></w:p></w:body></w:document>"#);
        let idx = RunIndex::build(&d);
        assert!(find(&idx, "").is_none());
    }

    #[test]
    fn deleted_text_is_not_visible() {
        let d = doc(
            r#"<w:document xmlns:w="ns"><w:body><w:p><w:del w:id="1" w:author="a" w:date="d"><w:r><w:delText>gone</w:delText></w:r></w:del></w:p></w:body></w:document>"#,
        );
        let idx = RunIndex::build(&d);
        assert!(find(&idx, "gone").is_none());
    }

    #[test]
    fn inserted_text_is_visible() {
        let d = doc(
            r#"<w:document xmlns:w="ns"><w:body><w:p><w:ins w:id="1" w:author="a" w:date="d"><w:r><w:t>kept</w:t></w:r></w:ins></w:p></w:body></w:document>"#,
        );
        let idx = RunIndex::build(&d);
        assert_eq!(find(&idx, "kept"), Some(0..4));
    }
}
