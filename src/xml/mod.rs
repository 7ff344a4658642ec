//! Small XML helpers shared by the document tree, writer, and textconv paths.

mod escape;

pub use escape::{escape_xml_attr, escape_xml_text};
