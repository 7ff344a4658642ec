//! The document tree, its XML parse/serialize pair, and the editing
//! components that operate on it (RunIndex, MatchEngine, Splicer,
//! CommentWriter, EditDriver).

mod comment_writer;
mod edit_driver;
mod match_engine;
pub mod parse;
mod run_index;
pub mod serialize;
mod splicer;
pub mod tree;

pub use comment_writer::CommentWriter;
pub use edit_driver::{EditDriver, EditOutcome, EditResult};
pub use match_engine::find;
pub use parse::parse_document;
pub use run_index::RunIndex;
pub use serialize::serialize_document;
pub use splicer::Splicer;
pub use tree::DocumentXml;
