//! `docx_review`: reads, edits, compares, and emits Word documents with full
//! fidelity for tracked changes and anchored comments.
//!
//! Layered as a package/part layer (`opc`) that knows nothing about
//! WordprocessingML, a document model (`model`, `docx`) built on top of it,
//! and read-only analysis layers (`extract`, `diff`, `textconv`) that only
//! ever borrow the model.

pub mod cli;
pub mod diff;
pub mod docx;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod model;
pub mod opc;
pub mod output;
pub mod textconv;
pub mod xml;

pub use error::{DocxError, Result};
