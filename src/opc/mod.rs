//! Open Packaging Convention primitives: parts and the package they live in.

pub mod constants;
mod package;
mod part;

pub use package::PartStore;
pub use part::Part;
