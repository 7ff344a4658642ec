/// Package-level metadata (`docProps/core.xml`, `docProps/app.xml`) plus the
/// derived word/paragraph counts the read and diff outputs report.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub last_modified_by: Option<String>,
    /// ISO-8601 UTC, second precision.
    pub created: Option<String>,
    pub modified: Option<String>,
    pub revision: Option<u32>,
    pub word_count: usize,
    pub paragraph_count: usize,
}
