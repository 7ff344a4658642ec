/// An embedded image, referenced from a run by relationship id.
#[derive(Debug, Clone)]
pub struct Image {
    pub relationship_id: String,
    pub file_name: String,
    pub media_type: String,
    pub byte_length: u64,
    /// Lowercase hex-encoded SHA-256 of the payload.
    pub sha256: String,
}
