/// A comment, identified by a string id unique within the document.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: String,
    pub author: String,
    /// ISO-8601 timestamp, preserved as the original attribute string.
    pub date: String,
    /// Paragraphs of the comment body concatenated with newlines.
    pub text: String,
    /// The text between the comment's start and end range markers.
    pub anchor_text: String,
    /// Index of the paragraph containing the comment's start marker.
    pub paragraph_index: usize,
}
