//! Image extraction: every `word/media/*` part referenced by an image
//! relationship in `word/document.xml.rels`, hashed with SHA-256.

use crate::model::Image;
use crate::opc::constants::relationship_type;
use crate::opc::PartStore;
use sha2::{Digest, Sha256};

pub fn extract_images(store: &PartStore) -> Vec<Image> {
    store
        .document_relationships(relationship_type::IMAGE)
        .into_iter()
        .filter_map(|(rid, target)| {
            let bytes = store.part_bytes(&target)?;
            let file_name = target.rsplit('/').next().unwrap_or(&target).to_string();
            let media_type = guess_media_type(&file_name);
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let sha256 = format!("{:x}", hasher.finalize());
            Some(Image {
                relationship_id: rid,
                file_name,
                media_type,
                byte_length: bytes.len() as u64,
                sha256,
            })
        })
        .collect()
}

fn guess_media_type(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
    .to_string()
}
