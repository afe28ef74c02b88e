use chrono::Utc;
use rand::Rng;

use crate::error::{PasteError, PasteResult};

/// An uploadable image: a name, a MIME type and the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Wraps bytes fetched from `url`, named and typed after the URL's extension.
    pub fn from_remote(url: &str, bytes: Vec<u8>) -> Self {
        let extension = derive_extension(url);
        Self {
            name: format!("image.{}", extension),
            mime_type: format!("image/{}", extension),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self, max_size: u64) -> PasteResult<()> {
        if self.size() > max_size {
            return Err(PasteError::FileTooLarge {
                size: self.size(),
                limit: max_size,
            });
        }
        if !self.mime_type.starts_with("image/") {
            return Err(PasteError::NotAnImage {
                mime: self.mime_type.clone(),
            });
        }
        Ok(())
    }
}

/// Extension of the URL's last path segment, ignoring any query or fragment.
/// Case is preserved; `png` when the segment has no extension.
pub fn derive_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() => extension.to_string(),
        _ => "png".to_string(),
    }
}

/// `image-<unix millis>-<0..999>`, used as alt text for uploaded images.
pub fn unique_image_name() -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random: u32 = rand::thread_rng().gen_range(0..1000);
    format!("image-{}-{}", timestamp, random)
}

/// An image stored by the upload gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub name: String,
    /// Absolute first-party URL.
    pub url: String,
}

impl UploadedImage {
    pub fn fragment(&self) -> String {
        format!("![{}]({})\n", self.name, self.url)
    }
}
