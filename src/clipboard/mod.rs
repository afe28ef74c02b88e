pub mod system;

use regex::Regex;
use std::sync::OnceLock;

use crate::console::console;
use crate::upload::ImageFile;

pub const HTML_MIME: &str = "text/html";
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// Accessor for one clipboard representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardPayload {
    Bytes(Vec<u8>),
    Text(String),
    /// The platform advertised the type but could not hand over its data.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardItem {
    pub mime_type: String,
    pub payload: ClipboardPayload,
}

impl ClipboardItem {
    pub fn bytes(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: ClipboardPayload::Bytes(bytes),
        }
    }

    pub fn text(mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: ClipboardPayload::Text(text.into()),
        }
    }

    pub fn unavailable(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: ClipboardPayload::Unavailable,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            ClipboardPayload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The item as an uploadable file, named after its subtype (`image.png`).
    pub fn as_image_file(&self) -> Option<ImageFile> {
        if !self.is_image() {
            return None;
        }
        let ClipboardPayload::Bytes(bytes) = &self.payload else {
            return None;
        };
        let subtype = self.mime_type.trim_start_matches("image/");
        Some(ImageFile::new(
            format!("image.{}", subtype),
            self.mime_type.clone(),
            bytes.clone(),
        ))
    }
}

/// The clipboard contents handed over by the editor host on paste.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasteEvent {
    pub items: Vec<ClipboardItem>,
}

impl PasteEvent {
    pub fn new(items: Vec<ClipboardItem>) -> Self {
        Self { items }
    }

    pub fn with_item(mut self, item: ClipboardItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_html(self, html: impl Into<String>) -> Self {
        self.with_item(ClipboardItem::text(HTML_MIME, html))
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_item(ClipboardItem::text(PLAIN_TEXT_MIME, text))
    }

    pub fn with_image(self, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.with_item(ClipboardItem::bytes(mime_type, bytes))
    }

    pub fn html(&self) -> Option<&str> {
        self.text_of(HTML_MIME)
    }

    pub fn plain_text(&self) -> Option<&str> {
        self.text_of(PLAIN_TEXT_MIME)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn text_of(&self, mime_type: &str) -> Option<&str> {
        self.items
            .iter()
            .filter(|item| item.mime_type == mime_type)
            .find_map(ClipboardItem::as_text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PasteRoute {
    /// Raw image data, uploaded as-is.
    Image(ImageFile),
    /// HTML fragment to convert. The plain-text alternative is kept for
    /// fragments that convert to nothing.
    Html {
        html: String,
        plain_fallback: Option<String>,
    },
    /// Plain text that looks like an image URL; fetched and re-uploaded.
    RemoteImage(String),
    /// Plain text inserted verbatim.
    PlainText(String),
    /// Nothing usable; native paste proceeds.
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasteDecision {
    pub route: PasteRoute,
    /// Whether the host must suppress its built-in paste handling.
    pub prevent_default: bool,
}

impl PasteDecision {
    fn handled(route: PasteRoute) -> Self {
        Self {
            route,
            prevent_default: true,
        }
    }

    fn ignored() -> Self {
        Self {
            route: PasteRoute::Ignore,
            prevent_default: false,
        }
    }
}

/// Picks exactly one handling path: image > HTML > plain text.
pub fn classify(event: &PasteEvent) -> PasteDecision {
    if let Some(file) = event.items.iter().find_map(ClipboardItem::as_image_file) {
        console().debug(&format!(
            "Paste classified as image ({}, {} bytes)",
            file.mime_type,
            file.size()
        ));
        return PasteDecision::handled(PasteRoute::Image(file));
    }

    let plain = event.plain_text().filter(|text| !text.is_empty());

    if let Some(html) = event.html().filter(|html| !html.trim().is_empty()) {
        console().debug(&format!("Paste classified as HTML ({} bytes)", html.len()));
        return PasteDecision::handled(PasteRoute::Html {
            html: html.to_string(),
            plain_fallback: plain.map(str::to_string),
        });
    }

    match plain {
        Some(text) if is_image_url(text.trim()) => {
            console().debug(&format!("Paste classified as remote image: {}", text.trim()));
            PasteDecision::handled(PasteRoute::RemoteImage(text.trim().to_string()))
        }
        Some(text) => {
            console().debug(&format!("Paste classified as plain text ({} chars)", text.chars().count()));
            PasteDecision::handled(PasteRoute::PlainText(text.to_string()))
        }
        None => PasteDecision::ignored(),
    }
}

/// `http(s)://...` ending in a common image extension, optionally followed by a query.
pub fn is_image_url(text: &str) -> bool {
    static IMAGE_URL_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_URL_REGEX
        .get_or_init(|| {
            Regex::new(r"(?i)^https?://.*\.(jpg|jpeg|png|gif|webp)(\?.*)?$")
                .expect("Failed to compile image URL regex")
        })
        .is_match(text)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
