//! Builds a [`PasteEvent`] from the operating system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::io::Cursor;

use super::{ClipboardItem, PasteEvent};
use crate::console::console;

/// Snapshot the system clipboard. Images arrive as raw RGBA and are
/// re-encoded as PNG so they upload like a browser-pasted screenshot.
pub fn read_system_clipboard() -> Result<PasteEvent> {
    let mut clipboard = Clipboard::new().context("Failed to open system clipboard")?;
    let mut event = PasteEvent::default();

    match clipboard.get_image() {
        Ok(image) => {
            let png = encode_rgba_as_png(image.width, image.height, &image.bytes)?;
            console().debug(&format!(
                "System clipboard image {}x{} ({} bytes as PNG)",
                image.width,
                image.height,
                png.len()
            ));
            event = event.with_image("image/png", png);
        }
        Err(e) => console().debug(&format!("No image on system clipboard: {}", e)),
    }

    match clipboard.get_text() {
        Ok(text) => event = event.with_text(text),
        Err(e) => console().debug(&format!("No text on system clipboard: {}", e)),
    }

    Ok(event)
}

pub fn encode_rgba_as_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>> {
    if width.checked_mul(height).and_then(|px| px.checked_mul(4)) != Some(rgba.len()) {
        anyhow::bail!(
            "Clipboard image buffer is {} bytes, expected {}x{} RGBA",
            rgba.len(),
            width,
            height
        );
    }

    let mut png = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut png),
        rgba,
        u32::try_from(width).context("Clipboard image too wide")?,
        u32::try_from(height).context("Clipboard image too tall")?,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("Failed to encode clipboard image as PNG")?;
    Ok(png)
}

/// Item for an image file on disk, typed by sniffing its bytes.
pub fn image_item_from_bytes(bytes: Vec<u8>) -> ClipboardItem {
    ClipboardItem::bytes(sniff_mime_type(&bytes), bytes)
}

/// MIME type from the file signature; `application/octet-stream` when unknown.
pub fn sniff_mime_type(bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}
