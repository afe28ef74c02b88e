use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::clipboard::{PasteEvent, PasteRoute};
use crate::clipboard::system::{image_item_from_bytes, read_system_clipboard, sniff_mime_type};
use crate::config::GatewayConfig;
use crate::console::console;
use crate::editor::{Document, PasteOutcome, PasteSession, Selection};
use crate::markup::html_to_markup;
use crate::terminal_spinner::TerminalSpinner;
use crate::upload::ImageFile;

/// Clipboard representations given on the command line.
#[derive(Debug, Default)]
pub struct PasteSource {
    pub html: Option<PathBuf>,
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub from_clipboard: bool,
}

pub fn handle_convert(file: Option<&Path>) -> Result<()> {
    let html = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read HTML from stdin")?;
            html
        }
    };
    print!("{}", html_to_markup(&html));
    Ok(())
}

pub async fn handle_paste(
    gateway: &GatewayConfig,
    doc_path: &Path,
    caret: Option<&str>,
    source: PasteSource,
) -> Result<bool> {
    let event = build_event(source)?;
    if event.is_empty() {
        console().warning("Nothing on the clipboard to paste");
        return Ok(false);
    }
    let mut document = load_document(doc_path, caret)?;
    let session = PasteSession::from_config(gateway, console())?;

    let mut spinner = TerminalSpinner::new("Uploading...");
    spinner.start(session.tracker().clone());
    let outcome = session.handle_paste(&event, &mut document).await;
    spinner.stop();

    finish(outcome, doc_path, &document)
}

pub async fn handle_upload(
    gateway: &GatewayConfig,
    file: &Path,
    doc: Option<(&Path, Option<&str>)>,
) -> Result<bool> {
    let image = read_image_file(file)?;
    let target = match doc {
        Some((doc_path, caret)) => Some((doc_path, load_document(doc_path, caret)?)),
        None => None,
    };
    let session = PasteSession::from_config(gateway, console())?;

    let mut spinner = TerminalSpinner::new("Uploading...");
    spinner.start(session.tracker().clone());

    let succeeded = match target {
        Some((doc_path, mut document)) => {
            let outcome = session.insert_file(image, &mut document).await;
            spinner.stop();
            finish(outcome, doc_path, &document)?
        }
        None => {
            let result = session.upload_cover(image).await;
            spinner.stop();
            match result {
                Ok(url) => {
                    console().plain(&url);
                    true
                }
                Err(_) => false,
            }
        }
    };

    Ok(succeeded)
}

pub async fn handle_localize(gateway: &GatewayConfig, url: &str) -> Result<bool> {
    let session = PasteSession::from_config(gateway, console())?;

    let mut spinner = TerminalSpinner::new("Saving remote image...");
    spinner.start(session.tracker().clone());
    let result = session.produce(PasteRoute::RemoteImage(url.to_string())).await;
    spinner.stop();

    match result {
        Ok(Some(pending)) => {
            print!("{}", pending.text());
            Ok(true)
        }
        Ok(None) => Ok(false),
        Err(e) => {
            console().error(&e.user_message());
            console().verbose(&e.to_string());
            Ok(false)
        }
    }
}

fn finish(outcome: PasteOutcome, doc_path: &Path, document: &Document) -> Result<bool> {
    match outcome {
        PasteOutcome::Inserted(text) => {
            fs::write(doc_path, document.content())
                .with_context(|| format!("Failed to write {}", doc_path.display()))?;
            console().verbose(&format!(
                "Inserted {} characters into {}",
                text.chars().count(),
                doc_path.display()
            ));
            Ok(true)
        }
        PasteOutcome::NotHandled => {
            console().info("Nothing to paste");
            Ok(false)
        }
        PasteOutcome::Failed(_) => Ok(false),
    }
}

fn build_event(source: PasteSource) -> Result<PasteEvent> {
    if source.from_clipboard {
        return read_system_clipboard();
    }

    let mut event = PasteEvent::default();
    if let Some(path) = &source.image {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        event = event.with_item(image_item_from_bytes(bytes));
    }
    if let Some(path) = &source.html {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        event = event.with_html(html);
    }
    if let Some(text) = source.text {
        event = event.with_text(text);
    }
    Ok(event)
}

/// Missing documents start empty. Without `caret` the caret sits at the end.
fn load_document(path: &Path, caret: Option<&str>) -> Result<Document> {
    let content = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };
    let document = Document::new(content);

    match caret {
        Some(value) => {
            let selection = Selection::parse(value)
                .ok_or_else(|| anyhow!("Invalid caret '{}', expected S or S:E", value))?;
            Ok(document.with_selection(selection))
        }
        None => Ok(document.with_caret_at_end()),
    }
}

fn read_image_file(path: &Path) -> Result<ImageFile> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageFile::new(name, sniff_mime_type(&bytes), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_document_defaults_caret_to_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "héllo").unwrap();

        let document = load_document(&path, None).unwrap();

        assert_eq!(document.content(), "héllo");
        assert_eq!(document.selection(), Some(Selection::caret(5)));
    }

    #[test]
    fn test_load_document_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();

        let document = load_document(&dir.path().join("new.md"), Some("0")).unwrap();

        assert_eq!(document.content(), "");
        assert_eq!(document.selection(), Some(Selection::caret(0)));
    }

    #[test]
    fn test_load_document_rejects_bad_caret() {
        let dir = TempDir::new().unwrap();

        assert!(load_document(&dir.path().join("a.md"), Some("end")).is_err());
    }

    #[test]
    fn test_build_event_orders_representations() {
        let dir = TempDir::new().unwrap();
        let html_path = dir.path().join("clip.html");
        fs::write(&html_path, "<p>hi</p>").unwrap();

        let event = build_event(PasteSource {
            html: Some(html_path),
            text: Some("hi".to_string()),
            ..PasteSource::default()
        })
        .unwrap();

        assert_eq!(event.html(), Some("<p>hi</p>"));
        assert_eq!(event.plain_text(), Some("hi"));
    }

    #[test]
    fn test_read_image_file_sniffs_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shot");
        let png = crate::clipboard::system::encode_rgba_as_png(1, 1, &[0, 0, 0, 255]).unwrap();
        fs::write(&path, png).unwrap();

        let file = read_image_file(&path).unwrap();

        assert_eq!(file.name, "shot");
        assert_eq!(file.mime_type, "image/png");
    }

    #[test]
    fn test_read_image_file_unknown_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain words").unwrap();

        let file = read_image_file(&path).unwrap();

        assert!(!file.mime_type.starts_with("image/"));
    }

    #[tokio::test]
    async fn test_handle_paste_with_empty_clipboard_leaves_document_alone() {
        let dir = TempDir::new().unwrap();
        let doc_path = dir.path().join("post.md");

        let handled = handle_paste(
            &GatewayConfig::default(),
            &doc_path,
            None,
            PasteSource::default(),
        )
        .await
        .unwrap();

        assert!(!handled);
        assert!(!doc_path.exists());
    }

    #[tokio::test]
    async fn test_handle_upload_rejects_bad_caret_before_uploading() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("shot.png");
        let png = crate::clipboard::system::encode_rgba_as_png(1, 1, &[0, 0, 0, 255]).unwrap();
        fs::write(&image_path, png).unwrap();
        let doc_path = dir.path().join("post.md");
        fs::write(&doc_path, "draft").unwrap();

        let result = handle_upload(
            &GatewayConfig::with_base_url("http://127.0.0.1:9"),
            &image_path,
            Some((doc_path.as_path(), Some("nowhere"))),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&doc_path).unwrap(), "draft");
    }
}
