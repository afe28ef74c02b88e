use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use super::host::EditorHost;
use super::tracker::UploadTracker;
use crate::clipboard::{self, PasteDecision, PasteEvent, PasteRoute};
use crate::config::GatewayConfig;
use crate::console::console;
use crate::error::{PasteError, PasteResult};
use crate::markup;
use crate::notify::Notifier;
use crate::upload::{ImageFile, ImageLocalizer};

/// Text ready to be spliced into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsertion {
    text: String,
    success_message: Option<String>,
}

impl PendingInsertion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success_message: None,
        }
    }

    fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splices the text into the host's *current* content and selection.
    pub fn apply<H: EditorHost + ?Sized>(&self, host: &mut H) -> PasteResult<()> {
        let target = host.insertion_target().ok_or(PasteError::MissingCaret)?;
        let (content, caret) = target.splice(&self.text);
        host.set_document(content, caret);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The host should run its built-in paste.
    NotHandled,
    Inserted(String),
    /// Already reported through the notifier.
    Failed(String),
}

/// Runs paste and upload requests from one editor.
///
/// Errors never escape: each is reported through the notifier and turned
/// into [`PasteOutcome::Failed`]. Nothing is retried.
pub struct PasteSession {
    localizer: ImageLocalizer,
    notifier: Arc<dyn Notifier>,
    tracker: UploadTracker,
}

impl PasteSession {
    pub fn new(localizer: ImageLocalizer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            localizer,
            notifier,
            tracker: UploadTracker::new(),
        }
    }

    pub fn from_config(config: &GatewayConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Ok(Self::new(ImageLocalizer::from_config(config)?, notifier))
    }

    pub fn tracker(&self) -> &UploadTracker {
        &self.tracker
    }

    pub fn is_uploading(&self) -> bool {
        self.tracker.is_uploading()
    }

    /// Synchronous phase. The host must honor `prevent_default` before
    /// awaiting anything.
    pub fn classify(&self, event: &PasteEvent) -> PasteDecision {
        clipboard::classify(event)
    }

    /// Asynchronous phase: uploads, fetches and converts as the route requires.
    /// `Ok(None)` for [`PasteRoute::Ignore`].
    pub async fn produce(&self, route: PasteRoute) -> PasteResult<Option<PendingInsertion>> {
        let pending = match route {
            PasteRoute::Image(file) => {
                let _uploading = self.tracker.begin();
                let image = self.localizer.upload_file(file).await?;
                PendingInsertion::new(image.fragment()).with_success("Image uploaded")
            }
            PasteRoute::RemoteImage(url) => {
                let _uploading = self.tracker.begin();
                let image = self.localizer.localize(&url).await?;
                PendingInsertion::new(image.fragment()).with_success("Remote image saved")
            }
            PasteRoute::Html {
                html,
                plain_fallback,
            } => self.produce_html(&html, plain_fallback).await?,
            PasteRoute::PlainText(text) => PendingInsertion::new(text),
            PasteRoute::Ignore => return Ok(None),
        };
        Ok(Some(pending))
    }

    pub async fn handle_paste<H: EditorHost + ?Sized>(
        &self,
        event: &PasteEvent,
        host: &mut H,
    ) -> PasteOutcome {
        let decision = self.classify(event);
        if !decision.prevent_default {
            return PasteOutcome::NotHandled;
        }
        let result = self.produce_and_apply(decision.route, host).await;
        self.settle(result)
    }

    /// Uploads a file chosen by the user and inserts it at the caret.
    pub async fn insert_file<H: EditorHost + ?Sized>(
        &self,
        file: ImageFile,
        host: &mut H,
    ) -> PasteOutcome {
        let result = self.produce_and_apply(PasteRoute::Image(file), host).await;
        self.settle(result)
    }

    /// Uploads a cover image and returns its absolute URL. The document is untouched.
    pub async fn upload_cover(&self, file: ImageFile) -> PasteResult<String> {
        let _uploading = self.tracker.begin();
        match self.localizer.upload_file(file).await {
            Ok(image) => {
                self.notifier.success("Cover image uploaded");
                Ok(image.url)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    async fn produce_and_apply<H: EditorHost + ?Sized>(
        &self,
        route: PasteRoute,
        host: &mut H,
    ) -> PasteResult<Option<PendingInsertion>> {
        let Some(pending) = self.produce(route).await? else {
            return Ok(None);
        };
        pending.apply(host)?;
        Ok(Some(pending))
    }

    async fn produce_html(
        &self,
        html: &str,
        plain_fallback: Option<String>,
    ) -> PasteResult<PendingInsertion> {
        let mut nodes = markup::parse_fragment(html);
        let localized = if self.localizer.config().localize_html_images {
            self.localize_html_images(&mut nodes).await
        } else {
            0
        };

        let text = markup::convert(&nodes);
        if text.trim().is_empty() {
            console().debug("HTML converted to nothing, trying plain text");
            return match plain_fallback {
                Some(plain) => Ok(PendingInsertion::new(plain)),
                None => Err(PasteError::MalformedInput(
                    "the pasted content has no text".to_string(),
                )),
            };
        }

        let pending = PendingInsertion::new(text);
        Ok(match localized {
            0 => pending,
            1 => pending.with_success("1 image saved to the blog"),
            n => pending.with_success(format!("{} images saved to the blog", n)),
        })
    }

    /// Re-hosts remote `<img>` sources. Failures keep the original source.
    async fn localize_html_images(&self, nodes: &mut [markup::MarkupNode]) -> usize {
        let sources = markup::remote_image_sources(nodes);
        if sources.is_empty() {
            return 0;
        }

        let _uploading = self.tracker.begin();
        let mut replacements = HashMap::new();
        for source in sources {
            match self.localizer.localize(&source).await {
                Ok(image) => {
                    replacements.insert(source, image.url);
                }
                Err(err) => {
                    console().verbose(&format!("Keeping {}: {}", source, err));
                    self.notifier.error(&format!(
                        "Could not save {}: {}",
                        source,
                        err.user_message()
                    ));
                }
            }
        }

        markup::rewrite_image_sources(nodes, &replacements);
        replacements.len()
    }

    fn settle(&self, result: PasteResult<Option<PendingInsertion>>) -> PasteOutcome {
        match result {
            Ok(Some(pending)) => {
                if let Some(message) = &pending.success_message {
                    self.notifier.success(message);
                }
                PasteOutcome::Inserted(pending.text)
            }
            Ok(None) => PasteOutcome::NotHandled,
            Err(err) => {
                self.report(&err);
                PasteOutcome::Failed(err.user_message())
            }
        }
    }

    fn report(&self, err: &PasteError) {
        console().verbose(&format!("Paste failed ({:?}): {}", err.kind(), err));
        self.notifier.error(&err.user_message());
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
