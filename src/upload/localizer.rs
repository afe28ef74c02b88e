use std::sync::Arc;

use anyhow::Result;

use super::fetcher::{HttpImageFetcher, ImageFetcher};
use super::gateway::{HttpUploadGateway, UploadGateway};
use super::image_file::{ImageFile, UploadedImage, unique_image_name};
use crate::config::GatewayConfig;
use crate::console::console;
use crate::error::PasteResult;

/// Validates images and stores them through the upload gateway, fetching
/// remote ones first.
#[derive(Clone)]
pub struct ImageLocalizer {
    gateway: Arc<dyn UploadGateway>,
    fetcher: Arc<dyn ImageFetcher>,
    config: GatewayConfig,
}

impl ImageLocalizer {
    pub fn new(
        gateway: Arc<dyn UploadGateway>,
        fetcher: Arc<dyn ImageFetcher>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            gateway,
            fetcher,
            config,
        }
    }

    /// HTTP gateway and fetcher sharing one cookie-carrying client.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = super::http::build_client(config)?;
        Ok(Self::new(
            Arc::new(HttpUploadGateway::with_client(client.clone(), config)),
            Arc::new(HttpImageFetcher::with_client(client)),
            config.clone(),
        ))
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Uploads a local image. Nothing is sent when validation fails.
    pub async fn upload_file(&self, file: ImageFile) -> PasteResult<UploadedImage> {
        file.validate(self.config.max_file_size)?;

        let result = self.gateway.upload(&file).await?;
        let url = self.config.absolute_url(&result.url);
        console().verbose(&format!("Stored {} at {}", file.name, url));

        Ok(UploadedImage {
            name: unique_image_name(),
            url,
        })
    }

    /// Re-hosts a remote image on the blog's own storage.
    pub async fn localize(&self, url: &str) -> PasteResult<UploadedImage> {
        let bytes = self.fetcher.fetch(url, self.config.max_file_size).await?;
        self.upload_file(ImageFile::from_remote(url, bytes)).await
    }
}
