use anyhow::Result;
use async_trait::async_trait;

use super::http::build_client;
use crate::config::GatewayConfig;
use crate::console::console;
use crate::error::{PasteError, PasteResult};

/// Downloads remote image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fails with [`PasteError::FileTooLarge`] as soon as the body is known to exceed `max_size`.
    async fn fetch(&self, url: &str, max_size: u64) -> PasteResult<Vec<u8>>;
}

pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(config)?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str, max_size: u64) -> PasteResult<Vec<u8>> {
        console().verbose(&format!("Fetching remote image {}", url));

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PasteError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length()
            && length > max_size
        {
            return Err(PasteError::FileTooLarge {
                size: length,
                limit: max_size,
            });
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let size = (bytes.len() + chunk.len()) as u64;
            if size > max_size {
                return Err(PasteError::FileTooLarge {
                    size,
                    limit: max_size,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        console().debug(&format!("Fetched {} bytes from {}", bytes.len(), url));
        Ok(bytes)
    }
}
