use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::GatewayConfig;

/// Shared client for gateway uploads and remote fetches.
///
/// The cookie store carries the admin session cookie between requests.
pub fn build_client(config: &GatewayConfig) -> Result<reqwest::Client> {
    let mut client_builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true);

    if let Ok(http_proxy) = std::env::var("HTTP_PROXY")
        && let Ok(proxy) = reqwest::Proxy::http(&http_proxy)
    {
        client_builder = client_builder.proxy(proxy);
    }

    if let Ok(https_proxy) = std::env::var("HTTPS_PROXY")
        && let Ok(proxy) = reqwest::Proxy::https(&https_proxy)
    {
        client_builder = client_builder.proxy(proxy);
    }

    client_builder
        .build()
        .context("Failed to build HTTP client")
}
