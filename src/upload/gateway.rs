use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::http::build_client;
use super::image_file::ImageFile;
use crate::config::GatewayConfig;
use crate::console::console;
use crate::error::{PasteError, PasteResult};

/// What the gateway hands back for a stored file. `url` may be relative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

#[async_trait]
pub trait UploadGateway: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> PasteResult<UploadResult>;
}

/// `{ "success": bool, "data": { "url": ... }, "message": ... }`
#[derive(Debug, Deserialize)]
struct GatewayEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<UploadResult>,
    #[serde(default)]
    message: Option<String>,
}

/// Posts images as multipart form data to the blog's upload endpoint.
pub struct HttpUploadGateway {
    client: reqwest::Client,
    upload_url: String,
    field_name: String,
}

impl HttpUploadGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    pub fn with_client(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            upload_url: config.upload_url(),
            field_name: config.field_name.clone(),
        }
    }

    fn form_for(&self, file: &ImageFile) -> PasteResult<Form> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|_| PasteError::NotAnImage {
                mime: file.mime_type.clone(),
            })?;
        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl UploadGateway for HttpUploadGateway {
    async fn upload(&self, file: &ImageFile) -> PasteResult<UploadResult> {
        console().verbose(&format!(
            "Uploading {} ({} bytes, {}) to {}",
            file.name,
            file.size(),
            file.mime_type,
            self.upload_url
        ));

        let form = self.form_for(file)?;
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        console().debug(&format!("Upload response {}: {}", status, body));

        let envelope = serde_json::from_str::<GatewayEnvelope>(&body);

        if !status.is_success() {
            // A 401 keeps its status so the caller can ask the user to sign in.
            if status.as_u16() != 401
                && let Ok(GatewayEnvelope {
                    message: Some(message),
                    ..
                }) = envelope
            {
                return Err(PasteError::UploadRejected { message });
            }
            return Err(PasteError::HttpStatus {
                url: self.upload_url.clone(),
                status: status.as_u16(),
            });
        }

        let envelope =
            envelope.map_err(|e| PasteError::InvalidResponse(format!("unreadable body: {}", e)))?;

        if !envelope.success {
            return Err(PasteError::UploadRejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "the gateway did not accept the image".to_string()),
            });
        }

        match envelope.data {
            Some(result) if !result.url.is_empty() => Ok(result),
            _ => Err(PasteError::InvalidResponse(
                "response is missing data.url".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn png_file() -> ImageFile {
        ImageFile::new("image.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    async fn gateway_for(server: &MockServer) -> HttpUploadGateway {
        HttpUploadGateway::new(&GatewayConfig::with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_upload_posts_multipart_and_returns_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/upload"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "url": "/uploads/abc.png" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway_for(&server).await.upload(&png_file()).await.unwrap();

        assert_eq!(result.url, "/uploads/abc.png");
    }

    #[tokio::test]
    async fn test_upload_sends_configured_field_and_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "url": "/u.png" }
            })))
            .mount(&server)
            .await;

        let mut config = GatewayConfig::with_base_url(server.uri());
        config.field_name = "image".to_string();
        let gateway = HttpUploadGateway::new(&config).unwrap();
        gateway.upload(&png_file()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains(r#"name="image""#));
        assert!(body.contains(r#"filename="image.png""#));
        assert!(body.contains("image/png"));
    }

    #[tokio::test]
    async fn test_upload_reports_gateway_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "storage quota exceeded"
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        match err {
            PasteError::UploadRejected { message } => {
                assert_eq!(message, "storage quota exceeded")
            }
            other => panic!("Expected UploadRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_unauthorized_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "not logged in"
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        assert!(matches!(err, PasteError::HttpStatus { status: 401, .. }));
        assert!(err.user_message().contains("sign in"));
    }

    #[tokio::test]
    async fn test_upload_server_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "message": "disk full"
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        assert!(matches!(err, PasteError::UploadRejected { .. }));
    }

    #[tokio::test]
    async fn test_upload_server_error_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        assert!(matches!(err, PasteError::HttpStatus { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_upload_rejects_success_without_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        assert!(matches!(err, PasteError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).await.upload(&png_file()).await.unwrap_err();

        assert!(matches!(err, PasteError::InvalidResponse(_)));
    }
}
