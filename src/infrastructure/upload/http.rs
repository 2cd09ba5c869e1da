//! HTTP multipart uploader adapter
//!
//! Issues the equivalent of a browser form submission: a multipart POST
//! carrying exactly one file field, following redirects to wherever the
//! endpoint navigates afterwards.

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{UploadError, UploadReceipt, Uploader};
use crate::domain::upload::AudioUpload;

/// Error body some endpoints return on rejected uploads
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Default limit for the whole request, connect included
const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// Multipart form uploader over HTTP
pub struct HttpUploader {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl HttpUploader {
    /// Create an uploader for the given endpoint URL
    pub fn new(endpoint: &str) -> Result<Self, UploadError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create an uploader with a custom request timeout
    pub fn with_timeout(
        endpoint: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, UploadError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| UploadError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::RequestFailed(format!("Failed to build client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// The endpoint this uploader submits to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Build the multipart form with the single file field
    fn build_form(audio: &AudioUpload) -> Result<reqwest::multipart::Form, UploadError> {
        let part = reqwest::multipart::Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name())
            .mime_str(audio.mime_type())
            .map_err(|e| UploadError::RequestFailed(format!("Failed to build file part: {}", e)))?;

        Ok(reqwest::multipart::Form::new().part(audio.field_name(), part))
    }

    /// Pull a human-readable message out of an error response body
    fn extract_error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => "(empty response body)".to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, audio: &AudioUpload) -> Result<UploadReceipt, UploadError> {
        let form = Self::build_form(audio)?;

        tracing::debug!(
            "Submitting {} ({}) to {}",
            audio.file_name(),
            audio.human_readable_size(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    UploadError::ConnectionFailed
                } else if e.is_timeout() {
                    UploadError::Timeout
                } else {
                    UploadError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::ServerError {
                status: status.as_u16(),
                message: Self::extract_error_message(&body),
            });
        }

        tracing::debug!("Submission accepted: HTTP {} at {}", status, final_url);

        Ok(UploadReceipt {
            status: status.as_u16(),
            final_url,
        })
    }
}
