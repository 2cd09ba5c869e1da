//! Upload port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::upload::AudioUpload;

/// Upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to connect to the endpoint. Check the URL and your network connection.")]
    ConnectionFailed,

    #[error("The endpoint did not respond in time")]
    Timeout,

    #[error("Server rejected the upload (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Upload request failed: {0}")]
    RequestFailed(String),
}

/// Receipt for a completed submission.
///
/// The server's handling of the audio is its own business; the receipt
/// only records that the submission landed and where navigation ended up
/// after redirects.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Final HTTP status
    pub status: u16,
    /// URL the submission resolved to after redirects
    pub final_url: String,
}

/// Port for submitting one assembled recording to an endpoint
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Submit the artifact as a multipart form with exactly one file
    /// field, per the contract carried by [`AudioUpload`].
    async fn upload(&self, audio: &AudioUpload) -> Result<UploadReceipt, UploadError>;
}
