//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::upload::AudioUpload;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Audio input device \"{0}\" not found")]
    DeviceNotFound(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("No audio data captured")]
    NoDataCaptured,
}

/// Port for a signal-controlled recording session
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Check that audio capture is available at all.
    ///
    /// Fails if no usable input device exists. Called before any
    /// recording is attempted; a failure here is terminal.
    fn probe(&self) -> Result<(), RecordingError>;

    /// Start capturing. The input stream is acquired here; this is the
    /// only suspension point in the capture flow.
    async fn start(&self) -> Result<(), RecordingError>;

    /// Stop capturing and assemble the collected fragments into the
    /// submission artifact.
    async fn stop(&self) -> Result<AudioUpload, RecordingError>;

    /// Discard the session without producing an artifact.
    async fn cancel(&self) -> Result<(), RecordingError>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Get elapsed recording time in milliseconds
    fn elapsed_ms(&self) -> u64;
}
