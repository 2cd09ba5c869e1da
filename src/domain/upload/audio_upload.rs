//! Audio upload value object

/// The submission contract is fixed: one multipart file field with this
/// name, filename, and MIME type. The receiving endpoint keys on the
/// field name, so none of these are configurable.
pub const FIELD_NAME: &str = "audio_data";
pub const FILE_NAME: &str = "recording.wav";
pub const MIME_TYPE: &str = "audio/wav";

/// Value object representing an assembled recording ready for submission.
/// Holds the finished WAV bytes.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    data: Vec<u8>,
}

impl AudioUpload {
    /// Create an upload artifact from WAV bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Get the WAV bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the WAV bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Multipart field name the artifact is submitted under
    pub const fn field_name(&self) -> &'static str {
        FIELD_NAME
    }

    /// Filename attached to the multipart part
    pub const fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    /// MIME type attached to the multipart part
    pub const fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
