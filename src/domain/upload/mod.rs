//! Submission artifact value objects

pub mod audio_upload;

pub use audio_upload::{AudioUpload, FIELD_NAME, FILE_NAME, MIME_TYPE};
