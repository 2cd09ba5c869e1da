//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod recorder;
pub mod uploader;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use recorder::{Recorder, RecordingError};
pub use uploader::{UploadError, UploadReceipt, Uploader};
