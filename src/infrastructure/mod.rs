//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio device, the HTTP endpoint, the desktop,
//! and the filesystem.

pub mod config;
pub mod notification;
pub mod recording;
pub mod upload;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::NotifyRustNotifier;
pub use recording::CpalRecorder;
pub use upload::HttpUploader;
