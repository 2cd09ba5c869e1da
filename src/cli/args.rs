//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// Voicedrop - record a voice note and submit it to an HTTP endpoint
#[derive(Parser, Debug)]
#[command(name = "voicedrop")]
#[command(version)]
#[command(about = "Record audio from the microphone and submit it to an HTTP endpoint")]
#[command(long_about = None)]
pub struct Cli {
    /// Endpoint URL to submit the recording to
    #[arg(value_name = "ENDPOINT")]
    pub endpoint: Option<String>,

    /// Safety limit for the recording (e.g., 30s, 2m, 2m30s)
    #[arg(short = 'm', long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Input device name (default input device if omitted)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List available audio input devices
    Devices,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed record options
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub endpoint: String,
    pub max_duration: Duration,
    pub notify: bool,
    pub device: Option<String>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "max_duration", "notify", "device"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
