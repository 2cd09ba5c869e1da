//! CLI layer: argument parsing, output formatting, and command runners

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod devices_cmd;
pub mod presenter;
pub mod signals;

pub use app::{merge_config, run_record, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RecordOptions};
pub use presenter::Presenter;
