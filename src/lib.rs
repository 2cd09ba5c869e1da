//! Voicedrop: record a voice note and submit it to an HTTP endpoint.
//!
//! The crate follows a hexagonal layout:
//! - `domain`: session state machine, fragment buffer, and config value
//!   objects with no I/O
//! - `application`: the record-and-submit use case and the ports it
//!   depends on
//! - `infrastructure`: cpal capture, WAV assembly, HTTP multipart
//!   submission, desktop notifications, and XDG config storage
//! - `cli`: argument parsing and the terminal front end

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
