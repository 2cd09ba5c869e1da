//! Record command runner
//!
//! Wires the concrete adapters into the use case and drives one
//! recording session from start to submission (or discard).

use tokio::time::{interval, Duration as TokioDuration};

use crate::application::{SubmitConfig, SubmitRecordingUseCase};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CpalRecorder, HttpUploader, NotifyRustNotifier};

use super::args::RecordOptions;
use super::presenter::Presenter;
use super::signals::{StopEvent, StopListener};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for runtime errors
pub const EXIT_ERROR: i32 = 1;
/// Exit code for usage errors
pub const EXIT_USAGE_ERROR: i32 = 2;

/// Environment variable override for the endpoint
pub const ENDPOINT_ENV_VAR: &str = "VOICEDROP_ENDPOINT";

/// Merge config layers: defaults < file < environment < CLI flags
pub fn merge_config(file_config: AppConfig, cli_config: AppConfig) -> AppConfig {
    let mut env_config = AppConfig::empty();
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
        if !endpoint.is_empty() {
            env_config.endpoint = Some(endpoint);
        }
    }

    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Run one recording session: record, then submit or discard.
///
/// Returns the process exit code.
pub async fn run_record(options: RecordOptions, presenter: &mut Presenter) -> i32 {
    let recorder = CpalRecorder::new(options.device.clone());

    let uploader = match HttpUploader::new(&options.endpoint) {
        Ok(uploader) => uploader,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_USAGE_ERROR;
        }
    };

    let use_case = SubmitRecordingUseCase::new(
        recorder,
        uploader,
        NotifyRustNotifier::new(),
        SubmitConfig {
            max_duration: options.max_duration,
            enable_notify: options.notify,
        },
    );

    // Capability check is terminal: no partial session may start.
    if let Err(e) = use_case.check_capability() {
        presenter.error(&format!("Audio capture unavailable: {}", e));
        tracing::error!("Capability check failed: {}", e);
        return EXIT_ERROR;
    }

    if let Err(e) = use_case.start_recording().await {
        presenter.error(&format!("Could not start recording: {}", e));
        tracing::error!("Start failed: {}", e);
        return EXIT_ERROR;
    }

    tracing::info!("Recording started (limit {})", options.max_duration);
    presenter.start_spinner("Recording... 0:00 (Enter to submit, Ctrl+C to discard)");

    let mut listener = StopListener::spawn();
    let mut ticker = interval(TokioDuration::from_millis(250));

    let event = loop {
        tokio::select! {
            event = listener.recv() => {
                // A closed channel means both listener tasks died; treat
                // it as a discard rather than recording forever.
                break event.unwrap_or(StopEvent::Cancel);
            }
            _ = ticker.tick() => {
                if use_case.max_duration_reached() {
                    tracing::info!("Recording limit reached, stopping");
                    break StopEvent::Submit;
                }
                presenter.update_spinner(&format!(
                    "Recording... {} (Enter to submit, Ctrl+C to discard)",
                    presenter.format_elapsed(use_case.elapsed_ms())
                ));
            }
        }
    };

    match event {
        StopEvent::Cancel => {
            presenter.stop_spinner();
            if let Err(e) = use_case.cancel().await {
                presenter.error(&format!("Discard failed: {}", e));
                return EXIT_ERROR;
            }
            presenter.warn("Recording discarded");
            tracing::info!("Recording discarded by user");
            EXIT_SUCCESS
        }
        StopEvent::Submit => {
            let elapsed = presenter.format_elapsed(use_case.elapsed_ms());
            presenter.update_spinner("Processing...");

            match use_case.stop_and_submit().await {
                Ok(output) => {
                    presenter.spinner_success(&format!(
                        "Submitted {} of audio ({}, HTTP {})",
                        elapsed, output.audio_size, output.status
                    ));
                    if output.final_url != options.endpoint {
                        presenter.info(&format!("Endpoint redirected to {}", output.final_url));
                    }
                    tracing::info!(
                        "Submission succeeded: {} -> HTTP {}",
                        output.audio_size,
                        output.status
                    );
                    EXIT_SUCCESS
                }
                Err(e) => {
                    presenter.spinner_fail(&format!("Submission failed: {}", e));
                    tracing::error!("Submission failed: {}", e);
                    EXIT_ERROR
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_cli_over_file() {
        let file = AppConfig {
            endpoint: Some("http://file.example/upload".to_string()),
            max_duration: Some("5m".to_string()),
            notify: None,
            device: None,
        };
        let cli = AppConfig {
            endpoint: Some("http://cli.example/upload".to_string()),
            max_duration: None,
            notify: Some(true),
            device: None,
        };

        let merged = merge_config(file, cli);
        assert_eq!(
            merged.endpoint,
            Some("http://cli.example/upload".to_string())
        );
        assert_eq!(merged.max_duration, Some("5m".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_falls_back_to_defaults() {
        let merged = merge_config(AppConfig::empty(), AppConfig::empty());
        assert_eq!(merged.max_duration, Some("10m".to_string()));
        assert_eq!(merged.notify, Some(false));
    }
}
