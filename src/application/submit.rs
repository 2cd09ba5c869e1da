//! Record-and-submit use case

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::recording::{Duration, InvalidStateTransition, RecordingSession, SessionState};

use super::ports::{
    NotificationIcon, Notifier, Recorder, RecordingError, UploadError, UploadReceipt, Uploader,
};

/// Errors from the record-and-submit use case
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Submission failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Configuration for the use case
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Safety limit for one recording session
    pub max_duration: Duration,
    /// Whether to show desktop notifications
    pub enable_notify: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            max_duration: Duration::default_max_duration(),
            enable_notify: false,
        }
    }
}

/// Output from a completed submission
#[derive(Debug, Clone)]
pub struct SubmitOutput {
    /// HTTP status the submission resolved to
    pub status: u16,
    /// URL the submission resolved to after redirects
    pub final_url: String,
    /// Artifact size in human-readable format
    pub audio_size: String,
}

/// Record-and-submit use case.
///
/// Owns the session state machine and orchestrates the capture ->
/// assemble -> submit flow. One instance manages exactly one session:
/// start it, then either stop (which submits) or cancel (which discards).
/// The state machine is what guarantees at most one submission per
/// session regardless of how many stop requests arrive.
pub struct SubmitRecordingUseCase<R, U, N>
where
    R: Recorder,
    U: Uploader,
    N: Notifier,
{
    recorder: R,
    uploader: U,
    notifier: N,
    session: Arc<Mutex<RecordingSession>>,
    config: SubmitConfig,
}

impl<R, U, N> SubmitRecordingUseCase<R, U, N>
where
    R: Recorder,
    U: Uploader,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(recorder: R, uploader: U, notifier: N, config: SubmitConfig) -> Self {
        Self {
            recorder,
            uploader,
            notifier,
            session: Arc::new(Mutex::new(RecordingSession::new())),
            config,
        }
    }

    /// Get current session state
    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    /// Check that audio capture is available.
    /// A failure here is terminal: nothing else may run.
    pub fn check_capability(&self) -> Result<(), RecordingError> {
        self.recorder.probe()
    }

    /// Start the recording session
    pub async fn start_recording(&self) -> Result<(), SubmitError> {
        {
            let mut session = self.session.lock().await;
            session.begin()?;
        }

        if self.config.enable_notify {
            let _ = self
                .notifier
                .notify("Voicedrop", "Recording...", NotificationIcon::Recording)
                .await;
        }

        self.recorder.start().await?;

        Ok(())
    }

    /// Stop the recording, assemble the artifact, and submit it.
    ///
    /// Only valid while recording. The transition to Finalizing happens
    /// before anything else, so a concurrent or repeated stop request
    /// fails the transition and can never reach the uploader.
    pub async fn stop_and_submit(&self) -> Result<SubmitOutput, SubmitError> {
        {
            let mut session = self.session.lock().await;
            session.finalize()?;
        }

        if self.config.enable_notify {
            let _ = self
                .notifier
                .notify("Voicedrop", "Processing...", NotificationIcon::Processing)
                .await;
        }

        let audio = self.recorder.stop().await?;
        let audio_size = audio.human_readable_size();

        let receipt: UploadReceipt = self.uploader.upload(&audio).await?;

        if self.config.enable_notify {
            let _ = self
                .notifier
                .notify(
                    "Voicedrop",
                    &format!("Recording submitted ({})", audio_size),
                    NotificationIcon::Success,
                )
                .await;
        }

        Ok(SubmitOutput {
            status: receipt.status,
            final_url: receipt.final_url,
            audio_size,
        })
    }

    /// Discard the session without submitting.
    ///
    /// Ends the session the same way stop does, so nothing can submit
    /// after a discard either.
    pub async fn cancel(&self) -> Result<(), SubmitError> {
        {
            let mut session = self.session.lock().await;
            session.discard()?;
        }

        self.recorder.cancel().await?;

        if self.config.enable_notify {
            let _ = self
                .notifier
                .notify(
                    "Voicedrop",
                    "Recording discarded",
                    NotificationIcon::Warning,
                )
                .await;
        }

        Ok(())
    }

    /// Check if recording has reached the safety limit
    pub fn max_duration_reached(&self) -> bool {
        self.recorder.elapsed_ms() >= self.config.max_duration.as_millis()
    }

    /// Get elapsed recording time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.recorder.elapsed_ms()
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use crate::domain::upload::AudioUpload;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

    struct MockRecorder {
        recording: AtomicBool,
        elapsed: AtomicU64,
        probe_fails: bool,
    }

    impl MockRecorder {
        fn new() -> Self {
            Self {
                recording: AtomicBool::new(false),
                elapsed: AtomicU64::new(0),
                probe_fails: false,
            }
        }

        fn without_device() -> Self {
            Self {
                probe_fails: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl Recorder for MockRecorder {
        fn probe(&self) -> Result<(), RecordingError> {
            if self.probe_fails {
                Err(RecordingError::NoAudioDevice)
            } else {
                Ok(())
            }
        }

        async fn start(&self) -> Result<(), RecordingError> {
            self.recording.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<AudioUpload, RecordingError> {
            self.recording.store(false, Ordering::SeqCst);
            Ok(AudioUpload::new(vec![0u8; 100]))
        }

        async fn cancel(&self) -> Result<(), RecordingError> {
            self.recording.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_recording(&self) -> bool {
            self.recording.load(Ordering::SeqCst)
        }

        fn elapsed_ms(&self) -> u64 {
            self.elapsed.load(Ordering::SeqCst)
        }
    }

    /// Uploader that counts how many submissions it receives
    struct CountingUploader {
        uploads: Arc<AtomicUsize>,
    }

    impl CountingUploader {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let uploads = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    uploads: Arc::clone(&uploads),
                },
                uploads,
            )
        }
    }

    #[async_trait]
    impl Uploader for CountingUploader {
        async fn upload(&self, _audio: &AudioUpload) -> Result<UploadReceipt, UploadError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(UploadReceipt {
                status: 200,
                final_url: "http://example.com/process_audio".to_string(),
            })
        }
    }

    struct MockNotifier;

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            _message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn use_case_with(
        recorder: MockRecorder,
    ) -> (
        SubmitRecordingUseCase<MockRecorder, CountingUploader, MockNotifier>,
        Arc<AtomicUsize>,
    ) {
        let (uploader, uploads) = CountingUploader::new();
        (
            SubmitRecordingUseCase::new(recorder, uploader, MockNotifier, SubmitConfig::default()),
            uploads,
        )
    }

    #[tokio::test]
    async fn capability_check_fails_without_device() {
        let (use_case, _) = use_case_with(MockRecorder::without_device());
        assert!(use_case.check_capability().is_err());
    }

    #[tokio::test]
    async fn start_transitions_to_recording() {
        let (use_case, _) = use_case_with(MockRecorder::new());

        assert_eq!(use_case.state().await, SessionState::Idle);
        use_case.start_recording().await.unwrap();
        assert_eq!(use_case.state().await, SessionState::Recording);
        assert!(use_case.is_recording());
    }

    #[tokio::test]
    async fn start_twice_fails() {
        let (use_case, _) = use_case_with(MockRecorder::new());

        use_case.start_recording().await.unwrap();
        let result = use_case.start_recording().await;
        assert!(matches!(result, Err(SubmitError::InvalidState(_))));
    }

    #[tokio::test]
    async fn stop_submits_exactly_once() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        use_case.start_recording().await.unwrap();
        let output = use_case.stop_and_submit().await.unwrap();

        assert_eq!(output.status, 200);
        assert_eq!(output.audio_size, "100 B");
        assert_eq!(use_case.state().await, SessionState::Finalizing);
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stop_without_recording_does_nothing() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        let result = use_case.stop_and_submit().await;
        assert!(matches!(result, Err(SubmitError::InvalidState(_))));
        assert_eq!(use_case.state().await, SessionState::Idle);
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_stop_cannot_submit_again() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        use_case.start_recording().await.unwrap();
        use_case.stop_and_submit().await.unwrap();

        let result = use_case.stop_and_submit().await;
        assert!(matches!(result, Err(SubmitError::InvalidState(_))));
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_discards_without_submitting() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        use_case.start_recording().await.unwrap();
        use_case.cancel().await.unwrap();

        assert!(!use_case.is_recording());
        assert_eq!(use_case.state().await, SessionState::Finalizing);
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stop_after_cancel_cannot_submit() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        use_case.start_recording().await.unwrap();
        use_case.cancel().await.unwrap();

        let result = use_case.stop_and_submit().await;
        assert!(matches!(result, Err(SubmitError::InvalidState(_))));
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_without_recording_fails() {
        let (use_case, uploads) = use_case_with(MockRecorder::new());

        let result = use_case.cancel().await;
        assert!(matches!(result, Err(SubmitError::InvalidState(_))));
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upload_error_propagates() {
        struct FailingUploader;

        #[async_trait]
        impl Uploader for FailingUploader {
            async fn upload(&self, _audio: &AudioUpload) -> Result<UploadReceipt, UploadError> {
                Err(UploadError::ServerError {
                    status: 400,
                    message: "No audio file".to_string(),
                })
            }
        }

        let use_case = SubmitRecordingUseCase::new(
            MockRecorder::new(),
            FailingUploader,
            MockNotifier,
            SubmitConfig::default(),
        );

        use_case.start_recording().await.unwrap();
        let err = use_case.stop_and_submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Upload(_)));
        assert!(err.to_string().contains("No audio file"));
    }

    #[tokio::test]
    async fn max_duration_reached() {
        let recorder = MockRecorder::new();
        recorder.elapsed.store(5_000, Ordering::SeqCst);

        let (uploader, _) = CountingUploader::new();
        let use_case = SubmitRecordingUseCase::new(
            recorder,
            uploader,
            MockNotifier,
            SubmitConfig {
                max_duration: Duration::from_secs(5),
                enable_notify: false,
            },
        );

        assert!(use_case.max_duration_reached());
        assert_eq!(use_case.elapsed_ms(), 5_000);
    }
}
