//! Cross-platform audio recorder using cpal
//!
//! Captures mono 16-bit PCM at the device's default sample rate. Each
//! input callback appends its chunk to the fragment buffer, so fragment
//! order is capture order (cpal delivers callbacks from a single stream
//! in sequence).

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::sync::oneshot;
use tokio::time::Duration as TokioDuration;

use super::wav_encoder::encode_to_wav;
use crate::application::ports::{Recorder, RecordingError};
use crate::domain::recording::FragmentBuffer;
use crate::domain::upload::AudioUpload;

/// Audio recorder using cpal.
///
/// The stream is managed on a dedicated thread because cpal::Stream is
/// not Send; the struct communicates with it through atomics and the
/// shared fragment buffer.
pub struct CpalRecorder {
    /// Preferred input device name (default device if None)
    device_name: Option<String>,
    /// Fragments collected during the session
    fragments: Arc<StdMutex<FragmentBuffer>>,
    /// Sample rate the stream was opened with
    sample_rate: Arc<AtomicU32>,
    /// Recording state flag, also stops the capture thread
    is_recording: Arc<AtomicBool>,
    /// Recording start time (millis since epoch)
    start_time_ms: Arc<AtomicU64>,
    /// Elapsed time in milliseconds
    elapsed_ms: Arc<AtomicU64>,
}

impl CpalRecorder {
    /// Create a recorder bound to the named device, or the default input
    /// device if no name is given
    pub fn new(device_name: Option<String>) -> Self {
        Self {
            device_name,
            fragments: Arc::new(StdMutex::new(FragmentBuffer::new())),
            sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            start_time_ms: Arc::new(AtomicU64::new(0)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolve the input device
    fn find_input_device(name: Option<&str>) -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();

        match name {
            None => host
                .default_input_device()
                .ok_or(RecordingError::NoAudioDevice),
            Some(wanted) => {
                let mut devices = host
                    .input_devices()
                    .map_err(|e| RecordingError::StartFailed(e.to_string()))?;
                devices
                    .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
                    .ok_or_else(|| RecordingError::DeviceNotFound(wanted.to_string()))
            }
        }
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    fn now_ms() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl Recorder for CpalRecorder {
    fn probe(&self) -> Result<(), RecordingError> {
        let device = Self::find_input_device(self.device_name.as_deref())?;
        device
            .default_input_config()
            .map_err(|e| RecordingError::StartFailed(format!("No usable input config: {}", e)))?;
        Ok(())
    }

    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        {
            let mut fragments = self.fragments.lock().unwrap_or_else(|e| e.into_inner());
            fragments.clear();
        }

        self.is_recording.store(true, Ordering::SeqCst);
        self.start_time_ms.store(Self::now_ms(), Ordering::SeqCst);
        self.elapsed_ms.store(0, Ordering::SeqCst);

        let device_name = self.device_name.clone();
        let fragments = Arc::clone(&self.fragments);
        let sample_rate = Arc::clone(&self.sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);
        let start_time_ms = Arc::clone(&self.start_time_ms);

        // The thread reports back once the stream is playing (or failed),
        // so start() cannot return Ok for a session that captures nothing.
        let (ready_tx, ready_rx) = oneshot::channel::<Result<(), RecordingError>>();

        // cpal::Stream is not Send, so the stream lives on its own thread
        std::thread::spawn(move || {
            let open_stream = || -> Result<cpal::Stream, RecordingError> {
                let device = CpalRecorder::find_input_device(device_name.as_deref())?;

                let supported = device.default_input_config().map_err(|e| {
                    RecordingError::StartFailed(format!("No usable input config: {}", e))
                })?;

                let sample_format = supported.sample_format();
                let config: cpal::StreamConfig = supported.into();
                let channels = config.channels;
                sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

                tracing::debug!(
                    "Opening input stream: {} Hz, {} channel(s), {:?}",
                    config.sample_rate.0,
                    channels,
                    sample_format
                );

                let fragments_cb = Arc::clone(&fragments);
                let recording_cb = Arc::clone(&is_recording);

                let stream = match sample_format {
                    SampleFormat::I16 => device.build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if recording_cb.load(Ordering::SeqCst) {
                                let mono = CpalRecorder::mix_to_mono(data, channels);
                                if let Ok(mut buffer) = fragments_cb.lock() {
                                    buffer.push_fragment(&mono);
                                }
                            }
                        },
                        |err| tracing::error!("Audio stream error: {}", err),
                        None,
                    ),

                    SampleFormat::F32 => device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if recording_cb.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalRecorder::mix_to_mono(&i16_data, channels);
                                if let Ok(mut buffer) = fragments_cb.lock() {
                                    buffer.push_fragment(&mono);
                                }
                            }
                        },
                        |err| tracing::error!("Audio stream error: {}", err),
                        None,
                    ),

                    other => {
                        return Err(RecordingError::StartFailed(format!(
                            "Unsupported sample format: {:?}",
                            other
                        )))
                    }
                }
                .map_err(|e| {
                    RecordingError::StartFailed(format!("Failed to build input stream: {}", e))
                })?;

                stream.play().map_err(|e| {
                    RecordingError::StartFailed(format!("Failed to start input stream: {}", e))
                })?;

                Ok(stream)
            };

            let stream = match open_stream() {
                Ok(stream) => {
                    let _ = ready_tx.send(Ok(()));
                    stream
                }
                Err(e) => {
                    tracing::error!("Audio capture did not start: {}", e);
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            // Keep capturing until stopped
            while is_recording.load(Ordering::SeqCst) {
                let start = start_time_ms.load(Ordering::SeqCst);
                elapsed_ms.store(Self::now_ms().saturating_sub(start), Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.is_recording.store(false, Ordering::SeqCst);
                Err(e)
            }
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                Err(RecordingError::StartFailed(
                    "Capture thread exited before the stream opened".to_string(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<AudioUpload, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::RecordingFailed(
                "No recording in progress".to_string(),
            ));
        }

        self.is_recording.store(false, Ordering::SeqCst);

        // Let the capture thread release the stream
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::RecordingFailed(
                "Sample rate not set".to_string(),
            ));
        }

        let buffer = {
            let mut fragments = self.fragments.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *fragments)
        };

        if buffer.is_empty() {
            return Err(RecordingError::NoDataCaptured);
        }

        tracing::debug!(
            "Assembling {} fragment(s), {} samples at {} Hz",
            buffer.fragment_count(),
            buffer.len(),
            sample_rate
        );

        let samples = buffer.into_samples();
        let wav = tokio::task::spawn_blocking(move || encode_to_wav(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Encode task error: {}", e)))?
            .map_err(|e| RecordingError::RecordingFailed(e.to_string()))?;

        Ok(AudioUpload::new(wav))
    }

    async fn cancel(&self) -> Result<(), RecordingError> {
        self.is_recording.store(false, Ordering::SeqCst);

        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        {
            let mut fragments = self.fragments.lock().unwrap_or_else(|e| e.into_inner());
            fragments.clear();
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);

        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}
