//! Audio capture adapters

pub mod cpal_recorder;
pub mod wav_encoder;

pub use cpal_recorder::CpalRecorder;
