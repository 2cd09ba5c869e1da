//! WAV container assembly
//!
//! Wraps the collected PCM samples in a RIFF/WAVE container at whatever
//! rate the device captured them. No resampling, no compression: the
//! submission contract asks for plain `audio/wav`.

use std::io::Cursor;

/// Bits per sample (16-bit PCM)
const BITS_PER_SAMPLE: u16 = 16;

/// Number of channels (mono)
const CHANNELS: u16 = 1;

/// Encode mono i16 samples into an in-memory WAV file
pub fn encode_to_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodingError> {
    if sample_rate == 0 {
        return Err(EncodingError::InvalidSampleRate);
    }

    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| EncodingError::Write(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| EncodingError::Write(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| EncodingError::Finalize(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// WAV encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Sample rate must be non-zero")]
    InvalidSampleRate,

    #[error("WAV write failed: {0}")]
    Write(String),

    #[error("WAV finalize failed: {0}")]
    Finalize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Standard PCM WAV header size
    const HEADER_LEN: usize = 44;

    #[test]
    fn encode_silence() {
        // 1 second of silence at 44.1kHz
        let silence = vec![0i16; 44_100];
        let wav = encode_to_wav(&silence, 44_100).unwrap();

        // RIFF/WAVE magic
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), HEADER_LEN + silence.len() * 2);
    }

    #[test]
    fn data_section_is_sample_bytes_in_order() {
        let samples = [1i16, -2, 300, -400];
        let wav = encode_to_wav(&samples, 16_000).unwrap();

        let expected: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        assert_eq!(&wav[HEADER_LEN..], expected.as_slice());
    }

    #[test]
    fn encode_empty_input_still_produces_header() {
        let wav = encode_to_wav(&[], 16_000).unwrap();
        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(&wav[0..4], b"RIFF");
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let result = encode_to_wav(&[1, 2, 3], 0);
        assert!(matches!(result, Err(EncodingError::InvalidSampleRate)));
    }

    #[test]
    fn header_carries_sample_rate() {
        let wav = encode_to_wav(&[0i16; 10], 48_000).unwrap();
        // Sample rate lives at offset 24 in the fmt chunk
        let rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(rate, 48_000);
    }
}
