//! WAV decoding into per-channel sample sequences.

use crate::error::DecodeError;
use std::path::Path;

/// Decoded audio: one signed 16-bit sample sequence per channel, plus the
/// sample rate. Immutable for the duration of playback.
///
/// Invariant: all channels have equal length.
pub struct SampleBuffer {
    channels: Vec<Vec<i16>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Build a buffer from already-separated channels. Channels are truncated
    /// to the shortest one so the equal-length invariant always holds.
    pub fn from_channels(mut channels: Vec<Vec<i16>>, sample_rate: u32) -> Self {
        let min_len = channels.iter().map(Vec::len).min().unwrap_or(0);
        for channel in &mut channels {
            channel.truncate(min_len);
        }
        Self {
            channels,
            sample_rate,
        }
    }

    pub fn channels(&self) -> &[Vec<i16>] {
        &self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// Decode a 16-bit integer PCM WAV file. Mono and stereo are accepted;
/// anything else is a `DecodeError`.
pub fn decode_wav(path: &Path) -> Result<SampleBuffer, DecodeError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    match spec.sample_format {
        hound::SampleFormat::Int if spec.bits_per_sample == 16 => {}
        hound::SampleFormat::Int => {
            return Err(DecodeError::UnsupportedBitDepth(spec.bits_per_sample))
        }
        hound::SampleFormat::Float => return Err(DecodeError::UnsupportedSampleFormat),
    }

    if spec.channels == 0 || spec.channels > 2 {
        return Err(DecodeError::UnsupportedChannels(spec.channels));
    }

    let num_channels = spec.channels as usize;
    let mut channels: Vec<Vec<i16>> = vec![Vec::new(); num_channels];
    for (i, sample) in reader.samples::<i16>().enumerate() {
        channels[i % num_channels].push(sample?);
    }

    Ok(SampleBuffer::from_channels(channels, spec.sample_rate))
}
