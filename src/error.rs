use thiserror::Error;

/// Failures while turning a WAV file into per-channel samples.
///
/// All of these are fatal: they occur before the render loop starts.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read wav file: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported bit depth {0} (expected 16-bit PCM)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported sample format (expected integer PCM)")]
    UnsupportedSampleFormat,

    #[error("unsupported channel count {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),
}

/// Startup-time configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window size {0} is not a power of two")]
    InvalidWindowSize(usize),

    #[error("hop size must be greater than zero")]
    ZeroHopSize,

    #[error("smoothing weight {0} must be in [0, 1)")]
    InvalidSmoothingWeight(f32),

    #[error("target frame rate {0} must be positive")]
    InvalidFrameRate(f32),
}

/// Failures on the playback thread. Non-fatal to the visual loop: the
/// scheduler paces against nominal time whether or not audio is audible.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to create audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("failed to open audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode audio file: {0}")]
    Decoder(#[from] rodio::decoder::DecoderError),

    #[error("playback thread panicked")]
    Panicked,
}
