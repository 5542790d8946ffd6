//! Audio file decoding and playback.

pub mod decode;
pub mod playback;

pub use decode::{decode_wav, SampleBuffer};
pub use playback::PlaybackTask;
