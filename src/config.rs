use crate::error::ConfigError;

/// Configuration for the spectrum visualizer
#[derive(Clone)]
pub struct SpectrumConfig {
    /// Samples analyzed per FFT window. Must be a power of two.
    pub frame_size: usize,
    /// Samples advanced between consecutive windows.
    pub hop_size: usize,
    /// EMA weight on the previous frame while a bar is falling.
    pub decay: f32,
    /// EMA weight on the previous frame while a bar is rising.
    pub attack: f32,
    /// Optional render-rate cap. When the hop rate exceeds it, consecutive
    /// analysis frames are averaged into one rendered frame.
    pub target_fps: Option<f32>,
    pub no_audio: bool,
    pub debug: bool,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 1600,
            decay: 0.93,
            attack: 0.2,
            target_fps: None,
            no_audio: false,
            debug: false,
        }
    }
}

impl SpectrumConfig {
    /// Validate startup parameters. A bad window size here is fatal; the
    /// short window at end-of-stream is ordinary loop termination instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_size.is_power_of_two() {
            return Err(ConfigError::InvalidWindowSize(self.frame_size));
        }
        if self.hop_size == 0 {
            return Err(ConfigError::ZeroHopSize);
        }
        for weight in [self.decay, self.attack] {
            if !(0.0..1.0).contains(&weight) {
                return Err(ConfigError::InvalidSmoothingWeight(weight));
            }
        }
        if let Some(fps) = self.target_fps {
            if fps <= 0.0 {
                return Err(ConfigError::InvalidFrameRate(fps));
            }
        }
        Ok(())
    }

    /// How many analysis frames feed one rendered frame, given the hop rate
    /// at `sample_rate`. Clamped to at least 1 so averaging can never divide
    /// by zero, even for render-rate caps above the hop rate.
    pub fn cached_frames(&self, sample_rate: u32) -> Option<usize> {
        self.target_fps.map(|fps| {
            let hop_rate = sample_rate as f32 / self.hop_size as f32;
            (hop_rate / fps).round().max(1.0) as usize
        })
    }

    /// Duration of one hop in seconds.
    pub fn hop_duration(&self, sample_rate: u32) -> f64 {
        self.hop_size as f64 / sample_rate as f64
    }
}
