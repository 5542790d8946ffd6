//! Per-hop analysis pipeline: window → FFT → scale → average → smooth.
//!
//! The pipeline owns everything frequency-shaped; pacing and drawing stay
//! with the scheduler, which drives `step` once per hop.

use crate::audio::SampleBuffer;
use crate::config::SpectrumConfig;
use crate::dsp::analyzer::SpectralAnalyzer;
use crate::dsp::scale::scale_spectrum;
use crate::dsp::smooth::{FrameAccumulator, Smoother};

/// Result of one hop. `heights` is `None` while a frame is parked in the
/// accumulator waiting for its batch to fill.
pub struct StepOutput {
    /// Sample index the window started at; the scheduler derives the
    /// frame's nominal audio-timeline position from it.
    pub hop_start: usize,
    pub heights: Option<Vec<Vec<u16>>>,
}

pub struct SpectrumPipeline<'a> {
    samples: &'a SampleBuffer,
    frame_size: usize,
    hop_size: usize,
    analyzer: SpectralAnalyzer,
    smoother: Smoother,
    accumulator: Option<FrameAccumulator>,
    next_start: usize,
}

impl<'a> SpectrumPipeline<'a> {
    pub fn new(samples: &'a SampleBuffer, config: &SpectrumConfig) -> Self {
        let accumulator = config
            .cached_frames(samples.sample_rate())
            .map(FrameAccumulator::new);
        Self {
            samples,
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            analyzer: SpectralAnalyzer::new(config.frame_size),
            smoother: Smoother::new(config.decay, config.attack),
            accumulator,
            next_start: 0,
        }
    }

    /// Advance one hop. Returns `None` once fewer than `frame_size` samples
    /// remain — the normal end of the stream, not an error.
    pub fn step(&mut self, display_width: usize, ceiling: u16) -> Option<StepOutput> {
        let samples = self.samples;
        let start = self.next_start;
        if start + self.frame_size > samples.frame_count() {
            return None;
        }
        self.next_start += self.hop_size;

        let mut raw: Vec<Vec<u16>> = Vec::with_capacity(samples.channel_count());
        for channel in samples.channels() {
            let window = &channel[start..start + self.frame_size];
            let spectrum = self.analyzer.analyze(window);
            let visible = &spectrum[..display_width.min(spectrum.len())];
            raw.push(scale_spectrum(visible, ceiling));
        }

        let ready = match &mut self.accumulator {
            Some(accumulator) => accumulator.push(raw),
            None => Some(raw),
        };
        let heights = ready.map(|frame| self.smoother.apply(frame));

        Some(StepOutput {
            hop_start: start,
            heights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_buffer(seconds: f64, freq: f64, channels: usize) -> SampleBuffer {
        let sample_rate = 44100u32;
        let frames = (seconds * sample_rate as f64) as usize;
        let samples: Vec<i16> = (0..frames)
            .map(|n| {
                let phase = std::f64::consts::TAU * freq * n as f64 / sample_rate as f64;
                (phase.sin() * 10000.0) as i16
            })
            .collect();
        SampleBuffer::from_channels(vec![samples; channels], sample_rate)
    }

    #[test]
    fn step_count_matches_hop_arithmetic() {
        let buffer = tone_buffer(0.5, 440.0, 1);
        let config = SpectrumConfig {
            frame_size: 2048,
            hop_size: 1024,
            ..Default::default()
        };
        let mut pipeline = SpectrumPipeline::new(&buffer, &config);
        let mut steps = 0;
        while pipeline.step(80, 64).is_some() {
            steps += 1;
        }
        let expected = (buffer.frame_count() - 2048) / 1024 + 1;
        assert_eq!(steps, expected);
    }

    #[test]
    fn truncates_spectrum_to_display_width() {
        let buffer = tone_buffer(0.2, 440.0, 1);
        let config = SpectrumConfig {
            hop_size: 1024,
            ..Default::default()
        };
        let mut pipeline = SpectrumPipeline::new(&buffer, &config);
        let output = pipeline.step(37, 64).unwrap();
        assert_eq!(output.heights.unwrap()[0].len(), 37);
    }

    #[test]
    fn stream_shorter_than_window_yields_no_steps() {
        let buffer = SampleBuffer::from_channels(vec![vec![0i16; 100]], 44100);
        let config = SpectrumConfig::default();
        let mut pipeline = SpectrumPipeline::new(&buffer, &config);
        assert!(pipeline.step(80, 64).is_none());
    }

    #[test]
    fn averaging_renders_every_nth_hop() {
        let buffer = tone_buffer(1.0, 440.0, 1);
        // 43 hops/s capped at ~10.8 fps → 4 hops per rendered frame
        let config = SpectrumConfig {
            frame_size: 2048,
            hop_size: 1024,
            target_fps: Some(10.766),
            ..Default::default()
        };
        assert_eq!(config.cached_frames(44100), Some(4));

        let mut pipeline = SpectrumPipeline::new(&buffer, &config);
        let mut pattern = Vec::new();
        for _ in 0..8 {
            pattern.push(pipeline.step(80, 64).unwrap().heights.is_some());
        }
        assert_eq!(
            pattern,
            vec![false, false, false, true, false, false, false, true]
        );
    }
}
