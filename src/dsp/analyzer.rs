//! Windowed spectral analysis via the radix-2 Cooley–Tukey FFT.
//!
//! The recursion splits the input into even- and odd-indexed subsequences,
//! transforms each half, and combines them with twiddle factors
//! `exp(-2πi·k/N)`. Splitting is done by stride indexing into a scratch
//! buffer rather than by collecting sublists, so analyzing a window
//! allocates nothing after construction.

use num_complex::Complex32;
use std::f32::consts::TAU;

/// Reusable FFT state for windows of a fixed power-of-two size.
pub struct SpectralAnalyzer {
    frame_size: usize,
    input: Vec<Complex32>,
    output: Vec<Complex32>,
}

impl SpectralAnalyzer {
    /// `frame_size` must be a power of two; the configuration layer
    /// guarantees this before an analyzer is ever constructed.
    pub fn new(frame_size: usize) -> Self {
        debug_assert!(frame_size.is_power_of_two());
        Self {
            frame_size,
            input: vec![Complex32::new(0.0, 0.0); frame_size],
            output: vec![Complex32::new(0.0, 0.0); frame_size],
        }
    }

    /// Transform one window of raw samples into its complex spectrum.
    ///
    /// Pure with respect to the window contents: the same input always
    /// produces the same spectrum. The returned slice is valid until the
    /// next call.
    pub fn analyze(&mut self, window: &[i16]) -> &[Complex32] {
        debug_assert_eq!(window.len(), self.frame_size);
        for (slot, &sample) in self.input.iter_mut().zip(window) {
            *slot = Complex32::new(sample as f32, 0.0);
        }
        fft_strided(&self.input, 1, &mut self.output);
        &self.output
    }
}

/// Recursive decimation-in-time step. `input` is viewed at the given
/// stride; `out` receives the transform of that subsequence and its length
/// decides the recursion depth. Length ≤ 1 returns the input unchanged.
fn fft_strided(input: &[Complex32], stride: usize, out: &mut [Complex32]) {
    let n = out.len();
    if n <= 1 {
        if n == 1 {
            out[0] = input[0];
        }
        return;
    }
    let half = n / 2;

    let (even, odd) = out.split_at_mut(half);
    fft_strided(input, stride * 2, even);
    fft_strided(&input[stride..], stride * 2, odd);

    for k in 0..half {
        let twiddle = Complex32::from_polar(1.0, -TAU * k as f32 / n as f32);
        let t = twiddle * out[half + k];
        let e = out[k];
        out[k] = e + t;
        out[half + k] = e - t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitudes(spectrum: &[Complex32]) -> Vec<f32> {
        spectrum.iter().map(|c| c.norm()).collect()
    }

    #[test]
    fn zero_window_yields_zero_magnitudes() {
        for size in [1usize, 2, 8, 64, 2048] {
            let mut analyzer = SpectralAnalyzer::new(size);
            let window = vec![0i16; size];
            let spectrum = analyzer.analyze(&window);
            assert!(magnitudes(spectrum).iter().all(|&m| m == 0.0));
        }
    }

    #[test]
    fn single_sample_window_passes_through() {
        let mut analyzer = SpectralAnalyzer::new(1);
        let spectrum = analyzer.analyze(&[123]);
        assert_eq!(spectrum[0], Complex32::new(123.0, 0.0));
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let size = 256;
        let mut analyzer = SpectralAnalyzer::new(size);
        let mut window = vec![0i16; size];
        window[0] = 1;
        let mags = magnitudes(analyzer.analyze(&window));
        for m in mags {
            assert!((m - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sinusoid_peaks_at_expected_bin() {
        let size = 2048;
        let sample_rate = 44100.0f64;
        let freq = 440.0f64;
        let window: Vec<i16> = (0..size)
            .map(|n| {
                let phase = std::f64::consts::TAU * freq * n as f64 / sample_rate;
                (phase.sin() * 10000.0) as i16
            })
            .collect();

        let mut analyzer = SpectralAnalyzer::new(size);
        let mags = magnitudes(analyzer.analyze(&window));

        // search the positive-frequency half only
        let peak_bin = mags[..size / 2]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let expected = (freq * size as f64 / sample_rate).round() as i64;
        assert!((peak_bin as i64 - expected).abs() <= 1);
    }

    #[test]
    fn spectrum_is_conjugate_symmetric_for_real_input() {
        let size = 64;
        let window: Vec<i16> = (0..size).map(|n| ((n * 37) % 101) as i16 - 50).collect();
        let mut analyzer = SpectralAnalyzer::new(size);
        let spectrum: Vec<Complex32> = analyzer.analyze(&window).to_vec();

        for k in 1..size / 2 {
            let a = spectrum[k];
            let b = spectrum[size - k].conj();
            assert!((a - b).norm() < 1e-2);
        }
    }

    #[test]
    fn analyze_is_deterministic() {
        let size = 512;
        let window: Vec<i16> = (0..size).map(|n| (n as i16).wrapping_mul(31)).collect();
        let mut analyzer = SpectralAnalyzer::new(size);
        let first: Vec<Complex32> = analyzer.analyze(&window).to_vec();
        let second: Vec<Complex32> = analyzer.analyze(&window).to_vec();
        assert_eq!(first, second);
    }
}
