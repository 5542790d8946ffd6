//! Mapping raw spectral magnitudes to bounded integer bar heights.

use num_complex::Complex32;

/// Scale a complex spectrum (already truncated to the display width) to
/// integer heights in `[0, ceiling]`.
///
/// Heights are peak-normalized per frame, then square-root compressed so
/// quiet components stay visible. The peak is floored at 1 so silence maps
/// to all zeros instead of dividing by zero.
pub fn scale_spectrum(spectrum: &[Complex32], ceiling: u16) -> Vec<u16> {
    let magnitudes: Vec<f32> = spectrum.iter().map(|c| c.norm()).collect();
    let peak = magnitudes.iter().fold(1.0f32, |acc, &m| acc.max(m));
    magnitudes
        .iter()
        .map(|&m| (ceiling as f32 * (m / peak).sqrt()) as u16)
        .collect()
}
