//! Terminal visualization: color banding and the spectrum render loop.

pub mod bands;
pub mod spectrum;

/// Partial-height bar glyphs, dimmest to full block. Index `h % GLYPHS.len()`
/// selects the fractional tip of a bar; `h / GLYPHS.len()` is its full rows.
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Maximum bar height in glyph-level units for a terminal of `rows` lines:
/// half the display, scaled by the headroom ratio so bars never touch the
/// edges or the center divider exactly.
pub fn scale_ceiling(rows: u16) -> u16 {
    ((rows as usize * GLYPHS.len() / 2) as f32 * bands::HEADROOM) as u16
}
