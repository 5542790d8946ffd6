//! Height-to-color banding.
//!
//! Bar rows are partitioned into four intensity tiers; each tier maps to a
//! color pair, with a reverse table (foreground/background swapped) for the
//! mirrored half. Tables are plain values owned by the render loop and
//! rebuilt whenever the terminal height changes.

use crate::terminal::ColorPair;
use crossterm::style::Color;

/// Fraction of each display half that bars may occupy.
pub const HEADROOM: f32 = 0.8;

/// Cumulative tier boundaries over the usable half-height.
const TIER_THRESHOLDS: [f32; 3] = [0.25, 0.45, 0.65];

/// Tier colors from the center line outward.
const TIER_COLORS: [Color; 4] = [Color::Cyan, Color::White, Color::Green, Color::Yellow];

/// Color lookup tables for one terminal height.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ColorBandTable {
    built_for_rows: u16,
    forward: Vec<ColorPair>,
    reverse: Vec<ColorPair>,
}

impl ColorBandTable {
    /// Build tables for a terminal of `rows` lines. Offsets `0..=usable`
    /// (usable = rows/2 scaled by the headroom ratio) each get the pair of
    /// their tier.
    pub fn build(rows: u16) -> Self {
        let usable = ((rows as f32 / 2.0) * HEADROOM) as usize;
        let mut forward = Vec::with_capacity(usable + 1);
        let mut reverse = Vec::with_capacity(usable + 1);

        for offset in 0..=usable {
            let fraction = offset as f32 / usable.max(1) as f32;
            let tier = TIER_THRESHOLDS
                .iter()
                .position(|&t| fraction <= t)
                .unwrap_or(TIER_THRESHOLDS.len());
            let color = TIER_COLORS[tier];
            forward.push(ColorPair {
                fg: color,
                bg: Color::Black,
            });
            reverse.push(ColorPair {
                fg: Color::Black,
                bg: color,
            });
        }

        Self {
            built_for_rows: rows,
            forward,
            reverse,
        }
    }

    /// The terminal height this table was built for. A mismatch against the
    /// current height means the table is stale and must be rebuilt.
    pub fn built_for_rows(&self) -> u16 {
        self.built_for_rows
    }

    /// Number of addressable row offsets.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Color pair for a row offset from the center line. Lookups clamp to
    /// the outermost tier so a not-yet-rebuilt table cannot index out of
    /// range.
    pub fn color_at(&self, offset: usize) -> ColorPair {
        self.forward[offset.min(self.forward.len() - 1)]
    }

    /// Reverse-video pair for the mirrored or second-channel half.
    pub fn reverse_at(&self, offset: usize) -> ColorPair {
        self.reverse[offset.min(self.reverse.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilding_for_the_same_height_is_identical() {
        assert_eq!(ColorBandTable::build(40), ColorBandTable::build(40));
    }

    #[test]
    fn table_len_tracks_half_height_with_headroom() {
        // 40 rows → usable = 40/2 * 0.8 = 16 → offsets 0..=16
        let table = ColorBandTable::build(40);
        assert_eq!(table.len(), 17);
        assert_eq!(table.built_for_rows(), 40);
    }

    #[test]
    fn tiers_run_cyan_to_yellow_outward() {
        let table = ColorBandTable::build(50);
        assert_eq!(table.color_at(0).fg, Color::Cyan);
        assert_eq!(table.color_at(table.len() - 1).fg, Color::Yellow);
    }

    #[test]
    fn tier_boundaries_match_thresholds() {
        // usable = 100/2 * 0.8 = 40; boundaries at 25%, 45%, 65% of 40
        let table = ColorBandTable::build(100);
        assert_eq!(table.color_at(10).fg, Color::Cyan);
        assert_eq!(table.color_at(11).fg, Color::White);
        assert_eq!(table.color_at(18).fg, Color::White);
        assert_eq!(table.color_at(19).fg, Color::Green);
        assert_eq!(table.color_at(26).fg, Color::Green);
        assert_eq!(table.color_at(27).fg, Color::Yellow);
    }

    #[test]
    fn reverse_table_swaps_foreground_and_background() {
        let table = ColorBandTable::build(40);
        for offset in 0..table.len() {
            let forward = table.color_at(offset);
            let reverse = table.reverse_at(offset);
            assert_eq!(reverse.bg, forward.fg);
            assert_eq!(reverse.fg, forward.bg);
        }
    }

    #[test]
    fn lookups_clamp_beyond_the_table_edge() {
        let table = ColorBandTable::build(20);
        assert_eq!(table.color_at(1000), table.color_at(table.len() - 1));
    }

    #[test]
    fn tiny_terminals_still_produce_a_table() {
        let table = ColorBandTable::build(2);
        assert!(!table.is_empty());
        table.color_at(0);
    }
}
