//! Temporal smoothing of bar heights.
//!
//! Two cooperating policies: an asymmetric EMA that lets bars rise fast and
//! fall slowly, and an optional accumulator that averages several analysis
//! frames into one rendered frame when the hop rate outpaces the render
//! rate.

/// Blend one channel's heights against the previous frame.
///
/// Falling columns (`prev > curr`) keep `alpha_down` of the previous value;
/// rising columns keep `alpha_up`. Equal heights pass through exactly.
/// Columns with no previous value — the terminal grew since last frame —
/// take the current value as-is.
pub fn blend(alpha_down: f32, alpha_up: f32, previous: &[u16], current: &[u16]) -> Vec<u16> {
    current
        .iter()
        .enumerate()
        .map(|(i, &curr)| match previous.get(i) {
            None => curr,
            Some(&prev) if prev > curr => {
                (alpha_down * prev as f32 + (1.0 - alpha_down) * curr as f32) as u16
            }
            Some(&prev) if prev < curr => {
                (alpha_up * prev as f32 + (1.0 - alpha_up) * curr as f32) as u16
            }
            Some(_) => curr,
        })
        .collect()
}

/// Per-channel EMA state. Owns the previous frame's heights exclusively and
/// replaces them after every blend.
pub struct Smoother {
    alpha_down: f32,
    alpha_up: f32,
    previous: Vec<Vec<u16>>,
}

impl Smoother {
    pub fn new(alpha_down: f32, alpha_up: f32) -> Self {
        Self {
            alpha_down,
            alpha_up,
            previous: Vec::new(),
        }
    }

    /// Smooth one frame of per-channel heights. The first frame passes
    /// through unblended.
    pub fn apply(&mut self, frame: Vec<Vec<u16>>) -> Vec<Vec<u16>> {
        let smoothed: Vec<Vec<u16>> = frame
            .into_iter()
            .enumerate()
            .map(|(channel, current)| match self.previous.get(channel) {
                Some(previous) => blend(self.alpha_down, self.alpha_up, previous, &current),
                None => current,
            })
            .collect();
        self.previous = smoothed.clone();
        smoothed
    }
}

/// Bounded queue of raw frames awaiting aggregation into one rendered
/// frame. Cleared after every aggregation.
pub struct FrameAccumulator {
    capacity: usize,
    cached: Vec<Vec<Vec<u16>>>,
}

impl FrameAccumulator {
    /// Capacity is clamped to at least one frame per render so the
    /// averaging division can never hit zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            cached: Vec::new(),
        }
    }

    /// Queue one frame. Returns the element-wise average (truncating
    /// integer division) once `capacity` frames have been collected.
    pub fn push(&mut self, frame: Vec<Vec<u16>>) -> Option<Vec<Vec<u16>>> {
        self.cached.push(frame);
        if self.cached.len() < self.capacity {
            return None;
        }

        // Shape follows the newest frame; a column missing from older
        // cached frames (resize mid-batch) averages over the frames that
        // have it.
        let newest = self.cached.last().expect("accumulator is non-empty");
        let averaged = newest
            .iter()
            .enumerate()
            .map(|(channel, columns)| {
                (0..columns.len())
                    .map(|i| {
                        let mut sum: u32 = 0;
                        let mut count: u32 = 0;
                        for cached in &self.cached {
                            if let Some(&h) = cached.get(channel).and_then(|c| c.get(i)) {
                                sum += u32::from(h);
                                count += 1;
                            }
                        }
                        (sum / count.max(1)) as u16
                    })
                    .collect()
            })
            .collect();
        self.cached.clear();
        Some(averaged)
    }
}
