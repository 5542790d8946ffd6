//! Spectrum bar renderer and the playback-clock scheduler loop.
//!
//! Bars grow from the center line: channel 0 upward, channel 1 (or the
//! mirrored mono channel) downward in reverse video. The loop advances the
//! sample stream in fixed hops and sleeps whatever remains of each hop
//! after render time and accumulated drift, so the display tracks audio
//! playback without ever skipping a frame.

use crate::audio::SampleBuffer;
use crate::config::SpectrumConfig;
use crate::dsp::SpectrumPipeline;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use super::bands::ColorBandTable;
use super::{scale_ceiling, GLYPHS};

/// Debug log file path (in /tmp for easy access)
const DEBUG_LOG_PATH: &str = "/tmp/termspectrum.log";
/// Debug log file permissions (owner read/write only)
const DEBUG_LOG_MODE: u32 = 0o600;

/// Outcome of a completed run.
pub struct RunStats {
    /// Frames actually drawn (equals the hop count unless averaging or an
    /// early quit reduced it).
    pub frames_rendered: usize,
    /// False when the user quit before the stream ended.
    pub completed: bool,
}

/// Direction a bar grows from the center line.
#[derive(Clone, Copy)]
enum BarDirection {
    Up,
    Down,
}

/// Diagnostics logger for the render loop.
///
/// Writes to a log file when debug mode is enabled; stdout and stderr are
/// unusable while the terminal is in raw mode.
struct DebugLogger {
    file: Option<File>,
}

impl DebugLogger {
    fn new(debug_enabled: bool) -> Self {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let file = if debug_enabled {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .mode(DEBUG_LOG_MODE)
                .open(DEBUG_LOG_PATH)
                .or_else(|_| {
                    OpenOptions::new()
                        .write(true)
                        .truncate(true)
                        .open(DEBUG_LOG_PATH)
                })
                .ok()
        } else {
            None
        };
        Self { file }
    }

    fn log(&mut self, args: std::fmt::Arguments) {
        use std::io::Write;
        if let Some(ref mut f) = self.file {
            let _ = writeln!(f, "{}", args);
            let _ = f.flush();
        }
    }
}

macro_rules! dbg_log {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log(format_args!($($arg)*))
    };
}

/// Draw one channel's bar in column `x`: full blocks from the center line
/// outward, then a partial glyph at the tip. `height` is in glyph-level
/// units. Rows outside the grid are clamped away by the terminal layer.
fn draw_bar(
    term: &mut Terminal,
    x: i32,
    height: u16,
    center_y: i32,
    direction: BarDirection,
    bands: &ColorBandTable,
    reversed: bool,
) {
    let full = (height as usize / GLYPHS.len()).min(bands.len());
    let partial = height as usize % GLYPHS.len();

    let row_at = |offset: usize| match direction {
        BarDirection::Up => center_y - offset as i32,
        BarDirection::Down => center_y + offset as i32,
    };
    let pair_at = |offset: usize| {
        if reversed {
            bands.reverse_at(offset)
        } else {
            bands.color_at(offset)
        }
    };

    for offset in 0..full {
        term.set(x, row_at(offset), '█', Some(pair_at(offset)));
    }
    if partial > 0 {
        term.set(x, row_at(full), GLYPHS[partial], Some(pair_at(full)));
    }
}

/// Draw every column of the current frame. Mono input mirrors the single
/// channel into the lower half in reverse video; stereo draws channel 0
/// upward and channel 1 downward.
fn draw_frame(term: &mut Terminal, heights: &[Vec<u16>], bands: &ColorBandTable) {
    let (_, rows) = term.size();
    let center_y = (rows / 2) as i32;

    for (x, &height) in heights[0].iter().enumerate() {
        draw_bar(
            term,
            x as i32,
            height,
            center_y,
            BarDirection::Up,
            bands,
            false,
        );
        let lower = heights.get(1).map_or(height, |channel| {
            channel.get(x).copied().unwrap_or(0)
        });
        draw_bar(
            term,
            x as i32,
            lower,
            center_y,
            BarDirection::Down,
            bands,
            true,
        );
    }
}

fn draw_status_line(
    term: &mut Terminal,
    elapsed: f64,
    nominal: f64,
    total: f64,
    delay: f64,
    render_time: f64,
    hop_duration: f64,
) {
    let (_, rows) = term.size();
    let status = format!(
        "({:.2}s) {:.2} / {:.2} s  delay: {:+.5}s  render: {:.5}s  frame: {:.5}s",
        elapsed, nominal, total, delay, render_time, hop_duration
    );
    term.set_str(0, rows as i32 - 1, &status, None);
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
        || (modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')))
}

/// Run the spectrum visualizer over a decoded sample buffer.
///
/// One loop iteration per hop: detect resize, analyze and render, then
/// sleep `max(0, hop_duration - render_time - delay)` so the loop absorbs
/// both slow rendering and accumulated drift against the audio clock. Ends
/// when fewer than `frame_size` samples remain, or early on a quit key.
pub fn run(
    term: &mut Terminal,
    samples: &SampleBuffer,
    config: &SpectrumConfig,
) -> io::Result<RunStats> {
    let sample_rate = samples.sample_rate();
    let total_duration = samples.duration_secs();
    let hop_duration = config.hop_duration(sample_rate);

    let mut log = DebugLogger::new(config.debug);
    dbg_log!(
        log,
        "start: {} ch, {} Hz, {:.2}s, frame={} hop={} cached={:?}",
        samples.channel_count(),
        sample_rate,
        total_duration,
        config.frame_size,
        config.hop_size,
        config.cached_frames(sample_rate)
    );

    let mut pipeline = SpectrumPipeline::new(samples, config);

    let (mut cols, mut rows) = term.size();
    let mut bands = ColorBandTable::build(rows);
    let mut ceiling = scale_ceiling(rows);

    let mut frames_rendered = 0usize;
    let play_start = Instant::now();

    loop {
        let frame_start = Instant::now();

        // react to size changes before anything is drawn; a stale band
        // table must never serve lookups for a different height
        let (new_cols, new_rows) = crossterm::terminal::size().unwrap_or((cols, rows));
        if new_cols != cols || new_rows != rows {
            term.resize(new_cols, new_rows);
            term.clear_screen()?;
            if new_rows != rows {
                bands = ColorBandTable::build(new_rows);
                ceiling = scale_ceiling(new_rows);
                dbg_log!(log, "resize: {}x{} -> {}x{}", cols, rows, new_cols, new_rows);
            }
            cols = new_cols;
            rows = new_rows;
        }
        debug_assert_eq!(bands.built_for_rows(), rows);

        if let Some((code, modifiers)) = term.poll_key()? {
            if is_quit_key(code, modifiers) {
                dbg_log!(log, "quit after {} frames", frames_rendered);
                return Ok(RunStats {
                    frames_rendered,
                    completed: false,
                });
            }
        }

        let Some(step) = pipeline.step(cols as usize, ceiling) else {
            break;
        };

        let rendered = step.heights.is_some();
        if let Some(heights) = step.heights {
            term.clear();
            draw_frame(term, &heights, &bands);
            frames_rendered += 1;
        }

        let nominal = step.hop_start as f64 / sample_rate as f64;
        let elapsed = play_start.elapsed().as_secs_f64();
        let delay = elapsed - nominal;
        let render_time = frame_start.elapsed().as_secs_f64();

        if rendered {
            draw_status_line(
                term,
                elapsed,
                nominal,
                total_duration,
                delay,
                render_time,
                hop_duration,
            );
            term.present()?;
        }

        let slack = hop_duration - render_time - delay;
        if slack > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(slack));
        }
    }

    dbg_log!(log, "done: {} frames", frames_rendered);
    Ok(RunStats {
        frames_rendered,
        completed: true,
    })
}
