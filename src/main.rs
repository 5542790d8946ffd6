use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use termspectrum::audio::{decode_wav, playback};
use termspectrum::config::SpectrumConfig;
use termspectrum::terminal::Terminal;
use termspectrum::viz::spectrum;

#[derive(Parser)]
#[command(name = "termspectrum")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal audio spectrum visualizer: scrolling FFT bars synced to playback", long_about = None)]
struct Cli {
    /// Path to a 16-bit PCM WAV file
    #[arg(short, long)]
    file: PathBuf,

    /// Visualize without playing audio
    #[arg(long)]
    no_audio: bool,

    /// Samples per FFT window (power of two)
    #[arg(long, default_value_t = 2048)]
    frame_size: usize,

    /// Samples advanced between consecutive windows
    #[arg(long, default_value_t = 1600)]
    hop_size: usize,

    /// Weight of the previous frame while a bar falls (0-1)
    #[arg(long, default_value_t = 0.93)]
    decay: f32,

    /// Weight of the previous frame while a bar rises (0-1)
    #[arg(long, default_value_t = 0.2)]
    attack: f32,

    /// Cap the render rate; extra analysis frames are averaged together
    #[arg(long)]
    fps: Option<f32>,

    /// Write timing diagnostics to /tmp/termspectrum.log
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SpectrumConfig {
        frame_size: cli.frame_size,
        hop_size: cli.hop_size,
        decay: cli.decay,
        attack: cli.attack,
        target_fps: cli.fps,
        no_audio: cli.no_audio,
        debug: cli.debug,
    };
    config.validate()?;

    let samples = decode_wav(&cli.file)
        .with_context(|| format!("failed to decode {}", cli.file.display()))?;

    let playback_task = if config.no_audio {
        None
    } else {
        Some(playback::spawn(cli.file.clone()))
    };

    let mut term = Terminal::new()?;
    let outcome = spectrum::run(&mut term, &samples, &config);

    // wait out the tail of the audio once the bars are done; on an early
    // quit the thread dies with the process instead
    let playback_result = match (&outcome, playback_task) {
        (Ok(stats), Some(task)) if stats.completed => Some(task.join()),
        _ => None,
    };

    drop(term);
    outcome?;

    if let Some(Err(e)) = playback_result {
        eprintln!("audio playback failed: {}", e);
    }
    Ok(())
}
