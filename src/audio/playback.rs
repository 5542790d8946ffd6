//! Fire-and-forget audio playback on its own thread.
//!
//! The playback thread owns the output device session for the whole file and
//! shares no state with the render loop; the two stay in sync only through
//! the wall clock. The handle is joined once, at shutdown.

use crate::error::PlaybackError;
use std::fs::File;
use std::io::BufReader;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

/// Handle to the detached playback thread.
pub struct PlaybackTask {
    handle: JoinHandle<Result<(), PlaybackError>>,
}

impl PlaybackTask {
    /// Block until the file has finished playing.
    pub fn join(self) -> Result<(), PlaybackError> {
        self.handle.join().map_err(|_| PlaybackError::Panicked)?
    }
}

/// Start playing `path` on a new thread. Errors surface through `join`.
pub fn spawn(path: PathBuf) -> PlaybackTask {
    let handle = std::thread::spawn(move || play(&path));
    PlaybackTask { handle }
}

fn play(path: &Path) -> Result<(), PlaybackError> {
    // ALSA prints device warnings straight to stderr during enumeration,
    // which would land in the middle of the raw-mode display.
    let silencer = StderrSilencer::new();
    let stream = rodio::OutputStream::try_default();
    drop(silencer);

    let (_stream, handle) = stream?;
    let sink = rodio::Sink::try_new(&handle)?;

    let file = File::open(path)?;
    let source = rodio::Decoder::new(BufReader::new(file))?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

/// RAII guard redirecting stderr to /dev/null, restored on drop.
struct StderrSilencer {
    saved_fd: i32,
    _dev_null: File,
}

impl StderrSilencer {
    fn new() -> Option<Self> {
        let dev_null = File::open("/dev/null").ok()?;
        let saved_fd = unsafe { libc::dup(2) };
        if saved_fd < 0 {
            return None;
        }
        if unsafe { libc::dup2(dev_null.as_raw_fd(), 2) } < 0 {
            unsafe {
                libc::close(saved_fd);
            }
            return None;
        }
        Some(Self {
            saved_fd,
            _dev_null: dev_null,
        })
    }
}

impl Drop for StderrSilencer {
    fn drop(&mut self) {
        unsafe {
            libc::dup2(self.saved_fd, 2);
            libc::close(self.saved_fd);
        }
    }
}
