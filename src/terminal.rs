use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Foreground/background color pair for one cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

/// A single cell in the back buffer
#[derive(Clone)]
struct Cell {
    glyph: char,
    color: Option<ColorPair>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: None,
        }
    }
}

/// Buffered terminal for full-frame rendering. Enters the alternate screen
/// in raw mode on construction and restores the terminal on drop.
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
        })
    }

    /// Current grid dimensions as (cols, rows).
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer for a new grid size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the back buffer.
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual screen (used after a resize leaves stale cells).
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Place a glyph at (x, y). Writes outside the grid are ignored, so
    /// callers may draw a computed extent and let the visible region clamp
    /// it.
    pub fn set(&mut self, x: i32, y: i32, glyph: char, color: Option<ColorPair>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { glyph, color };
        }
    }

    /// Place a string starting at (x, y).
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, color: Option<ColorPair>) {
        for (i, glyph) in s.chars().enumerate() {
            self.set(x + i as i32, y, glyph, color);
        }
    }

    /// Flush the back buffer to the screen.
    pub fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        let mut last_color: Option<ColorPair> = None;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16))?;
            for cell in row {
                if cell.color != last_color {
                    match cell.color {
                        Some(pair) => queue!(
                            stdout,
                            SetForegroundColor(pair.fg),
                            SetBackgroundColor(pair.bg)
                        )?,
                        None => queue!(stdout, ResetColor)?,
                    }
                    last_color = cell.color;
                }
                queue!(stdout, Print(cell.glyph))?;
            }
        }

        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    /// Check for a keypress without blocking.
    pub fn poll_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
