//! In-place frame output.

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Writes rendered frames over the previous one.
///
/// Each frame starts by homing the cursor instead of clearing the screen,
/// which avoids flicker. Whatever the previous, possibly larger, frame left
/// below the new one is erased afterwards.
pub struct FrameWriter<W: Write> {
    out: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one frame: cursor home, each line followed by a line break,
    /// clear the rest of the screen, flush.
    pub fn write_frame(&mut self, lines: &[String]) -> io::Result<()> {
        self.out.queue(MoveTo(0, 0))?;
        for line in lines {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.queue(Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
