//! Diff-based ANSI terminal renderer.
//!
//! This is the only component that touches the terminal. It holds the
//! previous frame, computes cell-level diffs, and emits batched cursor-move
//! plus write sequences in a single `write_all` per draw call. The screen is
//! cleared only on the first draw and when the frame dimensions change.

use std::io::Write;

use crate::Frame;

const CSI: &str = "\x1b[";

fn move_cursor(buf: &mut String, row: usize, col: usize) {
    // 1-based ANSI coordinates.
    buf.push_str(CSI);
    buf.push_str(&(row + 1).to_string());
    buf.push(';');
    buf.push_str(&(col + 1).to_string());
    buf.push('H');
}

/// Stateful renderer that diffs successive [`Frame`]s.
#[derive(Default)]
pub struct TerminalRenderer {
    prev:          Option<Frame>,
    cursor_hidden: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `frame` to `out`, diffing against the previous frame.
    pub fn draw<W: Write>(&mut self, frame: &Frame, out: &mut W) -> std::io::Result<()> {
        let mut buf = String::new();

        if !self.cursor_hidden {
            buf.push_str(CSI);
            buf.push_str("?25l"); // hide cursor
            self.cursor_hidden = true;
        }

        match &self.prev {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                diff_draw(prev, frame, &mut buf);
            }
            _ => full_draw(frame, &mut buf),
        }

        if !buf.is_empty() {
            out.write_all(buf.as_bytes())?;
            out.flush()?;
        }
        self.prev = Some(frame.clone());
        Ok(())
    }

    /// Restore terminal state (show the cursor again).
    pub fn cleanup<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if self.cursor_hidden {
            out.write_all(format!("{CSI}?25h").as_bytes())?;
            out.flush()?;
            self.cursor_hidden = false;
        }
        Ok(())
    }
}

/// Emit every row (first draw or resize): clear, home, full frame.
fn full_draw(frame: &Frame, buf: &mut String) {
    buf.push_str(CSI);
    buf.push_str("2J"); // clear screen
    buf.push_str(CSI);
    buf.push('H'); // cursor home
    for (y, row) in frame.rows().enumerate() {
        move_cursor(buf, y, 0);
        buf.push_str(&row);
    }
}

/// Emit only changed cells, batching consecutive changes per row.
fn diff_draw(prev: &Frame, frame: &Frame, buf: &mut String) {
    for y in 0..frame.height() {
        let mut x = 0;
        while x < frame.width() {
            if frame.get(x, y) == prev.get(x, y) {
                x += 1;
                continue;
            }
            let run_start = x;
            let mut run = String::new();
            while x < frame.width() && frame.get(x, y) != prev.get(x, y) {
                run.push(frame.get(x, y));
                x += 1;
            }
            move_cursor(buf, y, run_start);
            buf.push_str(&run);
        }
    }
}
