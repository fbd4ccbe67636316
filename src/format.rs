//! Record formatting into fixed-capacity buffers
//!
//! Every byte written on the logging hot path goes through [`BoundedBuf`],
//! which truncates at capacity (on a UTF-8 boundary) instead of failing or
//! reallocating. One buffer holds one rendered record.

use std::fmt::{self, Write};

use chrono::{DateTime, Local};

use crate::color::ColorMode;
use crate::level::Priority;

/// Maximum rendered length of a single record, excluding line framing.
pub const MAX_ITEM_LEN: usize = 1023;

/// Fixed-capacity text buffer. Writes past capacity are silently truncated;
/// the stored bytes are always valid UTF-8.
#[derive(Debug, Clone)]
pub struct BoundedBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

/// Buffer sized for one queued record plus its trailing newline.
pub type ItemBuf = BoundedBuf<{ MAX_ITEM_LEN + 1 }>;

impl<const N: usize> BoundedBuf<N> {
    pub fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a newline, evicting trailing bytes (down to a character
    /// boundary) when the buffer is already full. File records must end in
    /// a newline even after truncation.
    pub fn push_newline(&mut self) {
        if self.len == N {
            self.len -= 1;
            while self.len > 0 && self.buf[self.len] & 0xC0 == 0x80 {
                self.len -= 1;
            }
        }
        self.buf[self.len] = b'\n';
        self.len += 1;
    }
}

impl<const N: usize> Default for BoundedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for BoundedBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let avail = N - self.len;
        let take = if s.len() <= avail {
            s.len()
        } else {
            let mut t = avail;
            while t > 0 && !s.is_char_boundary(t) {
                t -= 1;
            }
            t
        };
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        // Truncation is deliberate, not an error
        Ok(())
    }
}

/// Render the compact console layout: `[id  secs.usecs L] message`.
/// Seconds are shown modulo 256; the console writer supplies line framing.
pub fn format_console(
    buf: &mut ItemBuf,
    mode: ColorMode,
    now: DateTime<Local>,
    priority: Priority,
    args: fmt::Arguments<'_>,
) {
    let secs = now.timestamp() & 0xFF;
    let usecs = now.timestamp_subsec_micros();
    let _ = write!(
        buf,
        "[{:<6} {:03}.{:06} {}] ",
        mode.identity(),
        secs,
        usecs,
        priority.letter()
    );
    let _ = buf.write_fmt(args);
}

/// Render the file layout: `[id  YYMMDD:HHMMSS.usecs L] message\n`.
pub fn format_file(
    buf: &mut ItemBuf,
    mode: ColorMode,
    now: DateTime<Local>,
    priority: Priority,
    args: fmt::Arguments<'_>,
) {
    let usecs = now.timestamp_subsec_micros();
    let _ = write!(
        buf,
        "[{:<6} {}.{:06} {}] ",
        mode.identity(),
        now.format("%y%m%d:%H%M%S"),
        usecs,
        priority.letter()
    );
    let _ = buf.write_fmt(args);
    buf.push_newline();
}
