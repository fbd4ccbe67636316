//! Console emission with ANSI color wrapping
//!
//! Wraps a formatted record in SGR escape sequences and hands it to stdout
//! as a single write, so concurrent callers interleave at whole-record
//! granularity at worst.

use std::fmt::Write as _;
use std::io::Write as _;

use crate::color::ColorCode;
use crate::format::{BoundedBuf, MAX_ITEM_LEN};
use crate::level::Highlight;

/// Room for the record plus escape prefix, reset suffix and newline.
type LineBuf = BoundedBuf<{ MAX_ITEM_LEN + 64 }>;

/// Emit one record to stdout, colorized per the highlight mode.
pub fn write_item(line: &str, highlight: Highlight, color: ColorCode) {
    let mut out = LineBuf::new();
    render(&mut out, line, highlight, color);
    let stdout = std::io::stdout();
    let _ = stdout.lock().write_all(out.as_bytes());
}

/// Background SGR code used by [`Highlight::Mark`], derived from the
/// resolved foreground code.
fn mark_background(color: ColorCode) -> u8 {
    match color.code() {
        30 => 47,      // gray on light gray
        31 | 35 => 45, // red/orange/purple family on magenta
        33 => 43,      // yellow on yellow
        34 => 44,      // blue on blue
        36 => 46,      // cyan family on cyan
        _ => 42,       // green family and default on green
    }
}

fn render(out: &mut LineBuf, line: &str, highlight: Highlight, color: ColorCode) {
    match highlight {
        Highlight::Key => {
            let _ = out.write_str("\x1b[1;37;41m");
        }
        Highlight::Mark => {
            let _ = write!(out, "\x1b[30;{}m", mark_background(color));
        }
        Highlight::None => {
            if color.bold() {
                let _ = write!(out, "\x1b[1;{}m", color.code());
            } else {
                let _ = write!(out, "\x1b[{}m", color.code());
            }
        }
    }
    let _ = out.write_str(line);
    let _ = out.write_str("\x1b[0m\n");
}
