//! Display color selection
//!
//! Colors are encoded as a signed ANSI SGR code: the magnitude is the code
//! itself and a negative sign requests the bold rendition. Identity-derived
//! modes pick deterministically from a fixed 10-entry palette via
//! `identity % 10`, so one process (or thread) keeps its color for the
//! whole session.

use serde::{Deserialize, Serialize};

/// Signed ANSI color encoding: magnitude = SGR code, negative = bold.
/// Zero means the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorCode(pub i8);

pub const CLR_DEFAULT: ColorCode = ColorCode(0);
pub const CLR_GRAY: ColorCode = ColorCode(-30);
pub const CLR_RED: ColorCode = ColorCode(31);
pub const CLR_ORANGE: ColorCode = ColorCode(-31);
pub const CLR_GREEN: ColorCode = ColorCode(32);
pub const CLR_LGREEN: ColorCode = ColorCode(-32);
pub const CLR_YELLOW: ColorCode = ColorCode(-33);
pub const CLR_BLUE: ColorCode = ColorCode(-34);
pub const CLR_PURPLE: ColorCode = ColorCode(35);
pub const CLR_LPURPLE: ColorCode = ColorCode(-35);
pub const CLR_CYAN: ColorCode = ColorCode(36);
pub const CLR_LCYAN: ColorCode = ColorCode(-36);

/// Identity-reduced palette, indexed by `identity % 10`.
const PALETTE: [ColorCode; 10] = [
    CLR_RED, CLR_BLUE, CLR_GREEN, CLR_LGREEN, CLR_LPURPLE, CLR_ORANGE, CLR_YELLOW, CLR_CYAN,
    CLR_PURPLE, CLR_LCYAN,
];

impl ColorCode {
    /// The plain SGR code (sign stripped).
    pub fn code(self) -> u8 {
        self.0.unsigned_abs()
    }

    /// Whether the bold rendition was requested.
    pub fn bold(self) -> bool {
        self.0 < 0
    }
}

/// How the display color of a record is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Terminal default color.
    None,
    /// Palette color derived from the process id.
    #[default]
    ByProcess,
    /// Palette color derived from the calling thread's id.
    ByThread,
    /// Explicit fixed color.
    Fixed(ColorCode),
}

impl ColorMode {
    /// Pack into a single word for lock-free storage. The values 0, 1 and 2
    /// are sentinels (none / by-process / by-thread); anything else is a
    /// fixed signed color code. Real SGR codes start at 30, so the sentinel
    /// range never collides with a usable color.
    pub fn to_raw(self) -> i32 {
        match self {
            ColorMode::None => 0,
            ColorMode::ByProcess => 1,
            ColorMode::ByThread => 2,
            ColorMode::Fixed(c) => c.0 as i32,
        }
    }

    /// Inverse of [`to_raw`](Self::to_raw).
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => ColorMode::None,
            1 => ColorMode::ByProcess,
            2 => ColorMode::ByThread,
            c => ColorMode::Fixed(ColorCode(c.clamp(i8::MIN as i32, i8::MAX as i32) as i8)),
        }
    }

    /// Resolve the color to display for the current caller.
    pub fn resolve(self) -> ColorCode {
        match self {
            ColorMode::None => CLR_DEFAULT,
            ColorMode::Fixed(c) => c,
            ColorMode::ByProcess => PALETTE[(process_id() % 10) as usize],
            ColorMode::ByThread => PALETTE[(thread_id() % 10) as usize],
        }
    }

    /// The identity shown in record headers: thread id only when the color
    /// is thread-derived, otherwise the process id.
    pub fn identity(self) -> u32 {
        match self {
            ColorMode::ByThread => thread_id(),
            _ => process_id(),
        }
    }
}

/// OS process id.
pub fn process_id() -> u32 {
    std::process::id()
}

/// OS thread id. Only Linux exposes a numeric kernel tid; elsewhere the
/// process id stands in.
#[cfg(target_os = "linux")]
pub fn thread_id() -> u32 {
    unsafe { libc::gettid() as u32 }
}

#[cfg(not(target_os = "linux"))]
pub fn thread_id() -> u32 {
    std::process::id()
}
