//! Log priorities and console highlight modes
//!
//! Priorities carry explicit numeric ranks: lower value means more severe.
//! A record is emitted only when its rank does not exceed the configured
//! level, so raising the level admits more (less severe) records.

use serde::{Deserialize, Serialize};

/// Severity of a log record. Lower rank = more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Priority {
    Critical = 10,
    Warn = 20,
    Info = 30,
    Debug = 40,
}

impl Priority {
    /// Numeric rank used for level filtering.
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Single-character tag used in record headers.
    pub fn letter(self) -> char {
        match self {
            Priority::Critical => 'C',
            Priority::Warn => 'W',
            Priority::Info => 'I',
            Priority::Debug => 'D',
        }
    }

    /// Reconstruct a priority from a stored rank. Unknown ranks fall back
    /// to `Warn` rather than failing.
    pub fn from_rank(rank: i32) -> Self {
        match rank {
            10 => Priority::Critical,
            30 => Priority::Info,
            40 => Priority::Debug,
            _ => Priority::Warn,
        }
    }
}

/// Presentation emphasis for console output, independent of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Foreground-colored text only.
    #[default]
    None,
    /// Whole line on a background matching the resolved color.
    Mark,
    /// White text on red background regardless of configured color.
    Key,
}
