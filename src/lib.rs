//! conlog - leveled colorized console logging with batched file output
//!
//! A process-local logging facility: interactive console output with ANSI
//! colors and highlight modes, or batched file output with a size/time
//! flush policy and logrotate descriptor maintenance. Every failure mode is
//! absorbed internally; a logging call never propagates an error into the
//! host application.

pub mod color;
pub mod console;
pub mod format;
pub mod level;
pub mod logger;
pub mod queue;
pub mod rotate;

pub use color::{ColorCode, ColorMode};
pub use level::{Highlight, Priority};
pub use logger::{LogContext, Logger};

/// Log with an explicit priority and highlight mode.
#[macro_export]
macro_rules! log_item {
    ($logger:expr, $priority:expr, $highlight:expr, $($arg:tt)*) => {
        $logger.log($priority, $highlight, format_args!($($arg)*))
    };
}

/// Log a critical record.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)*) => {
        $logger.critical(format_args!($($arg)*))
    };
}

/// Log a warning record.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

/// Log an info record.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

/// Log a debug record.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}
