//! The logger service
//!
//! `Logger` owns the configuration and the batch queue and exposes the
//! leveled logging API. It is an explicitly constructed service object;
//! callers share it by reference (or `Arc`), and process-wide default
//! construction belongs to the application entry point.
//!
//! A single mutex serializes every mutation of the queue, the file handle
//! and the file-target configuration. The level, color mode and screen flag
//! are relaxed atomics so the severity filter and the console path never
//! touch the lock. Lock failure anywhere degrades to a silent no-op: a
//! logging call must never become a new source of application failure.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::color::ColorMode;
use crate::console;
use crate::format::{self, ItemBuf};
use crate::level::{Highlight, Priority};
use crate::queue::BatchQueue;
use crate::rotate;

/// Logger configuration, replaced wholesale by [`Logger::set_context`].
///
/// `screen = true` means synchronous console output only; otherwise records
/// are batched to `file_path`. The two modes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogContext {
    /// Minimum severity to emit; less severe records are dropped.
    pub level: Priority,
    /// How the console display color is chosen.
    pub color: ColorMode,
    /// Console output when true, batched file output when false.
    pub screen: bool,
    /// Maintain a logrotate descriptor for the file target.
    pub rotate: bool,
    /// Absolute log file path; empty means no file target configured.
    pub file_path: PathBuf,
}

impl Default for LogContext {
    fn default() -> Self {
        Self {
            level: Priority::Warn,
            color: ColorMode::ByProcess,
            screen: true,
            rotate: false,
            file_path: PathBuf::new(),
        }
    }
}

/// State only reachable while holding the logger's lock. Methods taking
/// `&mut Inner` can rely on that exclusivity.
struct Inner {
    queue: BatchQueue,
    file_path: PathBuf,
    rotate: bool,
}

/// Leveled, colorized, batching logger. See the module docs for the
/// concurrency contract.
pub struct Logger {
    level: AtomicI32,
    color: AtomicI32,
    screen: AtomicBool,
    inner: Mutex<Inner>,
    rotate_dir: PathBuf,
}

impl Logger {
    /// Logger with default configuration (warn level, process-derived
    /// color, console output) and the system logrotate directory.
    pub fn new() -> Self {
        Self::with_rotate_dir(rotate::DEFAULT_CONFIG_DIR)
    }

    /// Logger writing rotation descriptors under an alternate directory.
    pub fn with_rotate_dir(rotate_dir: impl Into<PathBuf>) -> Self {
        let ctx = LogContext::default();
        Self {
            level: AtomicI32::new(ctx.level.rank()),
            color: AtomicI32::new(ctx.color.to_raw()),
            screen: AtomicBool::new(ctx.screen),
            inner: Mutex::new(Inner {
                queue: BatchQueue::new(Local::now().timestamp()),
                file_path: ctx.file_path,
                rotate: ctx.rotate,
            }),
            rotate_dir: rotate_dir.into(),
        }
    }

    /// Replace the configuration. When the swap abandons the current file
    /// target (leaving file mode, or pointing at a different path), pending
    /// records are force-flushed and the handle closed before the new
    /// configuration takes effect; the rotation descriptor is then brought
    /// in line with the new target. May block on file I/O.
    pub fn set_context(&self, ctx: &LogContext) {
        let Ok(mut guard) = self.inner.lock() else {
            return;
        };
        let inner = &mut *guard;

        let was_screen = self.screen.load(Ordering::Relaxed);
        if (!was_screen && ctx.screen) || inner.file_path != ctx.file_path {
            self.flush_inner(inner, true);
            inner.queue.close_file();
        }

        self.level.store(ctx.level.rank(), Ordering::Relaxed);
        self.color.store(ctx.color.to_raw(), Ordering::Relaxed);
        self.screen.store(ctx.screen, Ordering::Relaxed);
        inner.file_path = ctx.file_path.clone();
        inner.rotate = ctx.rotate;

        rotate::apply(&self.rotate_dir, &inner.file_path, inner.rotate);
    }

    /// Change only the minimum severity. Lock-free; racing writers get
    /// last-writer-wins semantics.
    pub fn set_level(&self, level: Priority) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    /// Log one record. Records below the configured level are discarded
    /// before any formatting or I/O.
    pub fn log(&self, priority: Priority, highlight: Highlight, args: fmt::Arguments<'_>) {
        if priority.rank() > self.level.load(Ordering::Relaxed) {
            return;
        }

        let mode = ColorMode::from_raw(self.color.load(Ordering::Relaxed));
        let now = Local::now();

        if self.screen.load(Ordering::Relaxed) {
            let mut buf = ItemBuf::new();
            format::format_console(&mut buf, mode, now, priority, args);
            console::write_item(buf.as_str(), highlight, mode.resolve());
        } else {
            let Ok(mut guard) = self.inner.lock() else {
                return;
            };
            let inner = &mut *guard;
            self.flush_inner(inner, false);
            inner
                .queue
                .append(|slot| format::format_file(slot, mode, now, priority, args));
        }
    }

    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Priority::Critical, Highlight::None, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Priority::Warn, Highlight::None, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Priority::Info, Highlight::None, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Priority::Debug, Highlight::None, args);
    }

    /// Force-flush any pending batch to the file target.
    pub fn flush(&self) {
        let Ok(mut guard) = self.inner.lock() else {
            return;
        };
        self.flush_inner(&mut guard, true);
    }

    /// Flush under the lock and keep the rotation descriptor current when a
    /// newly created file received its first records. Taking `&mut Inner`
    /// makes the held lock part of the signature.
    fn flush_inner(&self, inner: &mut Inner, force: bool) {
        if inner
            .queue
            .maybe_flush(&inner.file_path, force, Local::now().timestamp())
        {
            rotate::apply(&self.rotate_dir, &inner.file_path, inner.rotate);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.inner.lock() {
            let inner = &mut *guard;
            self.flush_inner(inner, true);
            inner.queue.close_file();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_ctx(path: PathBuf) -> LogContext {
        LogContext {
            level: Priority::Debug,
            color: ColorMode::ByProcess,
            screen: false,
            rotate: false,
            file_path: path,
        }
    }

    #[test]
    fn test_default_context() {
        let ctx = LogContext::default();
        assert_eq!(ctx.level, Priority::Warn);
        assert_eq!(ctx.color, ColorMode::ByProcess);
        assert!(ctx.screen);
        assert!(!ctx.rotate);
        assert!(ctx.file_path.as_os_str().is_empty());
    }

    #[test]
    fn test_filtered_records_produce_no_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(temp.path());

        let mut ctx = file_ctx(path.clone());
        ctx.level = Priority::Warn;
        logger.set_context(&ctx);

        logger.info(format_args!("too quiet"));
        logger.debug(format_args!("quieter still"));
        logger.flush();

        // Nothing was queued, so the file was never even created
        assert!(!path.exists());
    }

    #[test]
    fn test_file_round_trip_preserves_order_and_headers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(temp.path());
        logger.set_context(&file_ctx(path.clone()));

        logger.critical(format_args!("first {}", 1));
        logger.warn(format_args!("second"));
        logger.info(format_args!("third"));
        logger.debug(format_args!("fourth"));
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);

        let expected = [("C", "first 1"), ("W", "second"), ("I", "third"), ("D", "fourth")];
        for (line, (letter, msg)) in lines.iter().zip(expected) {
            assert!(line.starts_with('['), "header missing: {line}");
            let close = line.find(']').unwrap();
            let header = &line[1..close];
            // [identity timestamp L]
            let fields: Vec<&str> = header.split_whitespace().collect();
            assert_eq!(fields.len(), 3, "bad header: {line}");
            assert!(fields[0].parse::<u32>().is_ok());
            assert!(fields[1].contains(':') && fields[1].contains('.'));
            assert_eq!(fields[2], letter);
            assert_eq!(&line[close + 2..], msg);
        }
    }

    #[test]
    fn test_double_force_flush_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(temp.path());
        logger.set_context(&file_ctx(path.clone()));

        logger.warn(format_args!("only one"));
        logger.flush();
        let len_after_first = fs::metadata(&path).unwrap().len();

        logger.flush();
        logger.flush();
        assert_eq!(fs::metadata(&path).unwrap().len(), len_after_first);
    }

    #[test]
    fn test_config_swap_flushes_to_old_target_first() {
        let temp = TempDir::new().unwrap();
        let old_path = temp.path().join("old.log");
        let new_path = temp.path().join("new.log");
        let logger = Logger::with_rotate_dir(temp.path());

        logger.set_context(&file_ctx(old_path.clone()));
        logger.warn(format_args!("belongs to old"));

        logger.set_context(&file_ctx(new_path.clone()));
        let old_contents = fs::read_to_string(&old_path).unwrap();
        assert!(old_contents.contains("belongs to old"));
        assert!(!new_path.exists());

        logger.warn(format_args!("belongs to new"));
        logger.flush();
        assert!(fs::read_to_string(&new_path).unwrap().contains("belongs to new"));
        assert!(!fs::read_to_string(&old_path).unwrap().contains("belongs to new"));
    }

    #[test]
    fn test_switch_to_screen_mode_flushes_pending_batch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(temp.path());
        logger.set_context(&file_ctx(path.clone()));

        logger.warn(format_args!("pending"));
        assert!(!path.exists());

        let mut ctx = file_ctx(path.clone());
        ctx.screen = true;
        logger.set_context(&ctx);
        assert!(fs::read_to_string(&path).unwrap().contains("pending"));
    }

    #[test]
    fn test_set_level_takes_effect() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(temp.path());
        let mut ctx = file_ctx(path.clone());
        ctx.level = Priority::Warn;
        logger.set_context(&ctx);

        logger.debug(format_args!("dropped"));
        logger.set_level(Priority::Debug);
        logger.debug(format_args!("kept"));
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("dropped"));
        assert!(contents.contains("kept"));
    }

    #[test]
    fn test_drop_flushes_pending_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        {
            let logger = Logger::with_rotate_dir(temp.path());
            logger.set_context(&file_ctx(path.clone()));
            logger.warn(format_args!("flushed on drop"));
            assert!(!path.exists());
        }
        assert!(fs::read_to_string(&path).unwrap().contains("flushed on drop"));
    }

    #[test]
    fn test_rotation_descriptor_follows_context() {
        let temp = TempDir::new().unwrap();
        let rotate_dir = temp.path().join("logrotate.d");
        fs::create_dir(&rotate_dir).unwrap();
        let path = temp.path().join("app.log");
        let logger = Logger::with_rotate_dir(&rotate_dir);

        let mut ctx = file_ctx(path.clone());
        ctx.rotate = true;
        logger.set_context(&ctx);

        let conf = rotate_dir.join("app.log.conf");
        let contents = fs::read_to_string(&conf).unwrap();
        assert!(contents.starts_with(&format!("{}\n{{", path.display())));
        assert!(contents.contains("rotate 4"));
        assert!(contents.contains("size 50M"));

        ctx.rotate = false;
        logger.set_context(&ctx);
        assert!(!conf.exists());
    }

    #[test]
    fn test_concurrent_file_logging_keeps_all_records() {
        use std::sync::Arc;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.log");
        let logger = Arc::new(Logger::with_rotate_dir(temp.path()));
        logger.set_context(&file_ctx(path.clone()));

        let mut handles = Vec::new();
        for t in 0..4 {
            let logger = Arc::clone(&logger);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    logger.info(format_args!("thread {} record {}", t, i));
                }
            }));
        }
        for handle in handles {
            let _ = handle.join();
        }
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 200);
    }
}
